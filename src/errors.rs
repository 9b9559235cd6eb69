use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
};
use std::path::PathBuf;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// The multipart request carried no `file` field.
	#[error("No file uploaded!")]
	MissingFile,

	/// A `file` field was present but the client submitted it without
	/// selecting a file.
	#[error("No file selected!")]
	EmptyFilename,

	/// The uploaded filename reduces to nothing usable once path components
	/// are stripped.
	#[error("filename '{name}' cannot be staged")]
	UnsafeFilename {
		name: String,
	},

	/// The upload body could not be read.
	#[error("failed to read the uploaded file")]
	Upload(#[source] BoxedError),

	/// The staged bytes are not a decodable image.
	#[error("could not decode the upload as an image")]
	Decode(#[source] image::ImageError),

	/// Writing the upload to the staging directory failed.
	#[error("failed to stage upload '{name}'")]
	Staging {
		name: String,
		#[source]
		source: std::io::Error,
	},

	/// The model artifact could not be fetched from its remote location.
	#[error("failed to fetch model artifact from {url}")]
	ModelFetch {
		url: String,
		#[source]
		source: BoxedError,
	},

	/// The model artifact exists but could not be loaded as a session.
	#[error("failed to load model artifact at {path}")]
	ModelLoad {
		path: PathBuf,
		#[source]
		source: ort::Error,
	},

	/// The forward pass itself failed.
	#[error("inference failed")]
	Inference(#[source] BoxedError),
}

#[derive(Debug)]
pub struct HTTPError {
	detail: String,
	status_code: StatusCode,
}

impl HTTPError {
	pub fn new(detail: &str) -> Self {
		Self {
			detail: detail.to_string(),
			status_code: StatusCode::BAD_REQUEST,
		}
	}

	pub const fn with_status(mut self, status_code: StatusCode) -> Self {
		self.status_code = status_code;
		self
	}
}

impl IntoResponse for HTTPError {
	fn into_response(self) -> Response {
		(self.status_code, self.detail).into_response()
	}
}

impl From<Error> for HTTPError {
	fn from(error: Error) -> Self {
		match &error {
			Error::MissingFile | Error::EmptyFilename => Self::new(&error.to_string()),
			Error::UnsafeFilename { name } => {
				tracing::debug!("Rejected unsafe filename: {name:?}");
				Self::new("That filename cannot be used.")
			},
			Error::Upload(_) | Error::Decode(_) => {
				tracing::debug!("Rejected upload: {error:?}");
				Self::new("Could not read the upload as an image.")
			},
			// Server-side failures get logged with their source chain, but the
			// client only sees a generic message with no internal paths.
			Error::Staging { .. }
			| Error::ModelFetch { .. }
			| Error::ModelLoad { .. }
			| Error::Inference(_) => {
				tracing::error!("Prediction failed: {error:?}");
				Self::new("Something went wrong while classifying the image.")
					.with_status(StatusCode::INTERNAL_SERVER_ERROR)
			},
		}
	}
}
