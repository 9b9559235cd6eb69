use axum::{extract::Multipart, response::Html, routing::post, Extension, Router};
use std::sync::Arc;

use crate::{
	errors::{Error, HTTPError},
	pipeline, templates, AppState,
};

pub fn handler() -> Router {
	Router::new().route("/predict", post(predict))
}

async fn predict(
	Extension(state): Extension<Arc<AppState>>,
	mut multipart: Multipart,
) -> Result<Html<String>, HTTPError> {
	let (filename, bytes) = file_field(&mut multipart).await?;
	tracing::debug!("Received upload {filename:?} ({} bytes)", bytes.len());

	let staged = state.storage.stage(&filename, &bytes).await?;

	// Decode + inference are CPU-bound, so they run off the async workers.
	// The classifier handle is shared read-only across requests.
	let classifier = Arc::clone(&state.classifier);
	let label = tokio::task::spawn_blocking(move || pipeline::classify(classifier.as_ref(), &bytes))
		.await
		.map_err(|error| Error::Inference(Box::new(error)))??;

	tracing::info!("Predicted '{label}' for upload '{staged}'");

	Ok(Html(templates::result(label, &staged)))
}

/// Pull the `file` field out of the multipart form, enforcing the two
/// request-validation rules: the field must exist, and the client must have
/// actually selected a file.
async fn file_field(multipart: &mut Multipart) -> Result<(String, Vec<u8>), Error> {
	while let Some(field) = multipart
		.next_field()
		.await
		.map_err(|error| Error::Upload(Box::new(error)))?
	{
		if field.name() != Some("file") {
			continue;
		}

		let filename = field.file_name().unwrap_or_default().to_string();
		if filename.is_empty() {
			return Err(Error::EmptyFilename);
		}

		let bytes = field
			.bytes()
			.await
			.map_err(|error| Error::Upload(Box::new(error)))?;

		return Ok((filename, bytes.to_vec()));
	}

	Err(Error::MissingFile)
}
