//! Model provisioning: fetch-once-if-absent, load-once-at-startup.
//!
//! The process must not serve predictions without a model, so every failure
//! here is fatal to startup.

use atomic_enum::atomic_enum;
use futures_util::StreamExt;
use tokio::{fs::File, io::AsyncWriteExt};

use crate::{classifier::OnnxClassifier, config::Config, errors::Error};

#[atomic_enum]
#[derive(serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Health {
	Unknown,
	Starting,
	Ready,
	SetupFailed,
}

pub static APP_HEALTH: AtomicHealth = AtomicHealth::new(Health::Unknown);

/// Make sure a classifier is available for the life of the process: download
/// the artifact if it's not on disk, then load it into a session.
///
/// # Errors
///
/// Returns [`Error::ModelFetch`] if the artifact is absent and cannot be
/// downloaded, or [`Error::ModelLoad`] if it cannot be loaded.
pub async fn ensure_model_available(config: &Config) -> Result<OnnxClassifier, Error> {
	if !config.model_path.exists() {
		fetch_artifact(config).await?;
	}

	tracing::info!("Loading model from {}", config.model_path.display());

	OnnxClassifier::load(&config.model_path).map_err(|source| Error::ModelLoad {
		path: config.model_path.clone(),
		source,
	})
}

/// Stream the model artifact from its remote location onto disk.
async fn fetch_artifact(config: &Config) -> Result<(), Error> {
	let url = config.model_url.to_string();
	tracing::info!("Model artifact missing, downloading from {url}");

	if let Some(parent) = config.model_path.parent() {
		tokio::fs::create_dir_all(parent)
			.await
			.map_err(|error| fetch_error(&url, error))?;
	}

	let response = reqwest::get(config.model_url.clone())
		.await
		.map_err(|error| fetch_error(&url, error))?;

	if !response.status().is_success() {
		return Err(Error::ModelFetch {
			url,
			source: format!("HTTP {}", response.status()).into(),
		});
	}

	let mut file = File::create(&config.model_path)
		.await
		.map_err(|error| fetch_error(&url, error))?;

	let mut stream = response.bytes_stream();
	while let Some(chunk) = stream.next().await {
		let chunk = chunk.map_err(|error| fetch_error(&url, error))?;
		file.write_all(&chunk)
			.await
			.map_err(|error| fetch_error(&url, error))?;
	}

	file.flush().await.map_err(|error| fetch_error(&url, error))?;
	tracing::info!("Model artifact saved to {}", config.model_path.display());

	Ok(())
}

fn fetch_error(url: &str, source: impl std::error::Error + Send + Sync + 'static) -> Error {
	Error::ModelFetch {
		url: url.to_string(),
		source: Box::new(source),
	}
}
