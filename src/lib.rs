#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

//! Butterfly species identification web service.
//!
//! A pretrained classifier is loaded once at startup (downloaded first if
//! absent) and shared read-only across requests. Each `POST /predict` runs
//! the upload through a linear pipeline: decode, resize to 150x150x3,
//! normalize to `[0, 1]`, infer, arg-max, label lookup.

use anyhow::Result;
use std::{
	net::SocketAddr,
	sync::{atomic::Ordering, Arc},
};

use crate::{
	model::{Health, APP_HEALTH},
	shutdown::Shutdown,
};

pub use crate::{classifier::Classifier, config::Config, storage::Storage};

pub mod classifier;
pub mod config;
pub mod errors;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod routes;
mod shutdown;
pub mod storage;
mod templates;

/// Shared read-only state for the request handlers.
pub struct AppState {
	pub classifier: Arc<dyn Classifier>,
	pub storage: Storage,
}

/// Provision the model, then serve until a shutdown is requested.
///
/// # Errors
///
/// This function will return an error if the model artifact cannot be
/// fetched or loaded, the staging directory cannot be created, or the
/// server fails to start.
pub async fn start(config: Config) -> Result<()> {
	let mut shutdown = Shutdown::new()?;

	APP_HEALTH.swap(Health::Starting, Ordering::SeqCst);
	let classifier = match model::ensure_model_available(&config).await {
		Ok(classifier) => Arc::new(classifier),
		Err(error) => {
			APP_HEALTH.swap(Health::SetupFailed, Ordering::SeqCst);
			return Err(error.into());
		},
	};

	let storage = Storage::new(&config.upload_dir)?;
	APP_HEALTH.swap(Health::Ready, Ordering::SeqCst);

	let state = Arc::new(AppState { classifier, storage });
	let app = routes::handler()
		.layer(axum::Extension(state))
		.layer(shutdown.extension());

	let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
	tracing::info!("Listening on {addr}");

	axum::Server::bind(&addr)
		.serve(app.into_make_service())
		.with_graceful_shutdown(shutdown.handle())
		.await?;

	Ok(())
}
