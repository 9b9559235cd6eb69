use axum::{
	routing::{get, post},
	Extension, Json, Router,
};
use chrono::Utc;
use std::sync::atomic::Ordering;

use crate::{
	model::{Health, APP_HEALTH},
	shutdown::Agent as Shutdown,
};

pub fn handler() -> Router {
	Router::new()
		.route("/health-check", get(health_check))
		.route("/shutdown", post(shutdown))
}

#[derive(Debug, serde::Serialize)]
pub struct HealthCheck {
	/// Current health status
	pub status: Health,
	/// When the report was generated
	pub generated_at: String,
}

#[allow(clippy::unused_async)]
async fn health_check() -> Json<HealthCheck> {
	Json(HealthCheck {
		status: APP_HEALTH.load(Ordering::SeqCst),
		generated_at: Utc::now().to_rfc3339(),
	})
}

async fn shutdown(Extension(shutdown): Extension<Shutdown>) -> Json<String> {
	shutdown.start().await;

	Json(String::new())
}
