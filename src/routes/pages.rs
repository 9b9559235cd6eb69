use axum::{
	extract::Path,
	http::{header, StatusCode},
	response::{Html, IntoResponse, Response},
	routing::get,
	Extension, Router,
};
use std::sync::Arc;

use crate::{templates, AppState};

pub fn handler() -> Router {
	Router::new()
		.route("/", get(home))
		.route("/input", get(input))
		.route("/uploads/:name", get(uploaded_image))
}

#[allow(clippy::unused_async)]
async fn home() -> Html<String> {
	Html(templates::home())
}

#[allow(clippy::unused_async)]
async fn input() -> Html<String> {
	Html(templates::input())
}

/// Serve a staged upload back to the result page. Unknown or unsafe names
/// are indistinguishable from missing files.
async fn uploaded_image(
	Path(name): Path<String>,
	Extension(state): Extension<Arc<AppState>>,
) -> Response {
	let Some(path) = state.storage.resolve(&name) else {
		return StatusCode::NOT_FOUND.into_response();
	};

	match tokio::fs::read(&path).await {
		Ok(bytes) => {
			let mime = mime_guess::from_path(&path).first_or_octet_stream();

			([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
		},
		Err(_) => StatusCode::NOT_FOUND.into_response(),
	}
}
