use axum::{
	body::Body,
	http::{header, Request, StatusCode},
	Extension, Router,
};
use ndarray::Array4;
use std::{path::Path, sync::Arc};
use tower::ServiceExt;
use wingscan::{routes, AppState, Classifier, Storage};

const BOUNDARY: &str = "wingscan-test-boundary";

struct FixedScores(Vec<f32>);

impl Classifier for FixedScores {
	fn scores(&self, _batch: &Array4<f32>) -> anyhow::Result<Vec<f32>> {
		Ok(self.0.clone())
	}
}

fn app(scores: Vec<f32>, upload_dir: &Path) -> Router {
	let state = Arc::new(AppState {
		classifier: Arc::new(FixedScores(scores)),
		storage: Storage::new(upload_dir).unwrap(),
	});

	routes::handler().layer(Extension(state))
}

fn scores_with_max_at(index: usize, len: usize) -> Vec<f32> {
	let mut scores = vec![0.01; len];
	scores[index] = 0.85;
	scores
}

fn png_bytes() -> Vec<u8> {
	let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
		64,
		48,
		image::Rgb([180, 120, 40]),
	));

	let mut bytes = std::io::Cursor::new(Vec::new());
	image
		.write_to(&mut bytes, image::ImageOutputFormat::Png)
		.unwrap();

	bytes.into_inner()
}

fn form_part(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
	let mut body = format!(
		"--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
	)
	.into_bytes();

	body.extend_from_slice(bytes);
	body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
	body
}

fn predict_request(body: Vec<u8>) -> Request<Body> {
	Request::builder()
		.method("POST")
		.uri("/predict")
		.header(
			header::CONTENT_TYPE,
			format!("multipart/form-data; boundary={BOUNDARY}"),
		)
		.body(Body::from(body))
		.unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
	let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
	String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn landing_and_upload_pages_render() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	for uri in ["/", "/input"] {
		let response = app
			.clone()
			.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
			.await
			.unwrap();

		assert_eq!(response.status(), StatusCode::OK);
	}
}

#[tokio::test]
async fn a_request_without_a_file_field_is_a_bad_request() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	let body = form_part("not-the-file", "wings.png", b"irrelevant");
	let response = app.oneshot(predict_request(body)).await.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_string(response).await, "No file uploaded!");
}

#[tokio::test]
async fn a_file_field_with_an_empty_filename_is_a_bad_request() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	let body = form_part("file", "", &png_bytes());
	let response = app.oneshot(predict_request(body)).await.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);
	assert_eq!(body_string(response).await, "No file selected!");
}

#[tokio::test]
async fn a_valid_upload_renders_the_predicted_species() {
	let dir = tempfile::tempdir().unwrap();
	// Index 1 scores highest, so the page must show the table's second entry.
	let app = app(scores_with_max_at(1, 75), dir.path());

	let body = form_part("file", "monarch.png", &png_bytes());
	let response = app.oneshot(predict_request(body)).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let html = body_string(response).await;
	assert!(html.contains("Anartia jatrophae"));
	assert!(html.contains("/uploads/monarch%2Epng"));
	assert!(dir.path().join("monarch.png").exists());
}

#[tokio::test]
async fn a_mismatched_artifact_degrades_to_the_sentinel_label() {
	let dir = tempfile::tempdir().unwrap();
	// 80 scores with the winner beyond the table; must not crash.
	let app = app(scores_with_max_at(79, 80), dir.path());

	let body = form_part("file", "mystery.png", &png_bytes());
	let response = app.oneshot(predict_request(body)).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(body_string(response).await.contains("Unknown Species"));
}

#[tokio::test]
async fn undecodable_uploads_are_rejected_without_leaking_paths() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	let body = form_part("file", "junk.png", b"definitely not an image");
	let response = app.oneshot(predict_request(body)).await.unwrap();

	assert_eq!(response.status(), StatusCode::BAD_REQUEST);

	let message = body_string(response).await;
	assert_eq!(message, "Could not read the upload as an image.");
	assert!(!message.contains(dir.path().to_str().unwrap()));
}

#[tokio::test]
async fn traversal_attempts_stage_inside_the_uploads_directory() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	let body = form_part("file", "../../escape.png", &png_bytes());
	let response = app.oneshot(predict_request(body)).await.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert!(dir.path().join("escape.png").exists());
	assert!(!dir.path().parent().unwrap().join("escape.png").exists());
}

#[tokio::test]
async fn staged_images_are_served_back_with_their_content_type() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	let body = form_part("file", "serve-me.png", &png_bytes());
	let upload = app.clone().oneshot(predict_request(body)).await.unwrap();
	assert_eq!(upload.status(), StatusCode::OK);

	let response = app
		.oneshot(
			Request::builder()
				.uri("/uploads/serve-me.png")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);
	assert_eq!(
		response.headers().get(header::CONTENT_TYPE).unwrap(),
		"image/png"
	);
}

#[tokio::test]
async fn health_check_reports_a_status() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	let response = app
		.oneshot(
			Request::builder()
				.uri("/health-check")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::OK);

	let report: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
	assert!(report["status"].is_string());
	assert!(report["generated_at"].is_string());
}

#[tokio::test]
async fn unknown_staged_names_are_not_found() {
	let dir = tempfile::tempdir().unwrap();
	let app = app(scores_with_max_at(0, 75), dir.path());

	let response = app
		.oneshot(
			Request::builder()
				.uri("/uploads/never-staged.png")
				.body(Body::empty())
				.unwrap(),
		)
		.await
		.unwrap();

	assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
