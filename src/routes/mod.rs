use axum::Router;

pub mod pages;
pub mod predict;
pub mod system;

pub fn handler() -> Router {
	Router::new()
		.merge(pages::handler())
		.merge(predict::handler())
		.merge(system::handler())
}
