#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use clap::Parser;
use tracing_subscriber::EnvFilter;
use wingscan::Config;

#[tokio::main]
async fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wingscan=info")),
		)
		.init();

	let config = Config::parse();

	if let Err(error) = wingscan::start(config).await {
		tracing::error!("{error:?}");
		std::process::exit(1);
	}
}
