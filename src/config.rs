use clap::Parser;
use std::path::PathBuf;
use url::Url;

/// Where the model artifact is fetched from when it's missing on disk.
pub const DEFAULT_MODEL_URL: &str =
	"https://github.com/wingscan/artifacts/releases/download/v1/butterfly-vgg16.onnx";

#[derive(Debug, Clone, Parser)]
#[clap(name = "wingscan", about = "Butterfly species identification server")]
pub struct Config {
	/// Port to listen on.
	#[clap(long, env = "PORT", default_value_t = 5000)]
	pub port: u16,

	/// Path to the ONNX model artifact.
	#[clap(long, env = "MODEL_PATH", default_value = "models/butterfly-vgg16.onnx")]
	pub model_path: PathBuf,

	/// Remote location the model artifact is fetched from if absent.
	#[clap(long, env = "MODEL_URL", default_value = DEFAULT_MODEL_URL)]
	pub model_url: Url,

	/// Directory uploaded images are staged under.
	#[clap(long, env = "UPLOAD_DIR", default_value = "static/uploads")]
	pub upload_dir: PathBuf,
}
