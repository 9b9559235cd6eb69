//! The seam between the request pipeline and the loaded model.

use anyhow::{Context, Result};
use ndarray::Array4;
use ort::{
	logging::LogLevel,
	session::{Session, SessionInputs},
	value::TensorRef,
};
use std::{borrow::Cow, path::Path, sync::Mutex};

/// A loaded classification model, treated as an opaque function from a
/// `(1, 150, 150, 3)` batch to a vector of class scores. Implementations
/// must be safe for concurrent read-only use; nothing ever mutates the
/// model after load.
pub trait Classifier: Send + Sync {
	/// Run the model on a normalized batch and return its raw class scores.
	///
	/// # Errors
	///
	/// Returns an error if the forward pass fails.
	fn scores(&self, batch: &Array4<f32>) -> Result<Vec<f32>>;
}

/// ONNX Runtime backed classifier. The session requires `&mut` to run, so
/// it sits behind a mutex; requests serialize through it while sharing the
/// handle read-only.
pub struct OnnxClassifier {
	session: Mutex<Session>,
	input_name: String,
	output_name: String,
}

impl OnnxClassifier {
	/// Load a session from an ONNX artifact on disk, resolving the model's
	/// declared input and output names up front.
	///
	/// # Errors
	///
	/// Returns an error if the file is missing, corrupt, or not a loadable
	/// ONNX graph.
	pub fn load(path: &Path) -> Result<Self, ort::Error> {
		let session = Session::builder()?
			.with_log_level(LogLevel::Error)?
			.commit_from_file(path)?;

		let input_name = session
			.inputs()
			.first()
			.map_or_else(|| "input".to_string(), |input| input.name().to_string());
		let output_name = session
			.outputs()
			.first()
			.map_or_else(|| "output".to_string(), |output| output.name().to_string());

		tracing::debug!("Loaded model with input '{input_name}' and output '{output_name}'");

		Ok(Self {
			session: Mutex::new(session),
			input_name,
			output_name,
		})
	}
}

impl Classifier for OnnxClassifier {
	fn scores(&self, batch: &Array4<f32>) -> Result<Vec<f32>> {
		let dims: Vec<i64> = batch.shape().iter().map(|&dim| dim as i64).collect();
		let data = batch
			.as_slice()
			.context("input batch is not contiguous in memory")?;
		let tensor = TensorRef::from_array_view((dims, data))?;

		let mut session = self
			.session
			.lock()
			.map_err(|_| anyhow::anyhow!("classifier session lock poisoned"))?;

		let inputs: SessionInputs<'_, '_, 0> =
			SessionInputs::ValueMap(vec![(Cow::Borrowed(self.input_name.as_str()), tensor.into())]);
		let outputs = session.run(inputs)?;

		let (_, scores) = outputs[self.output_name.as_str()].try_extract_tensor::<f32>()?;

		// Flattened; with a batch of one this is exactly the class-score vector.
		Ok(scores.to_vec())
	}
}

/// Index of the largest score. The scan uses a strict comparison so the
/// lowest index wins on an exact tie, keeping predictions deterministic.
#[must_use]
pub fn argmax(scores: &[f32]) -> Option<usize> {
	let mut best: Option<usize> = None;
	for (index, &score) in scores.iter().enumerate() {
		if best.map_or(true, |top| score > scores[top]) {
			best = Some(index);
		}
	}

	best
}
