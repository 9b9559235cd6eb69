//! Per-request transformation: upload bytes to species label.
//!
//! The pipeline is synchronous and stateless across calls; the only shared
//! input is the read-only classifier handle.

use image::imageops::FilterType;
use ndarray::Array4;

use crate::{
	classifier::{argmax, Classifier},
	errors::Error,
	labels,
};

/// Input tensor height the model expects.
pub const INPUT_HEIGHT: usize = 150;
/// Input tensor width the model expects.
pub const INPUT_WIDTH: usize = 150;
/// Color channels the model expects.
pub const CHANNELS: usize = 3;

/// Scale a raw channel value into the `[0, 1]` range. This exact linear map
/// is part of the contract with the trained artifact, not a free choice.
#[must_use]
pub fn normalize(value: u8) -> f32 {
	f32::from(value) / 255.0
}

/// Stretch-resize a decoded image to the model's input shape and lay it out
/// as a normalized `(1, 150, 150, 3)` batch. Aspect ratio is deliberately
/// discarded; nearest-neighbour interpolation matches the preprocessing the
/// artifact was trained with.
#[must_use]
pub fn image_to_batch(image: &image::DynamicImage) -> Array4<f32> {
	let resized = image
		.resize_exact(INPUT_WIDTH as u32, INPUT_HEIGHT as u32, FilterType::Nearest)
		.to_rgb8();

	let mut batch = Array4::zeros((1, INPUT_HEIGHT, INPUT_WIDTH, CHANNELS));
	for (x, y, pixel) in resized.enumerate_pixels() {
		for (channel, &value) in pixel.0.iter().enumerate() {
			batch[[0, y as usize, x as usize, channel]] = normalize(value);
		}
	}

	batch
}

/// Decode, preprocess and classify an uploaded image, resolving the winning
/// class index to a species name.
///
/// A score vector that doesn't line up with the label table (a mismatched
/// artifact, or no scores at all) degrades to the sentinel label instead of
/// failing.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a decodable image, or
/// [`Error::Inference`] if the forward pass fails.
pub fn classify(classifier: &dyn Classifier, bytes: &[u8]) -> Result<&'static str, Error> {
	let image = image::load_from_memory(bytes).map_err(Error::Decode)?;
	let batch = image_to_batch(&image);

	let scores = classifier
		.scores(&batch)
		.map_err(|error| Error::Inference(error.into()))?;

	Ok(argmax(&scores).map_or(labels::UNKNOWN_SPECIES, labels::label_for))
}
