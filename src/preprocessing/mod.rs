//! Captcha image preprocessing.
//!
//! Normalizes a raw captcha screenshot into the fixed-shape tensor the
//! recognition model was trained on.

pub mod pipeline;
pub mod steps;

pub use pipeline::{Pipeline, PreprocessedCaptcha, StepTiming};

/// Canonical model input width in pixels.
pub const MODEL_INPUT_WIDTH: u32 = 204;
/// Canonical model input height in pixels.
pub const MODEL_INPUT_HEIGHT: u32 = 53;

/// Normalized model input: shape (1, 53, 204, 1), values in [0.0, 1.0].
pub type InputTensor = rten_tensor::NdTensor<f32, 4>;
