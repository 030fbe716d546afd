//! Captcha model backends
//!
//! The recognition network is a pretrained external artifact; this module
//! treats it as a black-box function from input tensor to class probability
//! matrix. Backends are conditionally compiled based on feature flags and
//! injected into the solver explicitly, so tests can substitute a stub.

#[cfg(feature = "backend-rten")]
pub mod rten;

use crate::config::Config;
use crate::decoder::ClassProbabilityMatrix;
use crate::error::CaptchaError;
use crate::preprocessing::{InputTensor, MODEL_INPUT_HEIGHT, MODEL_INPUT_WIDTH};
use std::sync::Arc;

/// Explicit, versioned model-loading configuration.
///
/// Enumerates the operators the weights artifact relies on and the tensor
/// contract it was trained with, instead of relying on ambient custom-layer
/// registration at load time.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    /// Artifact version this configuration describes.
    pub version: &'static str,
    /// Expected input height in pixels.
    pub input_height: usize,
    /// Expected input width in pixels.
    pub input_width: usize,
    /// Output classes per timestep (alphabet symbols + blank).
    pub class_count: usize,
    /// Operators the network requires from the inference runtime.
    pub required_operators: &'static [&'static str],
}

impl ModelSpec {
    /// Contract for the v1 RUNT captcha network: a small convolutional
    /// feature extractor feeding a bidirectional LSTM with a softmax head.
    pub fn runt_v1() -> Self {
        Self {
            version: "runt-v1",
            input_height: MODEL_INPUT_HEIGHT as usize,
            input_width: MODEL_INPUT_WIDTH as usize,
            class_count: crate::alphabet::Alphabet.class_count(),
            required_operators: &[
                "Conv", "MaxPool", "Reshape", "MatMul", "Add", "Relu", "LSTM", "Softmax",
            ],
        }
    }
}

/// Trait that all captcha model backends must implement
pub trait CaptchaModel: Send + Sync {
    /// Returns the backend identifier (e.g., "rten")
    fn name(&self) -> &'static str;

    /// Run a forward pass: input tensor of shape (1, 53, 204, 1) to class
    /// probability matrix of shape (1, T, 24).
    fn predict(&self, input: InputTensor) -> Result<ClassProbabilityMatrix, CaptchaError>;
}

/// Load the configured inference backend.
///
/// The weights artifact is loaded once at startup and shared read-only for
/// the lifetime of the run. A missing or incompatible artifact is fatal.
pub fn load_model(config: &Config) -> Result<Arc<dyn CaptchaModel>, CaptchaError> {
    #[cfg(feature = "backend-rten")]
    {
        tracing::info!("Initializing rten backend...");
        let model = rten::RtenCaptchaModel::load(&config.model_path, ModelSpec::runt_v1())?;
        Ok(Arc::new(model))
    }

    #[cfg(not(feature = "backend-rten"))]
    {
        let _ = config;
        Err(CaptchaError::ModelUnavailable(
            "No inference backend available. Build with --features backend-rten".to_string(),
        ))
    }
}
