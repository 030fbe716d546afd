//! rten backend
//!
//! Pure Rust inference using the rten runtime. The weights artifact is a
//! `.rten` file converted offline from the trained network; its internal
//! format is opaque here.

use super::{CaptchaModel, ModelSpec};
use crate::decoder::ClassProbabilityMatrix;
use crate::error::CaptchaError;
use crate::preprocessing::InputTensor;
use rten::Model;
use std::path::Path;

/// Captcha model backed by an rten graph loaded from disk.
pub struct RtenCaptchaModel {
    model: Model,
    spec: ModelSpec,
}

impl RtenCaptchaModel {
    /// Load the weights artifact and validate it against the model contract.
    pub fn load(path: &Path, spec: ModelSpec) -> Result<Self, CaptchaError> {
        if !path.exists() {
            return Err(CaptchaError::ModelUnavailable(format!(
                "weights artifact not found at {}",
                path.display()
            )));
        }

        tracing::info!(
            artifact = %path.display(),
            version = spec.version,
            "Loading captcha model"
        );
        tracing::debug!(operators = ?spec.required_operators, "Required operators");

        let model = Model::load_file(path).map_err(|e| {
            CaptchaError::ModelUnavailable(format!("Failed to load weights artifact: {e}"))
        })?;

        if model.input_ids().len() != 1 {
            return Err(CaptchaError::ModelUnavailable(format!(
                "artifact is not a {} model: expected 1 input, found {}",
                spec.version,
                model.input_ids().len()
            )));
        }
        if model.output_ids().is_empty() {
            return Err(CaptchaError::ModelUnavailable(format!(
                "artifact is not a {} model: no outputs",
                spec.version
            )));
        }

        tracing::info!("Captcha model loaded");

        Ok(Self { model, spec })
    }

    /// Spec the artifact was validated against.
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }
}

impl CaptchaModel for RtenCaptchaModel {
    fn name(&self) -> &'static str {
        "rten"
    }

    fn predict(&self, input: InputTensor) -> Result<ClassProbabilityMatrix, CaptchaError> {
        let output = self
            .model
            .run_one(input.into(), None)
            .map_err(|e| CaptchaError::Inference(format!("forward pass failed: {e}")))?;

        let probs: ClassProbabilityMatrix = output.try_into().map_err(|_| {
            CaptchaError::Inference("model output was not a rank-3 float tensor".to_string())
        })?;

        Ok(probs)
    }
}
