use crate::error::CaptchaError;
use image::DynamicImage;
use serde::Serialize;
use std::time::Instant;

use super::steps;
use super::InputTensor;

/// Timing information for a single preprocessing step
#[derive(Debug, Clone, Serialize)]
pub struct StepTiming {
    pub name: String,
    pub time_ms: u64,
}

/// Result of preprocessing including timing stats
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessedCaptcha {
    /// Model input tensor, shape (1, 53, 204, 1) (not serialized)
    #[serde(skip)]
    pub tensor: InputTensor,
    /// Total preprocessing time in milliseconds
    pub total_time_ms: u64,
    /// Individual step timings
    pub steps: Vec<StepTiming>,
}

/// Preprocessing pipeline: grayscale, resize to 204x53, rescale to [0, 1].
///
/// The step sequence is fixed by the model's training contract.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Pipeline {
    pub fn new() -> Self {
        Self
    }

    /// Normalize a captcha screenshot into a model input tensor.
    pub fn process(&self, image: DynamicImage) -> Result<PreprocessedCaptcha, CaptchaError> {
        let start = Instant::now();
        let mut steps_timing = Vec::new();

        let mut img = image;
        img = self.run_step("grayscale", img, &mut steps_timing, steps::grayscale::apply)?;
        img = self.run_step("resize", img, &mut steps_timing, steps::resize::apply)?;

        let tensor_start = Instant::now();
        let tensor = steps::tensor::apply(&img)?;
        steps_timing.push(StepTiming {
            name: "tensor".to_string(),
            time_ms: tensor_start.elapsed().as_millis() as u64,
        });

        Ok(PreprocessedCaptcha {
            tensor,
            total_time_ms: start.elapsed().as_millis() as u64,
            steps: steps_timing,
        })
    }

    fn run_step<F>(
        &self,
        name: &str,
        img: DynamicImage,
        timings: &mut Vec<StepTiming>,
        step_fn: F,
    ) -> Result<DynamicImage, CaptchaError>
    where
        F: FnOnce(DynamicImage) -> Result<DynamicImage, CaptchaError>,
    {
        let step_start = Instant::now();
        let result = step_fn(img)?;
        timings.push(StepTiming {
            name: name.to_string(),
            time_ms: step_start.elapsed().as_millis() as u64,
        });
        Ok(result)
    }
}
