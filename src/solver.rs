//! Captcha solving façade.
//!
//! Ties the preprocessing pipeline, the injected model backend, and the CTC
//! decoder into one call per captcha attempt. Attempts are independent:
//! nothing here carries state from one solve to the next, and the model is
//! shared read-only.

use crate::alphabet::{Alphabet, CAPTCHA_LENGTH};
use crate::decoder::CtcDecoder;
use crate::error::CaptchaError;
use crate::model::CaptchaModel;
use crate::preprocessing::{Pipeline, StepTiming};
use image::DynamicImage;
use rten_tensor::prelude::*;
use std::path::Path;
use std::sync::Arc;

/// Outcome of one captcha solve attempt
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// Decoded text, at most 5 characters.
    pub text: String,
    /// Advisory notes, e.g. a decode shorter than the expected length.
    pub warnings: Vec<String>,
    /// Preprocessing step timings.
    pub preprocessing: Vec<StepTiming>,
}

impl SolveResult {
    /// True if the decode produced the full expected length.
    pub fn is_complete(&self) -> bool {
        self.text.chars().count() == CAPTCHA_LENGTH
    }

    /// Strict accessor: turns a short decode from an advisory into an error,
    /// for callers that want to fail the attempt instead of submitting a
    /// partial answer.
    pub fn ensure_complete(&self) -> Result<&str, CaptchaError> {
        if self.is_complete() {
            Ok(&self.text)
        } else {
            Err(CaptchaError::DecodeLengthMismatch {
                got: self.text.chars().count(),
                expected: CAPTCHA_LENGTH,
            })
        }
    }
}

/// One-shot captcha solver: screenshot in, decoded text out.
pub struct CaptchaSolver {
    model: Arc<dyn CaptchaModel>,
    pipeline: Pipeline,
    decoder: CtcDecoder,
}

impl CaptchaSolver {
    /// Build a solver around a loaded model backend.
    pub fn new(model: Arc<dyn CaptchaModel>) -> Self {
        Self {
            model,
            pipeline: Pipeline::new(),
            decoder: CtcDecoder::new(Alphabet),
        }
    }

    /// Backend identifier of the injected model.
    pub fn model_name(&self) -> &'static str {
        self.model.name()
    }

    /// Solve a captcha screenshot on disk.
    ///
    /// An unreadable or corrupt file fails the attempt; the caller retries
    /// with a fresh screenshot rather than proceeding with a bad tensor.
    pub fn solve_path(&self, path: &Path) -> Result<SolveResult, CaptchaError> {
        let image = image::open(path)
            .map_err(|e| CaptchaError::ImageLoad(format!("{}: {e}", path.display())))?;
        self.solve_image(image)
    }

    /// Solve an already-decoded captcha image.
    pub fn solve_image(&self, image: DynamicImage) -> Result<SolveResult, CaptchaError> {
        let preprocessed = self.pipeline.process(image)?;
        let probs = self.model.predict(preprocessed.tensor)?;
        let text = self.decoder.decode(probs.view())?;

        let mut warnings = Vec::new();
        let decoded_len = text.chars().count();
        if decoded_len < CAPTCHA_LENGTH {
            tracing::debug!(decoded_len, "Short captcha decode");
            warnings.push(format!(
                "decoded {decoded_len} of {CAPTCHA_LENGTH} expected characters; retry with a fresh captcha"
            ));
        }

        Ok(SolveResult {
            text,
            warnings,
            preprocessing: preprocessed.steps,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::ClassProbabilityMatrix;
    use crate::preprocessing::InputTensor;
    use image::{DynamicImage, GrayImage};

    /// Stub backend that replays a fixed class-id sequence regardless of the
    /// input pixels.
    struct StubModel {
        ids: Vec<usize>,
    }

    impl CaptchaModel for StubModel {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn predict(&self, input: InputTensor) -> Result<ClassProbabilityMatrix, CaptchaError> {
            assert_eq!(input.shape(), [1, 53, 204, 1]);
            let classes = Alphabet.class_count();
            let mut data = vec![0.01f32; self.ids.len() * classes];
            for (t, &id) in self.ids.iter().enumerate() {
                data[t * classes + id] = 0.9;
            }
            Ok(ClassProbabilityMatrix::from_data(
                [1, self.ids.len(), classes],
                data,
            ))
        }
    }

    fn solver_for_ids(ids: &[usize]) -> CaptchaSolver {
        CaptchaSolver::new(Arc::new(StubModel { ids: ids.to_vec() }))
    }

    fn blank() -> usize {
        Alphabet.blank_id()
    }

    #[test]
    fn test_solve_image_full_length() {
        // ids 7, 8, 9, 10, 11 -> "abcde"
        let b = blank();
        let solver = solver_for_ids(&[7, 7, b, 8, b, 9, 9, b, 10, b, 11]);
        let result = solver
            .solve_image(DynamicImage::ImageLuma8(GrayImage::new(300, 77)))
            .unwrap();
        assert_eq!(result.text, "abcde");
        assert!(result.is_complete());
        assert!(result.warnings.is_empty());
        assert_eq!(result.ensure_complete().unwrap(), "abcde");
    }

    #[test]
    fn test_short_decode_warns_but_succeeds() {
        let b = blank();
        let solver = solver_for_ids(&[7, b, 8, b]);
        let result = solver
            .solve_image(DynamicImage::ImageLuma8(GrayImage::new(204, 53)))
            .unwrap();
        assert_eq!(result.text, "ab");
        assert!(!result.is_complete());
        assert_eq!(result.warnings.len(), 1);
        assert!(matches!(
            result.ensure_complete(),
            Err(CaptchaError::DecodeLengthMismatch { got: 2, expected: 5 })
        ));
    }

    #[test]
    fn test_solve_path_missing_file_is_image_load_error() {
        let solver = solver_for_ids(&[]);
        let result = solver.solve_path(Path::new("/nonexistent/captcha.png"));
        assert!(matches!(result, Err(CaptchaError::ImageLoad(_))));
    }

    #[test]
    fn test_solve_path_corrupt_file_is_image_load_error() {
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        use std::io::Write;
        file.write_all(b"not a png at all").unwrap();

        let solver = solver_for_ids(&[]);
        let result = solver.solve_path(file.path());
        assert!(matches!(result, Err(CaptchaError::ImageLoad(_))));
    }
}
