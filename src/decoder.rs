//! Greedy CTC decoding of model output.
//!
//! The recognition model emits one probability row per timestep over the
//! 23-symbol vocabulary plus a reserved blank class. Decoding picks the
//! argmax class per timestep, squashes adjacent repeats, drops blanks, and
//! maps what is left through the alphabet. Repeats of a character across
//! adjacent timesteps are the same emission; a genuine double character in
//! the captcha shows up separated by at least one blank.

use crate::alphabet::{Alphabet, CAPTCHA_LENGTH};
use crate::error::CaptchaError;
use rten_tensor::prelude::*;
use rten_tensor::NdTensorView;

/// Model output: shape (1, T, 24), one row of class probabilities per
/// decoding timestep.
pub type ClassProbabilityMatrix = rten_tensor::NdTensor<f32, 3>;

/// Greedy CTC decoder over the captcha alphabet.
///
/// Decoding is a pure function of one probability matrix; there is no
/// cross-call state.
#[derive(Debug, Clone, Copy)]
pub struct CtcDecoder {
    alphabet: Alphabet,
}

impl CtcDecoder {
    pub fn new(alphabet: Alphabet) -> Self {
        Self { alphabet }
    }

    /// Collapse a probability matrix into the decoded captcha text.
    ///
    /// The result is truncated to the first 5 characters. Fewer than 5
    /// characters (including an empty string for an all-blank matrix) is a
    /// data-quality condition for the caller, not an error here. A matrix
    /// whose batch or class dimension does not match the model contract is
    /// an inference error.
    pub fn decode(&self, probs: NdTensorView<f32, 3>) -> Result<String, CaptchaError> {
        let [batch, timesteps, classes] = probs.shape();
        if batch != 1 {
            return Err(CaptchaError::Inference(format!(
                "expected batch dimension 1, got {batch}"
            )));
        }
        if classes != self.alphabet.class_count() {
            return Err(CaptchaError::Inference(format!(
                "expected {} output classes, got {classes}",
                self.alphabet.class_count()
            )));
        }

        let mut raw_ids = Vec::with_capacity(timesteps);
        for t in 0..timesteps {
            let mut best = 0;
            for c in 1..classes {
                if probs[[0, t, c]] > probs[[0, t, best]] {
                    best = c;
                }
            }
            raw_ids.push(best);
        }

        let blank = self.alphabet.blank_id();
        let text: String = collapse_repeats(&raw_ids)
            .into_iter()
            .filter(|&id| id != blank)
            .filter_map(|id| self.alphabet.char_for(id))
            .take(CAPTCHA_LENGTH)
            .collect();

        Ok(text)
    }
}

/// Squash runs of adjacent identical class ids into a single occurrence.
/// Only adjacent duplicates collapse; duplicates separated by a blank (or
/// any other id) survive.
fn collapse_repeats(ids: &[usize]) -> Vec<usize> {
    let mut collapsed = Vec::with_capacity(ids.len());
    let mut prev: Option<usize> = None;
    for &id in ids {
        if prev != Some(id) {
            collapsed.push(id);
        }
        prev = Some(id);
    }
    collapsed
}
