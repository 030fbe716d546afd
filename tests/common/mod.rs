//! Shared test helpers: a stub model backend and synthetic captcha images.

use image::{DynamicImage, GrayImage, Luma};
use runt_captcha::decoder::ClassProbabilityMatrix;
use runt_captcha::preprocessing::InputTensor;
use runt_captcha::{Alphabet, CaptchaError, CaptchaModel, CaptchaSolver};
use rten_tensor::prelude::*;
use std::io::Cursor;
use std::sync::Arc;

pub const BLANK: usize = 23;

/// Stub backend that replays a fixed class-id sequence as a dominant-class
/// probability matrix, regardless of the input pixels.
pub struct StubModel {
    pub ids: Vec<usize>,
}

impl CaptchaModel for StubModel {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn predict(&self, input: InputTensor) -> Result<ClassProbabilityMatrix, CaptchaError> {
        assert_eq!(input.shape(), [1, 53, 204, 1]);
        assert!(input.iter().all(|&v| (0.0..=1.0).contains(&v)));

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

pub fn solver_for_ids(ids: &[usize]) -> CaptchaSolver {
    CaptchaSolver::new(Arc::new(StubModel { ids: ids.to_vec() }))
}

/// Encode a synthetic grayscale captcha of the given size as PNG bytes.
pub fn captcha_png(width: u32, height: u32) -> Vec<u8> {
    let img = GrayImage::from_fn(width, height, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
    let mut buf = Vec::new();
    DynamicImage::ImageLuma8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .expect("encode test png");
    buf
}
