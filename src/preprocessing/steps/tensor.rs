use crate::error::CaptchaError;
use crate::preprocessing::{InputTensor, MODEL_INPUT_HEIGHT, MODEL_INPUT_WIDTH};
use image::DynamicImage;

/// Convert a grayscale, canonically-sized image into the model input tensor.
///
/// Intensities are rescaled from [0, 255] to [0.0, 1.0], and singleton
/// channel and batch dimensions are added, yielding shape (1, 53, 204, 1).
pub fn apply(image: &DynamicImage) -> Result<InputTensor, CaptchaError> {
    let gray = image.to_luma8();
    let (width, height) = gray.dimensions();
    if width != MODEL_INPUT_WIDTH || height != MODEL_INPUT_HEIGHT {
        return Err(CaptchaError::Internal(format!(
            "tensor step expects a {}x{} image, got {}x{}",
            MODEL_INPUT_WIDTH, MODEL_INPUT_HEIGHT, width, height
        )));
    }

    // GrayImage raw buffer is row-major, which matches the (batch, height,
    // width, channel) layout once the singleton dimensions are added.
    let data: Vec<f32> = gray.as_raw().iter().map(|&p| p as f32 / 255.0).collect();

    Ok(InputTensor::from_data(
        [1, MODEL_INPUT_HEIGHT as usize, MODEL_INPUT_WIDTH as usize, 1],
        data,
    ))
}
