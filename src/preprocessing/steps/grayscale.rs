use crate::error::CaptchaError;
use image::DynamicImage;

/// Convert the captcha screenshot to single-channel grayscale.
/// The model was trained on luma-only input, so this always runs first.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, CaptchaError> {
    Ok(DynamicImage::ImageLuma8(image.to_luma8()))
}
