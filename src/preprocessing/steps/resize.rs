use crate::error::CaptchaError;
use crate::preprocessing::{MODEL_INPUT_HEIGHT, MODEL_INPUT_WIDTH};
use image::{imageops::FilterType, DynamicImage, GenericImageView};

/// Resize the captcha to the exact canonical model input size (204x53).
///
/// The source aspect ratio is ignored: the model was trained on images
/// squashed to this size, so any distortion from a non-uniform resize is
/// part of the training/inference contract. Bilinear interpolation, never
/// cropping.
pub fn apply(image: DynamicImage) -> Result<DynamicImage, CaptchaError> {
    let (width, height) = image.dimensions();
    if width == MODEL_INPUT_WIDTH && height == MODEL_INPUT_HEIGHT {
        return Ok(image);
    }

    Ok(image.resize_exact(MODEL_INPUT_WIDTH, MODEL_INPUT_HEIGHT, FilterType::Triangle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GrayImage;

    #[test]
    fn test_resize_ignores_aspect_ratio() {
        let img = GrayImage::new(400, 400);
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(result.width(), MODEL_INPUT_WIDTH);
        assert_eq!(result.height(), MODEL_INPUT_HEIGHT);
    }

    #[test]
    fn test_resize_upscales_small_image() {
        let img = GrayImage::new(50, 20);
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(result.width(), MODEL_INPUT_WIDTH);
        assert_eq!(result.height(), MODEL_INPUT_HEIGHT);
    }

    #[test]
    fn test_resize_skips_canonical_size() {
        let img = GrayImage::new(MODEL_INPUT_WIDTH, MODEL_INPUT_HEIGHT);
        let result = apply(DynamicImage::ImageLuma8(img)).unwrap();
        assert_eq!(result.width(), MODEL_INPUT_WIDTH);
        assert_eq!(result.height(), MODEL_INPUT_HEIGHT);
    }
}
