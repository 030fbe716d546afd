use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptchaError {
    #[error("Failed to load captcha image: {0}")]
    ImageLoad(String),

    #[error("Captcha model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Decoded {got} characters, expected {expected}")]
    DecodeLengthMismatch { got: usize, expected: usize },

    #[error("Image too large: {size} bytes (max: {max} bytes)")]
    ImageTooLarge { size: usize, max: usize },

    #[error("Missing file in request")]
    MissingFile,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl IntoResponse for CaptchaError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            CaptchaError::ImageLoad(_) => (StatusCode::UNPROCESSABLE_ENTITY, "IMAGE_LOAD_ERROR"),
            CaptchaError::ModelUnavailable(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "MODEL_UNAVAILABLE")
            }
            CaptchaError::Inference(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INFERENCE_ERROR"),
            CaptchaError::DecodeLengthMismatch { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DECODE_LENGTH_MISMATCH")
            }
            CaptchaError::ImageTooLarge { .. } => {
                (StatusCode::PAYLOAD_TOO_LARGE, "IMAGE_TOO_LARGE")
            }
            CaptchaError::MissingFile => (StatusCode::BAD_REQUEST, "MISSING_FILE"),
            CaptchaError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST"),
            CaptchaError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
        });

        (status, body).into_response()
    }
}
