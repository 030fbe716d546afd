//! Individual preprocessing steps

pub mod grayscale;
pub mod resize;
pub mod tensor;
