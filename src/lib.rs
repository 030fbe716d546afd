//! Captcha decoding pipeline for the RUNT vehicle registry portal.
//!
//! The portal guards vehicle lookups with a fixed-length 5-character image
//! captcha. This crate turns a captcha screenshot into that string:
//!
//! ```text
//! screenshot (PNG) -> preprocess -> model forward pass -> greedy CTC decode -> "7wxy2"
//! ```
//!
//! Preprocessing normalizes the screenshot to the tensor shape the network
//! was trained on (1, 53, 204, 1). The network itself is a pretrained
//! artifact loaded once at startup behind the [`model::CaptchaModel`] trait;
//! [`decoder::CtcDecoder`] collapses its per-timestep class probabilities
//! into text. [`solver::CaptchaSolver`] ties the three together, and
//! [`server`] exposes the solver over HTTP for the browser-automation
//! collaborator that captures the screenshot and types the answer back in.

pub mod alphabet;
pub mod config;
pub mod decoder;
pub mod error;
pub mod model;
pub mod preprocessing;
pub mod server;
pub mod solver;

pub use alphabet::{Alphabet, CAPTCHA_LENGTH};
pub use config::Config;
pub use decoder::{ClassProbabilityMatrix, CtcDecoder};
pub use error::CaptchaError;
pub use model::{CaptchaModel, ModelSpec};
pub use preprocessing::{InputTensor, Pipeline};
pub use solver::{CaptchaSolver, SolveResult};
