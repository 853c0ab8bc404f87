//! Access to the external generative model.
//!
//! - `traits`: the `GenerativeModel` seam every engine component depends on
//! - `gemini`: the production client for the Gemini REST API

pub mod gemini;
pub mod traits;

pub use gemini::GeminiClient;
pub use traits::GenerativeModel;
