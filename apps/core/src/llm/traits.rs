use crate::error::AppError;
use async_trait::async_trait;

/// Defines the public interface for the external text-generation service.
///
/// Every call is fallible and may return text of any shape, so callers must
/// handle both the error case and malformed output. Implementations hold no
/// per-request state and are shared between concurrent callers.
#[async_trait]
pub trait GenerativeModel: Send + Sync + 'static {
    /// Sends one prompt and returns the raw generated text.
    async fn generate(&self, prompt: String) -> Result<String, AppError>;
}
