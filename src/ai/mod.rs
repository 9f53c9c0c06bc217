pub mod advice;
pub mod extract;
pub mod gemini;

pub use gemini::GeminiClient;

/// Errors from the AI service boundary. The tax engine itself cannot fail;
/// everything here originates in the network round-trip or in a malformed
/// model response.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("Gemini API request failed: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("failed to read Gemini API response: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gemini returned a payload that is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Gemini response contained no text candidates")]
    EmptyResponse,
}

impl From<ureq::Error> for AiError {
    fn from(err: ureq::Error) -> Self {
        AiError::Http(Box::new(err))
    }
}
