//! Minimal blocking client for the Gemini `generateContent` API with
//! JSON-schema constrained output

use super::AiError;
use serde::Deserialize;
use serde_json::{json, Value};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

pub struct GeminiClient {
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        GeminiClient {
            api_key,
            model,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Send a prompt expecting a JSON response constrained by `schema`
    /// (OpenAPI subset, see the Gemini structured-output docs) and return
    /// the raw JSON text of the first non-empty candidate.
    pub fn generate_json(
        &self,
        prompt: &str,
        schema: Value,
        temperature: Option<f64>,
    ) -> Result<String, AiError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
        if let Some(t) = temperature {
            generation_config["temperature"] = json!(t);
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        log::info!("calling Gemini model {}", self.model);
        let response = ureq::post(&url)
            .set("x-goog-api-key", &self.api_key)
            .send_json(body)?;

        let response: GenerateContentResponse = response.into_json()?;
        first_candidate_text(response)
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

fn first_candidate_text(response: GenerateContentResponse) -> Result<String, AiError> {
    response
        .candidates
        .into_iter()
        .filter_map(|c| c.content)
        .flat_map(|c| c.parts)
        .map(|p| p.text)
        .find(|t| !t.is_empty())
        .ok_or(AiError::EmptyResponse)
}
