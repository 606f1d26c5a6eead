//! Gemini provider using the generateContent API.
//!
//! Model tags are translated to canonical Gemini model identifiers through a
//! static lookup table; unrecognized tags fall back to the default model.
//! Generation parameters and safety thresholds are fixed constants, not
//! user-configurable.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

use super::{Provider, ProviderError};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

const GENERATION_TEMPERATURE: f64 = 0.7;
const GENERATION_TOP_K: u32 = 40;
const GENERATION_TOP_P: f64 = 0.95;
const GENERATION_MAX_OUTPUT_TOKENS: u32 = 2048;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];
const SAFETY_THRESHOLD: &str = "BLOCK_MEDIUM_AND_ABOVE";

/// Returned instead of failing the exchange when the API answers without
/// usable text (e.g. a safety-filtered candidate).
const EMPTY_RESPONSE_FALLBACK: &str =
    "Sorry, I could not generate a response. Please try again.";

/// Translate a caller-facing model tag to a canonical Gemini identifier.
fn canonical_model(tag: &str) -> &'static str {
    match tag {
        "gemini-1.5-flash-latest" => "gemini-2.5-flash",
        "gemini-1.5-pro-latest" => "gemini-2.5-pro",
        "gemini-pro-latest" => "gemini-pro-latest",
        _ => DEFAULT_MODEL,
    }
}

pub struct GeminiProvider {
    client: HttpClient,
    api_key: String,
    base_url: String,
}

impl GeminiProvider {
    pub fn new(api_key: String) -> Self {
        Self {
            client: HttpClient::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    fn build_request(prompt: &str) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: GENERATION_TEMPERATURE,
                top_k: GENERATION_TOP_K,
                top_p: GENERATION_TOP_P,
                max_output_tokens: GENERATION_MAX_OUTPUT_TOKENS,
            },
            safety_settings: SAFETY_CATEGORIES
                .iter()
                .map(|category| SafetySetting {
                    category: category.to_string(),
                    threshold: SAFETY_THRESHOLD.to_string(),
                })
                .collect(),
        }
    }

    /// Extract the first candidate's first text part.
    fn extract_text(response: GenerateContentResponse) -> Option<String> {
        response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .filter(|text| !text.is_empty())
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    async fn generate(&self, prompt: &str, model_tag: &str) -> Result<String, ProviderError> {
        let model = canonical_model(model_tag);
        info!("Calling Gemini API with model: {}", model);

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .json(&Self::build_request(prompt))
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!("Gemini API error: {} - {}", status, body);
            return Err(ProviderError::Api { status, body });
        }

        let api_response: GenerateContentResponse = response.json().await?;

        match Self::extract_text(api_response) {
            Some(text) => Ok(text),
            None => {
                error!("No text in Gemini response, returning fallback reply");
                Ok(EMPTY_RESPONSE_FALLBACK.to_string())
            }
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// API Types
// ============================================================================

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
    #[serde(rename = "safetySettings")]
    safety_settings: Vec<SafetySetting>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "topK")]
    top_k: u32,
    #[serde(rename = "topP")]
    top_p: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Serialize)]
struct SafetySetting {
    category: String,
    threshold: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_model_mapping() {
        assert_eq!(canonical_model("gemini-1.5-flash-latest"), "gemini-2.5-flash");
        assert_eq!(canonical_model("gemini-1.5-pro-latest"), "gemini-2.5-pro");
        assert_eq!(canonical_model("gemini-pro-latest"), "gemini-pro-latest");
    }

    #[test]
    fn test_unrecognized_tag_falls_back_to_default() {
        assert_eq!(canonical_model("gpt-4o"), DEFAULT_MODEL);
        assert_eq!(canonical_model(""), DEFAULT_MODEL);
    }

    #[test]
    fn test_request_body_shape() {
        let request = GeminiProvider::build_request("hello");
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["temperature"], 0.7);
        assert_eq!(value["generationConfig"]["topK"], 40);
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(value["safetySettings"].as_array().unwrap().len(), 4);
        assert_eq!(
            value["safetySettings"][0]["threshold"],
            "BLOCK_MEDIUM_AND_ABOVE"
        );
    }

    #[test]
    fn test_extract_text_from_first_candidate() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [
                { "content": { "parts": [{ "text": "first" }, { "text": "second" }] } },
                { "content": { "parts": [{ "text": "other candidate" }] } }
            ]
        }))
        .unwrap();

        assert_eq!(GeminiProvider::extract_text(response).as_deref(), Some("first"));
    }

    #[test]
    fn test_extract_text_handles_blocked_response() {
        // Safety-filtered candidates come back without parts
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert!(GeminiProvider::extract_text(response).is_none());

        let empty: GenerateContentResponse = serde_json::from_value(json!({})).unwrap();
        assert!(GeminiProvider::extract_text(empty).is_none());
    }
}
