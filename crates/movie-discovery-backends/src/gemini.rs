use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::ModelError;
use crate::traits::TextModel;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Client for the Gemini `generateContent` endpoint in structured-output
/// mode: every request carries a response schema and asks for JSON back.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>, model: String) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            model,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

/// Pull the generated JSON payload out of a `generateContent` response:
/// the text of the first candidate's first part, parsed as JSON.
fn extract_payload(response: &Value) -> Result<Value, ModelError> {
    let text = response
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            ModelError::MalformedResponse("response has no candidate text".to_string())
        })?;
    serde_json::from_str(text)
        .map_err(|e| ModelError::MalformedResponse(format!("candidate text is not JSON: {}", e)))
}

#[async_trait]
impl TextModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        response_schema: &Value,
        temperature: Option<f32>,
    ) -> Result<Value, ModelError> {
        let api_key = self.api_key.as_deref().ok_or(ModelError::MissingApiKey)?;

        let mut generation_config = serde_json::json!({
            "responseMimeType": "application/json",
            "responseSchema": response_schema,
        });
        if let Some(temperature) = temperature {
            generation_config["temperature"] = serde_json::json!(temperature);
        }

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        debug!(operation = "generate", model = %self.model, "Requesting structured generation");
        let response = self.client.post(&url).json(&body).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Service { status, message });
        }

        let envelope: Value = response.json().await?;
        extract_payload(&envelope)
    }
}
