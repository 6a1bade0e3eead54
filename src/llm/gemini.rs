use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::PhishguardError;
use crate::image::InlineImage;

use super::provider::LLMProvider;
use super::types::LLMResponse;

pub struct GeminiProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiProvider {
    pub fn new(api_key: &str, model: Option<&str>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.to_string(),
            model: model.unwrap_or("gemini-2.5-flash").to_string(),
        }
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn analyze(
        &self,
        prompt: &str,
        image: Option<&InlineImage>,
    ) -> Result<LLMResponse, PhishguardError> {
        let mut parts = vec![json!({"text": prompt})];
        if let Some(img) = image {
            parts.push(json!({
                "inlineData": {
                    "mimeType": img.media_type,
                    "data": base64::engine::general_purpose::STANDARD.encode(&img.bytes),
                }
            }));
        }

        let body = json!({
            "contents": [{"role": "user", "parts": parts}],
            "generationConfig": {
                "maxOutputTokens": 2048,
            }
        });

        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );

        let resp = self.client.post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PhishguardError::Network(format!("Gemini request failed: {}", e)))?;

        if resp.status().as_u16() == 429 {
            return Err(PhishguardError::RateLimit("Gemini rate limit".into()));
        }

        let data: Value = resp.json().await
            .map_err(|e| PhishguardError::LLMApi(format!("Parse error: {}", e)))?;

        if let Some(error) = data.get("error") {
            return Err(PhishguardError::LLMApi(
                error["message"].as_str().unwrap_or("Unknown").to_string(),
            ));
        }

        let content = data["candidates"][0]["content"]["parts"][0]["text"]
            .as_str().unwrap_or("").to_string();

        let input_tokens = data["usageMetadata"]["promptTokenCount"].as_u64();
        let output_tokens = data["usageMetadata"]["candidatesTokenCount"].as_u64();

        Ok(LLMResponse {
            content,
            input_tokens,
            output_tokens,
            model: self.model.clone(),
        })
    }

    fn provider_name(&self) -> &str { "gemini" }
    fn model_name(&self) -> &str { &self.model }
}
