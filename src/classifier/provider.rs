//! Remote choice provider — the only component that reaches outside the
//! process boundary.
//!
//! One request/response shape: a context prompt goes out, a chosen id comes
//! back. Bounded timeout, bearer auth, no retries — an abandoned call is
//! cheaper than a conversation that looks stalled.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::ClassifierConfig;
use crate::error::ClassifyError;

/// Response-token budget — the expected reply is a single id.
const MAX_RESPONSE_TOKENS: u32 = 50;

/// A model that picks one candidate id given a prompt.
///
/// Implementations must resolve within the given timeout and must never
/// retry; the classifier converts every failure into a local fallback.
#[async_trait]
pub trait ChoiceModel: Send + Sync {
    fn model_name(&self) -> &str;

    /// Ask the model to choose. The returned string is the raw model output;
    /// candidate-set validation happens in the classifier.
    async fn choose(
        &self,
        system_prompt: &str,
        context_prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<String, ClassifyError>;
}

/// OpenAI chat-completions backend over plain HTTPS JSON.
pub struct OpenAiChoiceModel {
    http: reqwest::Client,
    api_key: SecretString,
    model: String,
    base_url: String,
}

impl OpenAiChoiceModel {
    /// Build from config. Returns `None` when no credential is configured,
    /// so callers skip the remote path entirely instead of attempting a
    /// doomed network call.
    pub fn from_config(config: &ClassifierConfig) -> Option<Self> {
        let api_key = config.api_key.clone()?;
        Some(Self {
            http: reqwest::Client::new(),
            api_key,
            model: config.model.clone(),
            base_url: config.base_url.clone(),
        })
    }

    fn request_body(&self, system_prompt: &str, context_prompt: &str, temperature: f32) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatRequestMessage {
                    role: "system",
                    content: system_prompt.to_string(),
                },
                ChatRequestMessage {
                    role: "user",
                    content: context_prompt.to_string(),
                },
            ],
            max_tokens: MAX_RESPONSE_TOKENS,
            temperature,
        }
    }
}

#[async_trait]
impl ChoiceModel for OpenAiChoiceModel {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn choose(
        &self,
        system_prompt: &str,
        context_prompt: &str,
        temperature: f32,
        timeout: Duration,
    ) -> Result<String, ClassifyError> {
        let body = self.request_body(system_prompt, context_prompt, temperature);

        let response = self
            .http
            .post(&self.base_url)
            .bearer_auth(self.api_key.expose_secret())
            .timeout(timeout)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifyError::Timeout { timeout }
                } else {
                    ClassifyError::RequestFailed {
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                ClassifyError::Timeout { timeout }
            } else {
                ClassifyError::MalformedResponse {
                    reason: e.to_string(),
                }
            }
        })?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| ClassifyError::MalformedResponse {
                reason: "response contained no choices".to_string(),
            })?;

        Ok(content.trim().to_string())
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatRequestMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatResponseChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_credential_means_no_provider() {
        let config = ClassifierConfig::default();
        assert!(OpenAiChoiceModel::from_config(&config).is_none());
    }

    #[test]
    fn request_body_shape() {
        let config = ClassifierConfig {
            api_key: Some(SecretString::from("sk-test")),
            ..ClassifierConfig::default()
        };
        let provider = OpenAiChoiceModel::from_config(&config).unwrap();
        let body = provider.request_body("system text", "user text", 0.3);
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["max_tokens"], 50);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], "system text");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "user text");
    }

    #[test]
    fn response_parsing() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":" PathC_Choice "}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.choices[0].message.content.trim(), "PathC_Choice");
    }
}
