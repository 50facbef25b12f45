//! OpenAI chat-completions oracle.
//!
//! Makes a single HTTP call to the chat completions API per request. Both
//! the judge and the proposer run over this adapter; they differ only in
//! the prompts and temperature they supply.

use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::domain::models::OracleSettings;
use crate::domain::ports::{ChatOracle, OracleError, OracleRequest};

/// Configuration for the OpenAI oracle.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (read from OPENAI_API_KEY env if not set).
    pub api_key: Option<String>,
    /// API base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://api.openai.com".to_string(),
            model: "gpt-4o".to_string(),
            timeout_secs: 120,
        }
    }
}

impl OpenAiConfig {
    /// Build from the loaded oracle settings.
    pub fn from_settings(settings: &OracleSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            base_url: settings.base_url.clone(),
            model: settings.model.clone(),
            timeout_secs: settings.timeout_secs,
        }
    }

    /// Get API key from config or environment.
    pub fn get_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

/// Message role in the chat completions API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum MessageRole {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: MessageRole,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// OpenAI chat-completions oracle adapter.
pub struct OpenAiOracle {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiOracle {
    /// Create a new oracle adapter.
    pub fn new(config: OpenAiConfig) -> Result<Self, OracleError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| {
                OracleError::NotConfigured(format!("failed to create HTTP client: {err}"))
            })?;

        Ok(Self { config, client })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Result<Self, OracleError> {
        Self::new(OpenAiConfig::default())
    }

    fn build_request(&self, request: &OracleRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: MessageRole::System,
                content: system.clone(),
            });
        }
        messages.push(ChatMessage {
            role: MessageRole::User,
            content: request.user.clone(),
        });

        ChatCompletionRequest {
            model: self.config.model.clone(),
            messages,
            temperature: request.temperature,
        }
    }
}

#[async_trait]
impl ChatOracle for OpenAiOracle {
    fn oracle_id(&self) -> &str {
        "openai"
    }

    async fn complete(&self, request: OracleRequest) -> Result<String, OracleError> {
        let api_key = self
            .config
            .get_api_key()
            .ok_or_else(|| OracleError::Auth("OPENAI_API_KEY not set".to_string()))?;

        let api_request = self.build_request(&request);

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.config.base_url))
            .header(header::CONTENT_TYPE, "application/json")
            .bearer_auth(&api_key)
            .json(&api_request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    OracleError::Timeout(self.config.timeout_secs)
                } else {
                    OracleError::Network(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => OracleError::Auth(body),
                StatusCode::TOO_MANY_REQUESTS => OracleError::RateLimited(body),
                _ => OracleError::Api {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let result: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| OracleError::MalformedResponse(err.to_string()))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(OracleError::EmptyCompletion);
        }
        Ok(content)
    }
}
