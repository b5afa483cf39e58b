use async_trait::async_trait;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::completion_provider::{
    CompletionProvider, CompletionProviderError, CompletionRequest, ResponseFormat,
};
use crate::infrastructure::config::AppConfig;

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<WireResponseFormat>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct WireResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CompletionClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Extra attempts after the first for transient failures.
    pub max_retries: u32,
    pub retry_delay_ms: u64,
}

impl From<&AppConfig> for CompletionClientConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            api_key: config.openai_api_key.clone(),
            base_url: config.openai_base_url.clone(),
            model: config.openai_model.clone(),
            timeout_secs: config.gateway_timeout_secs,
            max_retries: 1,
            retry_delay_ms: 1000,
        }
    }
}

impl Default for CompletionClientConfig {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

enum AttemptError {
    Transient(CompletionProviderError),
    Fatal(CompletionProviderError),
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompletionClient {
    client: Client,
    config: CompletionClientConfig,
}

impl OpenAiCompletionClient {
    pub fn new(config: CompletionClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_body<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(WireMessage {
            role: "system",
            content: &request.system_prompt,
        });
        messages.extend(request.history.iter().map(|turn| WireMessage {
            role: turn.role.as_str(),
            content: &turn.content,
        }));
        messages.push(WireMessage {
            role: "user",
            content: &request.user_prompt,
        });

        let response_format = match request.response_format {
            ResponseFormat::JsonObject => Some(WireResponseFormat {
                kind: "json_object",
            }),
            ResponseFormat::Text => None,
        };

        ChatCompletionRequest {
            model: &self.config.model,
            messages,
            response_format,
        }
    }

    async fn send_request(
        &self,
        api_key: &str,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<String, CompletionProviderError> {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match self.execute_request(api_key, body).await {
                Ok(text) => return Ok(text),
                Err(AttemptError::Fatal(e)) => return Err(e),
                Err(AttemptError::Transient(e)) => {
                    if attempts > self.config.max_retries {
                        return Err(e);
                    }

                    tracing::warn!(
                        "Completion request failed ({}), retrying in {}ms",
                        e,
                        self.config.retry_delay_ms
                    );
                    tokio::time::sleep(Duration::from_millis(self.config.retry_delay_ms)).await;
                }
            }
        }
    }

    async fn execute_request(
        &self,
        api_key: &str,
        body: &ChatCompletionRequest<'_>,
    ) -> Result<String, AttemptError> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let transient = e.is_timeout() || e.is_connect();
                let error = CompletionProviderError::NetworkError(e.without_url().to_string());
                if transient {
                    AttemptError::Transient(error)
                } else {
                    AttemptError::Fatal(error)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let error = CompletionProviderError::ApiError(format!(
                "status {}: {}",
                status,
                truncate_detail(&detail)
            ));
            return if is_retryable_status(status) {
                Err(AttemptError::Transient(error))
            } else {
                Err(AttemptError::Fatal(error))
            };
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            AttemptError::Fatal(CompletionProviderError::ApiError(format!(
                "Invalid completion response: {}",
                e
            )))
        })?;

        extract_reply(parsed).map_err(AttemptError::Fatal)
    }
}

fn is_retryable_status(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

fn truncate_detail(detail: &str) -> String {
    detail.chars().take(300).collect()
}

fn extract_reply(response: ChatCompletionResponse) -> Result<String, CompletionProviderError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionProviderError::ApiError("No choices returned".to_string()))
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionProviderError> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(CompletionProviderError::NotConfigured);
        };

        let body = self.build_body(&request);
        self.send_request(api_key, &body).await
    }

    fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
