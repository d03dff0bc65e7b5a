use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::{
    error::LlmError,
    groq::types::{
        GroqChatCompletionRequest, GroqChatCompletionResponse, GroqErrorResponse, GroqMessage,
        GroqRole,
    },
};

/// Groq LLM client (OpenAI-compatible chat completions)
pub struct GroqClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl GroqClient {
    /// Create a new Groq client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(300)) // 5 minute timeout
            .build()
            .map_err(|e| LlmError::Network { source: e })?;

        Ok(Self {
            api_key,
            base_url: "https://api.groq.com/openai".to_string(),
            model: crate::models::groq::DEFAULT.to_string(),
            http_client,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the default model reported by this client
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Create a chat completion using the Groq Chat Completions API
    pub async fn create_chat_completion(
        &self,
        request: GroqChatCompletionRequest,
    ) -> Result<GroqChatCompletionResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        tracing::debug!(model = %request.model, "sending chat completion request");

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| LlmError::authentication("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        let status = response.status();

        if status.is_success() {
            let groq_response: GroqChatCompletionResponse = response
                .json()
                .await
                .map_err(|e| LlmError::internal(format!("Failed to parse response: {}", e)))?;
            Ok(groq_response)
        } else {
            // Extract retry-after header before consuming the response
            let retry_after = if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                response
                    .headers()
                    .get("retry-after")
                    .and_then(|h| h.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
            } else {
                None
            };

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            // Try to parse as a structured error response
            let message = serde_json::from_str::<GroqErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);

            match status {
                reqwest::StatusCode::BAD_REQUEST => Err(LlmError::invalid_request(message)),
                reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                    Err(LlmError::authentication(message))
                }
                reqwest::StatusCode::NOT_FOUND => Err(LlmError::api_error(404, message)),
                reqwest::StatusCode::PAYLOAD_TOO_LARGE => {
                    Err(LlmError::invalid_request("Request too large"))
                }
                reqwest::StatusCode::TOO_MANY_REQUESTS => {
                    Err(LlmError::rate_limit(message, retry_after))
                }
                _ => Err(LlmError::api_error(status.as_u16(), message)),
            }
        }
    }
}

#[async_trait]
impl crate::client::LlmClient for GroqClient {
    async fn complete(
        &self,
        request: crate::types::CompletionRequest,
    ) -> Result<crate::types::CompletionResponse, LlmError> {
        let mut groq_messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            groq_messages.push(GroqMessage::system(system.clone()));
        }
        for msg in request.messages {
            let role = match msg.role {
                crate::types::Role::User => GroqRole::User,
                crate::types::Role::Assistant => GroqRole::Assistant,
                crate::types::Role::System => GroqRole::System,
            };
            let content = msg
                .content
                .into_iter()
                .map(|block| match block {
                    crate::types::ContentBlock::Text { text } => text,
                })
                .collect::<Vec<String>>()
                .join("");
            groq_messages.push(GroqMessage::new(role, content));
        }

        let groq_request = GroqChatCompletionRequest {
            model: request.model,
            messages: groq_messages,
            max_tokens: Some(request.max_tokens),
            temperature: request.temperature,
            top_p: request.top_p,
            stop: request.stop_sequences,
            stream: None,
        };

        let groq_response = self.create_chat_completion(groq_request).await?;

        if groq_response.choices.is_empty() {
            return Err(LlmError::internal("No completion choices returned"));
        }

        let choice = &groq_response.choices[0];
        let content = vec![crate::types::ContentBlock::Text {
            text: choice.message.content.clone(),
        }];

        Ok(crate::types::CompletionResponse {
            content,
            role: match choice.message.role {
                GroqRole::User => crate::types::Role::User,
                GroqRole::Assistant => crate::types::Role::Assistant,
                GroqRole::System => crate::types::Role::System,
            },
            usage: crate::types::Usage {
                input_tokens: groq_response.usage.prompt_tokens,
                output_tokens: groq_response.usage.completion_tokens,
            },
            stop_reason: choice.finish_reason.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        crate::providers::GROQ
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
