//! Gemini gateway implementation
//!
//! One HTTP client serves both the decision oracle (function calling) and
//! document search (the `fileSearch` tool over a file-search store).

use super::error::{GeminiError, Result};
use super::types::{GenerateContentRequest, GenerateContentResponse, api_error_message};
use async_trait::async_trait;
use docuchat_application::ports::document_search::{
    DocumentSearchPort, SearchError, SearchResponse,
};
use docuchat_application::ports::llm_gateway::{GatewayError, LlmGateway};
use docuchat_domain::{ChannelId, GeneratedText, LlmDecision};
use reqwest::Client;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const STORE_PREFIX: &str = "fileSearchStores/";

/// Connection settings for [`GeminiGateway`].
#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Gateway to the Generative Language REST API
pub struct GeminiGateway {
    client: Client,
    config: GeminiConfig,
}

impl GeminiGateway {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey("GOOGLE_API_KEY".to_string()));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeminiError::ClientBuild(e.to_string()))?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        )
    }

    async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        debug!("POST {}", self.url());
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = api_error_message(&body);
            warn!("Gemini API returned {}: {}", status, message);
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GeminiError::Parse(e.to_string()))
    }
}

/// Channel ids may be given bare or as full store resource names.
pub fn store_name(channel: &ChannelId) -> String {
    let id = channel.as_str();
    if id.starts_with(STORE_PREFIX) {
        id.to_string()
    } else {
        format!("{STORE_PREFIX}{id}")
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn call_with_tools(
        &self,
        prompt: &str,
        tools: &[Value],
    ) -> std::result::Result<LlmDecision, GatewayError> {
        let request = GenerateContentRequest::prompt(prompt).with_functions(tools);
        Ok(self.generate_content(&request).await?.into_decision())
    }

    async fn generate(&self, prompt: &str) -> std::result::Result<GeneratedText, GatewayError> {
        let request = GenerateContentRequest::prompt(prompt);
        Ok(self.generate_content(&request).await?.into_generated())
    }
}

#[async_trait]
impl DocumentSearchPort for GeminiGateway {
    async fn search(
        &self,
        channel: &ChannelId,
        query: &str,
    ) -> std::result::Result<SearchResponse, SearchError> {
        let request = GenerateContentRequest::prompt(query).with_file_search(store_name(channel));
        match self.generate_content(&request).await {
            Ok(response) => Ok(SearchResponse::found(response.into_sources())),
            // The backend answered; report its refusal to the model.
            Err(GeminiError::Api { message, .. }) => Ok(SearchResponse::failed(message)),
            Err(e) => Err(e.into()),
        }
    }
}
