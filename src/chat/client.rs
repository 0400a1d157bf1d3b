use super::{extract, ChatService};
use crate::models::{health_url, ChatConfig, ChatRequest, HealthStatus};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Response, Url};
use serde_json::Value;

/// HTTP client for the chat endpoint.
///
/// Holds only read-only configuration and a pooled `reqwest::Client`, so one
/// instance can serve overlapping `ask` calls. Those calls are independent;
/// nothing orders or cancels them.
pub struct ChatClient {
    client: Client,
    endpoint: Url,
    system_instruction: String,
}

impl ChatClient {
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::new_with_client(config, client))
    }

    pub fn new_with_client(config: &ChatConfig, client: Client) -> Self {
        Self {
            client,
            endpoint: config.endpoint.clone(),
            system_instruction: config.system_instruction.clone(),
        }
    }

    /// Probe the server's `/health` route on the endpoint's origin.
    pub async fn health(&self) -> Result<HealthStatus> {
        let url = health_url(&self.endpoint)?;
        tracing::debug!("Checking chat server health at {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to reach chat server: {}", e);
            e
        })?;

        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse health response: {}\nBody: {}", e, body);
            Error::MalformedResponse(format!("Failed to parse health response: {}", e))
        })
    }
}

#[async_trait]
impl ChatService for ChatClient {
    async fn ask(&self, question: &str) -> Result<String> {
        let request = ChatRequest::new(&self.system_instruction, question);
        tracing::debug!("Sending chat request to {}", self.endpoint);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to send request to chat server: {}", e);
                e
            })?;

        let body = read_success_body(response).await?;
        let parsed: Value = serde_json::from_str(&body).map_err(|e| {
            tracing::error!("Failed to parse chat response: {}\nBody: {}", e, body);
            Error::MalformedResponse(format!("Failed to parse chat response: {}", e))
        })?;

        Ok(extract::answer_from(&parsed))
    }
}

/// Return the body of a 2xx response, or a `Server` error carrying the
/// status and body text otherwise.
async fn read_success_body(response: Response) -> Result<String> {
    let status = response.status();

    if !status.is_success() {
        let error_text = response.text().await?;
        tracing::error!("Chat server error (status {}): {}", status, error_text);
        return Err(Error::Server {
            status: status.as_u16(),
            body: error_text,
        });
    }

    response.text().await.map_err(|e| {
        tracing::error!("Failed to read chat response body: {}", e);
        Error::MalformedResponse(format!("Failed to read response body: {}", e))
    })
}
