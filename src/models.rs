//! Data models and structures
//!
//! Defines the chat request payload, the health probe response, and the
//! client configuration.

use crate::{prompts, Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/api/chat";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One entry of the conversation sent to the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConversationMessage {
    pub role: Role,
    pub content: String,
}

impl ConversationMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

/// Request body for the chat endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<ConversationMessage>,
}

impl ChatRequest {
    /// System instruction first, then the question verbatim.
    pub fn new(system_instruction: &str, question: &str) -> Self {
        Self {
            messages: vec![
                ConversationMessage::system(system_instruction),
                ConversationMessage::user(question),
            ],
        }
    }
}

/// Body returned by the server's `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub config: Option<serde_json::Value>,
}

// Configuration
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub endpoint: Url,
    pub system_instruction: String,
    pub timeout: Option<Duration>,
}

impl ChatConfig {
    /// Config for `endpoint` with the built-in instruction and no timeout.
    pub fn new(endpoint: Url) -> Self {
        Self {
            endpoint,
            system_instruction: prompts::SYSTEM_INSTRUCTION.to_string(),
            timeout: None,
        }
    }

    /// Load `.env` from the working directory (if there is one), then read
    /// the process environment.
    pub fn from_env() -> Result<Self> {
        skip_missing(dotenvy::dotenv().map(|_| ()))?;

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`ChatConfig::from_env`], but the given file must exist.
    pub fn from_env_file(path: &Path) -> Result<Self> {
        dotenvy::from_path(path)?;

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let endpoint = match non_blank("CHAT_ENDPOINT") {
            Some(raw) => parse_endpoint(&raw)?,
            None => parse_endpoint(DEFAULT_ENDPOINT)?,
        };

        let system_instruction = non_blank("CHAT_SYSTEM_INSTRUCTION")
            .unwrap_or_else(|| prompts::SYSTEM_INSTRUCTION.to_string());

        let timeout = non_blank("CHAT_TIMEOUT_SECS").and_then(|raw| match raw.parse::<u64>() {
            Ok(secs) => Some(Duration::from_secs(secs)),
            Err(_) => {
                tracing::warn!(
                    "CHAT_TIMEOUT_SECS expected an integer, got {:?}; ignoring",
                    raw
                );
                None
            }
        });

        Ok(Self {
            endpoint,
            system_instruction,
            timeout,
        })
    }
}

/// A missing `.env` is fine; one that exists but cannot be read or parsed is not.
fn skip_missing(loaded: std::result::Result<(), dotenvy::Error>) -> Result<()> {
    match loaded {
        Err(e) if e.not_found() => Ok(()),
        Err(e) => {
            tracing::error!("Failed to load .env: {}", e);
            Err(e.into())
        }
        Ok(()) => Ok(()),
    }
}

/// URL of the server's health probe, on the same origin as `endpoint`.
pub fn health_url(endpoint: &Url) -> Result<Url> {
    endpoint
        .join("/health")
        .map_err(|e| Error::Config(format!("Cannot derive health URL: {}", e)))
}

pub fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Config(format!("Invalid endpoint '{}': {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::Config(format!(
            "Invalid endpoint '{}': unsupported scheme '{}'",
            raw, other
        ))),
    }
}
