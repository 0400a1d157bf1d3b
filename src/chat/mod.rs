//! Chat endpoint integration
//!
//! Sends a question with the system instruction to the configured chat
//! endpoint and normalizes whatever body shape comes back into plain text.

pub mod client;
pub mod extract;
pub mod mock;

pub use client::ChatClient;
pub use extract::PLACEHOLDER_ANSWER;
pub use mock::MockChatClient;

use crate::Result;
use async_trait::async_trait;

#[async_trait]
pub trait ChatService: Send + Sync {
    /// One question, one request, one answer.
    async fn ask(&self, question: &str) -> Result<String>;
}

#[async_trait]
impl<T: ChatService + ?Sized> ChatService for std::sync::Arc<T> {
    async fn ask(&self, question: &str) -> Result<String> {
        (**self).ask(question).await
    }
}
