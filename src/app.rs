//! Terminal front end: reads questions, shows answers or errors.

use crate::chat::ChatService;
use crate::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use std::borrow::Cow;
use tracing::{error, info, warn};

const PROMPT: &str = "> ";
const THINKING: &str = "Thinking…";

/// What the user sees after submitting a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    Failed(String),
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Answer(text) | Reply::Failed(text) => text,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Reply::Failed(_))
    }
}

pub struct App {
    chat: Box<dyn ChatService>,
}

impl App {
    pub fn with_service(chat: Box<dyn ChatService>) -> Self {
        Self { chat }
    }

    /// Ask one question. Blank input is ignored and sends nothing.
    pub async fn submit(&self, input: &str) -> Option<Reply> {
        let question = input.trim();
        if question.is_empty() {
            return None;
        }

        info!("Asking question ({} chars)", question.chars().count());
        let reply = match self.chat.ask(question).await {
            Ok(answer) => Reply::Answer(answer),
            Err(e) => {
                error!("Chat request failed: {}", e);
                Reply::Failed(format!("Error: {}", e))
            }
        };
        Some(reply)
    }

    /// Read questions line by line until EOF or `exit`/`quit`.
    ///
    /// Only one request is in flight at a time: the next line is not read
    /// until the previous reply has been written. Lines that are not valid
    /// UTF-8 are decoded lossily rather than ending the session.
    pub async fn run_interactive<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();

        loop {
            writer.write_all(PROMPT.as_bytes()).await?;
            writer.flush().await?;

            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let line = String::from_utf8_lossy(&buf);
            if let Cow::Owned(_) = line {
                warn!("Input line was not valid UTF-8; invalid bytes replaced");
            }

            let trimmed = line.trim();
            if trimmed.eq_ignore_ascii_case("exit") || trimmed.eq_ignore_ascii_case("quit") {
                break;
            }

            if trimmed.is_empty() {
                continue;
            }

            writer.write_all(format!("{}\n", THINKING).as_bytes()).await?;
            writer.flush().await?;

            if let Some(reply) = self.submit(&line).await {
                writer
                    .write_all(format!("{}\n\n", reply.text()).as_bytes())
                    .await?;
            }
        }

        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::MockChatClient;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn app_with(mock: MockChatClient) -> (App, Arc<MockChatClient>) {
        let mock = Arc::new(mock);
        let app = App::with_service(Box::new(mock.clone()));
        (app, mock)
    }

    #[tokio::test]
    async fn test_submit_trims_input() {
        let (app, mock) = app_with(MockChatClient::new().with_response("Yes.".to_string()));

        let reply = app.submit("  Is it sunnah?\n").await.unwrap();

        assert_eq!(reply, Reply::Answer("Yes.".to_string()));
        assert_eq!(mock.questions(), vec!["Is it sunnah?"]);
    }

    #[tokio::test]
    async fn test_submit_blank_input_is_noop() {
        let (app, mock) = app_with(MockChatClient::new());

        assert!(app.submit("").await.is_none());
        assert!(app.submit("   \t\n").await.is_none());
        assert_eq!(mock.get_call_count(), 0);
    }

    #[tokio::test]
    async fn test_submit_renders_errors() {
        let (app, _) =
            app_with(MockChatClient::new().with_server_error(500, "internal error".to_string()));

        let reply = app.submit("question").await.unwrap();

        assert!(reply.is_failure());
        assert_eq!(reply.text(), "Error: Server error (500): internal error");
    }

    #[tokio::test]
    async fn test_interactive_session() {
        let (app, mock) = app_with(
            MockChatClient::new()
                .with_response("First".to_string())
                .with_response("Second".to_string()),
        );
        let input: &[u8] = b"one\n\n  two  \nquit\nnever asked\n";
        let mut output = Vec::new();

        app.run_interactive(input, &mut output).await.unwrap();

        let output = String::from_utf8(output).unwrap();
        assert_eq!(mock.questions(), vec!["one", "two"]);
        assert!(output.contains("Thinking…\nFirst\n"));
        assert!(output.contains("Thinking…\nSecond\n"));
        assert!(!output.contains("never asked"));
    }

    #[tokio::test]
    async fn test_interactive_session_survives_invalid_utf8() {
        let (app, mock) = app_with(MockChatClient::new());
        let input: &[u8] = b"caf\xe9?\nsecond question\r\n";
        let mut output = Vec::new();

        app.run_interactive(input, &mut output).await.unwrap();

        assert_eq!(mock.questions(), vec!["caf\u{FFFD}?", "second question"]);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("An answer about second question"));
    }

    #[tokio::test]
    async fn test_interactive_session_stops_at_eof() {
        let (app, mock) = app_with(MockChatClient::new());
        let input: &[u8] = b"last question";
        let mut output = Vec::new();

        app.run_interactive(input, &mut output).await.unwrap();

        assert_eq!(mock.get_call_count(), 1);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("An answer about last question"));
    }
}
