//! Client for the DeenCompass chat endpoint
//!
//! Sends a question together with a fixed citation-first system instruction
//! to a chat server and turns whichever response shape it returns into
//! plain text.

pub mod app;
pub mod chat;
pub mod error;
pub mod models;
pub mod prompts;

pub use error::{Error, ErrorKind, Result};
