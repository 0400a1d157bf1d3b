use anyhow::Result;
use clap::Parser;
use deencompass_client::app::App;
use deencompass_client::chat::ChatClient;
use deencompass_client::models::{parse_endpoint, ChatConfig};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "deencompass")]
#[command(about = "Ask the DeenCompass chat server a question")]
struct CliArgs {
    /// Question to ask. Starts an interactive session when omitted.
    #[arg(value_name = "QUESTION")]
    question: Vec<String>,

    /// Chat endpoint URL (overrides CHAT_ENDPOINT).
    #[arg(long, value_name = "URL")]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides CHAT_TIMEOUT_SECS).
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Load settings from this file instead of ./.env.
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,

    /// Query the server's /health route and exit.
    #[arg(long)]
    health: bool,
}

fn apply_overrides(
    mut config: ChatConfig,
    args: &CliArgs,
) -> deencompass_client::Result<ChatConfig> {
    if let Some(endpoint) = &args.endpoint {
        config.endpoint = parse_endpoint(endpoint)?;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout = Some(Duration::from_secs(secs));
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deencompass_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let loaded = match &args.env_file {
        Some(path) => ChatConfig::from_env_file(path),
        None => ChatConfig::from_env(),
    };

    let config = match loaded.and_then(|config| apply_overrides(config, &args)) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(2);
        }
    };
    info!("Using chat endpoint {}", config.endpoint);

    let client = ChatClient::new(&config)?;

    if args.health {
        match client.health().await {
            Ok(status) => {
                println!("{}", serde_json::to_string_pretty(&status)?);
                return Ok(());
            }
            Err(e) => {
                println!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    let app = App::with_service(Box::new(client));

    if args.question.is_empty() {
        let stdin = BufReader::new(tokio::io::stdin());
        app.run_interactive(stdin, tokio::io::stdout()).await?;
        return Ok(());
    }

    if let Some(reply) = app.submit(&args.question.join(" ")).await {
        println!("{}", reply.text());
        if reply.is_failure() {
            std::process::exit(1);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> CliArgs {
        CliArgs::try_parse_from(std::iter::once("deencompass").chain(list.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_question_words_are_collected() {
        let parsed = args(&["What", "is", "wudu?"]);
        assert_eq!(parsed.question.join(" "), "What is wudu?");
        assert!(!parsed.health);
        assert!(parsed.env_file.is_none());
    }

    #[test]
    fn test_env_file_flag() {
        let parsed = args(&["--env-file", "conf/chat.env", "--health"]);
        assert_eq!(parsed.env_file, Some(PathBuf::from("conf/chat.env")));
        assert!(parsed.health);
    }

    #[test]
    fn test_overrides_replace_env_values() {
        let parsed = args(&[
            "--endpoint",
            "https://example.com/api/chat",
            "--timeout-secs",
            "9",
        ]);
        let config = apply_overrides(ChatConfig::from_lookup(|_| None).unwrap(), &parsed).unwrap();

        assert_eq!(config.endpoint.as_str(), "https://example.com/api/chat");
        assert_eq!(config.timeout, Some(Duration::from_secs(9)));
    }

    #[test]
    fn test_invalid_endpoint_override() {
        let parsed = args(&["--endpoint", "nope"]);
        assert!(apply_overrides(ChatConfig::from_lookup(|_| None).unwrap(), &parsed).is_err());
    }
}
