//! chatgpt: command-line access to the OpenAI API.
//!
//! Configuration comes from `CHATGPT_*` environment variables, optionally
//! loaded from a `.env` file in the working directory.

use std::env;
use std::process::ExitCode;

use chatgpt_client::{defaults, ChatCompletionRequest, ChatMessage, OpenAiService, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "chatgpt")]
#[command(author, version, about = "Command-line client for the OpenAI API")]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// List the models available to the account
    Models,

    /// List uploaded files
    Files,

    /// Send a single user message and print the reply
    Chat {
        /// Model to use
        #[arg(short, long, default_value = defaults::CHAT_MODEL)]
        model: String,

        /// Message text; several words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        prompt: Vec<String>,
    },
}

fn init_logging() {
    // LOG_FORMAT - "text" (default) or "json"
    // RUST_LOG   - standard env filter (default: "chatgpt_client=info")
    let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "chatgpt_client=info".into());

    let registry = tracing_subscriber::registry().with(env_filter);
    if log_format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn run(service: &OpenAiService, command: Commands) -> Result<()> {
    match command {
        Commands::Models => {
            for model in service.list_models()? {
                println!("{}", model.id);
            }
        }
        Commands::Files => {
            for file in service.list_files()? {
                println!(
                    "{}\t{}\t{}",
                    file.id,
                    file.purpose.as_deref().unwrap_or("-"),
                    file.filename.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Chat { model, prompt } => {
            let messages = vec![ChatMessage::user(prompt.join(" "))];
            let request = ChatCompletionRequest::new(model, messages);
            let result = service.create_chat_completion(&request)?;
            if let Some(choice) = result.choices.first() {
                println!("{}", choice.message.content);
            }
            if let Some(usage) = result.usage {
                info!(total_tokens = usage.total_tokens, "Chat completion finished");
            }
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    // Usage errors exit with 1 like every other failure; --help and --version succeed.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    init_logging();

    let service = match OpenAiService::from_env() {
        Ok(service) => service,
        Err(e) => {
            error!(error = %e, "Failed to configure client");
            return ExitCode::FAILURE;
        }
    };

    match run(&service, cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(remote) = e.remote() {
                error!(
                    status = e.status(),
                    error_type = %remote.error_type,
                    "{}",
                    remote.message
                );
            } else {
                error!(error = %e, "Request failed");
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_chat_joins_prompt_words() {
        let cli = Cli::try_parse_from(["chatgpt", "chat", "Write", "a", "haiku"]).unwrap();
        match cli.command {
            Commands::Chat { model, prompt } => {
                assert_eq!(model, defaults::CHAT_MODEL);
                assert_eq!(prompt.join(" "), "Write a haiku");
            }
            other => panic!("expected chat, got {:?}", other),
        }
    }

    #[test]
    fn test_chat_model_override() {
        let cli = Cli::try_parse_from(["chatgpt", "chat", "-m", "gpt-4", "hi"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Chat {
                model: "gpt-4".to_string(),
                prompt: vec!["hi".to_string()],
            }
        );
    }

    #[test]
    fn test_chat_without_prompt_is_rejected() {
        let err = Cli::try_parse_from(["chatgpt", "chat"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_unknown_command_is_rejected() {
        let err = Cli::try_parse_from(["chatgpt", "embeddings"]).unwrap_err();
        assert!(err.use_stderr());
    }

    #[test]
    fn test_help_is_not_an_error() {
        let err = Cli::try_parse_from(["chatgpt", "--help"]).unwrap_err();
        assert!(!err.use_stderr());
    }
}
