//! Sapentia CLI - terminal chat client for the Sapentia backend.

mod session;
mod view;

use std::io;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sapentia_client::{ChatClient, ClientConfig, DEFAULT_BASE_URL};
use sapentia_core::{find_model, ChatRequest, DEFAULT_MODEL_ID, KNOWN_MODELS};

use session::ChatSession;
use view::{run_view, TranscriptView};

/// Sapentia CLI - chat with the Sapentia backend
#[derive(Parser)]
#[command(name = "sapentia")]
#[command(about = "Terminal chat client for the Sapentia backend", long_about = None)]
struct Cli {
    /// Chat API base URL
    #[arg(short, long, default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Request timeout in seconds (waits indefinitely if unset)
    #[arg(long)]
    timeout_secs: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Send a single message and print the reply
    Send {
        /// Message text
        message: String,

        /// Model id to route the message to
        #[arg(short, long)]
        model: Option<String>,

        /// Ask for a guided, tutoring-style answer
        #[arg(long)]
        assisted: bool,
    },

    /// Start an interactive chat on stdin
    Chat {
        /// Model id to route messages to
        #[arg(short, long)]
        model: Option<String>,

        /// Ask for guided, tutoring-style answers
        #[arg(long)]
        assisted: bool,
    },

    /// List the model ids the backend knows
    Models,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Logs go to stderr so replies on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("sapentia=info".parse()?))
        .with_writer(io::stderr)
        .init();

    let mut config = ClientConfig::default().with_base_url(cli.api_url);
    if let Some(secs) = cli.timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    match cli.command {
        Commands::Send {
            message,
            model,
            assisted,
        } => {
            send(&config, &message, model, assisted).await?;
        }
        Commands::Chat { model, assisted } => {
            chat(&config, model, assisted).await?;
        }
        Commands::Models => {
            list_models();
        }
    }

    Ok(())
}

async fn send(
    config: &ClientConfig,
    message: &str,
    model: Option<String>,
    assisted: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_model(model.as_deref());
    let client = ChatClient::from_config(config)?;

    let request = ChatRequest::new(message)
        .with_model(model.as_deref())
        .with_assisted_learning(assisted);
    let reply = client.send_request(&request).await;

    println!("{}", reply);
    Ok(())
}

async fn chat(
    config: &ClientConfig,
    model: Option<String>,
    assisted: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    check_model(model.as_deref());
    let client = ChatClient::from_config(config)?;
    info!(url = %client.chat_url(), model = ?model, "Starting chat session");

    let mut session = ChatSession::new(client)
        .with_model(model)
        .with_assisted_learning(assisted);

    let view = tokio::spawn(run_view(
        TranscriptView::new(),
        session.store().subscribe_messages(),
        session.store().subscribe_loading(),
    ));

    eprintln!("Type a message and press enter. /clear, /history, /quit.");

    session
        .run_lines(BufReader::new(tokio::io::stdin()), &mut io::stdout())
        .await;

    // Closing the store ends the view once it has drained.
    drop(session);
    view.await??;
    Ok(())
}

fn list_models() {
    println!("{:<4}  {}", "ID", "MODEL");
    println!("{}", "-".repeat(32));
    for model in KNOWN_MODELS {
        let marker = if model.id == DEFAULT_MODEL_ID {
            " (default)"
        } else {
            ""
        };
        println!("{:<4}  {}{}", model.id, model.name, marker);
    }
}

fn check_model(model: Option<&str>) {
    if let Some(id) = model {
        if find_model(id).is_none() {
            warn!(model = %id, "Unknown model id, the backend will use its default");
        }
    }
}
