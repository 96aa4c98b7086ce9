//! jnana CLI: terminal chat client for the VIGNAN `JnanaMitra` assistant

use clap::{Parser, Subcommand};
use jnana_engine::{
    run_turn, ChatClient, ChatMessage, Config, ConfigError, Conversation, HttpChatClient, Role,
    TurnOutcome,
};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log filter when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "jnana=info";

/// Chat with the jnana assistant from the terminal
#[derive(Parser, Debug)]
#[command(name = "jnana")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/jnana/config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Chat endpoint URL, overriding config and environment
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Commands {
    /// Open the TUI (default when no command specified)
    Tui,

    /// Send one message and print the reply
    Ask {
        /// Message text
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Line-oriented chat on stdin/stdout (/clear, /quit)
    Repl,

    /// Print the effective configuration
    Config {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let is_tui = matches!(cli.command, None | Some(Commands::Tui));

    if let Err(e) = init_logging(cli.log_file.as_deref(), is_tui) {
        eprintln!("Error: {e}");
        return ExitCode::FAILURE;
    }

    let (config, config_path) = match resolve_config(&cli) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        None | Some(Commands::Tui) => run_async(cmd_tui(config)),
        Some(Commands::Ask { text }) => run_async(cmd_ask(config, text.join(" "))),
        Some(Commands::Repl) => run_async(cmd_repl(config)),
        Some(Commands::Config { json }) => cmd_config(&config, config_path.as_deref(), json),
    }
}

/// Install the tracing subscriber.
///
/// The TUI owns the terminal, so it only logs when a log file is given.
fn init_logging(log_file: Option<&Path>, is_tui: bool) -> std::io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None if is_tui => {}
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

/// Load the config file (missing means defaults), then apply environment
/// and command-line overrides.
fn resolve_config(cli: &Cli) -> Result<(Config, Option<PathBuf>), ConfigError> {
    let path = cli.config.clone().or_else(Config::default_path);
    let config = match &path {
        Some(path) => Config::load_or_default(path)?,
        None => Config::default(),
    };
    let config = config
        .with_env_overrides()
        .with_overrides(cli.endpoint.clone());
    config.validate()?;
    debug!(endpoint = %config.endpoint, "Configuration resolved");
    Ok((config, path))
}

fn run_async<F>(fut: F) -> ExitCode
where
    F: std::future::Future<Output = ExitCode>,
{
    match tokio::runtime::Runtime::new() {
        Ok(rt) => rt.block_on(fut),
        Err(e) => {
            eprintln!("Error: failed to start runtime: {e}");
            ExitCode::FAILURE
        }
    }
}

fn build_client(config: &Config) -> Option<HttpChatClient> {
    match HttpChatClient::from_config(config) {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Error: {e}");
            None
        }
    }
}

async fn cmd_tui(config: Config) -> ExitCode {
    let Some(client) = build_client(&config) else {
        return ExitCode::FAILURE;
    };
    let client: Arc<dyn ChatClient> = Arc::new(client);

    match jnana_tui::run_tui(&config, client).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn cmd_ask(config: Config, text: String) -> ExitCode {
    let Some(client) = build_client(&config) else {
        return ExitCode::FAILURE;
    };
    let mut conversation = Conversation::new();

    match run_turn(&mut conversation, &client, &text).await {
        TurnOutcome::Replied(message) => {
            println!("{}", format_reply(&message));
            ExitCode::SUCCESS
        }
        TurnOutcome::Failed(message) => {
            eprintln!("{}", message.content);
            ExitCode::FAILURE
        }
        TurnOutcome::Rejected => {
            eprintln!("Error: nothing to send");
            ExitCode::FAILURE
        }
    }
}

async fn cmd_repl(config: Config) -> ExitCode {
    let Some(client) = build_client(&config) else {
        return ExitCode::FAILURE;
    };
    let mut conversation = Conversation::new();
    info!(endpoint = %client.endpoint(), "REPL started");

    if let Some(greeting) = conversation.last() {
        println!("{}", format_message(&config.assistant_name, greeting));
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        };

        match line.trim() {
            "/quit" => break,
            "/clear" => {
                conversation.clear();
                if let Some(greeting) = conversation.last() {
                    println!("{}", format_message(&config.assistant_name, greeting));
                }
            }
            _ => match run_turn(&mut conversation, &client, &line).await {
                TurnOutcome::Replied(message) | TurnOutcome::Failed(message) => {
                    println!("{}", format_message(&config.assistant_name, &message));
                }
                TurnOutcome::Rejected => {}
            },
        }
    }

    ExitCode::SUCCESS
}

fn cmd_config(config: &Config, path: Option<&Path>, json: bool) -> ExitCode {
    if json {
        return match serde_json::to_string_pretty(config) {
            Ok(out) => {
                println!("{out}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    let source = match path {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (not found, using defaults)", path.display()),
        None => "defaults".to_string(),
    };
    println!("Configuration\n");
    println!("  Source:         {source}");
    println!("  Endpoint:       {}", config.endpoint);
    println!("  Assistant name: {}", config.assistant_name);
    println!("  Theme:          {:?}", config.theme);
    println!("  Tick rate:      {}ms", config.tick_rate_ms);
    ExitCode::SUCCESS
}

/// Reply text plus its image link, if any.
fn format_reply(message: &ChatMessage) -> String {
    match message.image_url() {
        Some(url) => format!("{}\n[image] {url}", message.content),
        None => message.content.clone(),
    }
}

/// A transcript entry for line-oriented output.
fn format_message(assistant_name: &str, message: &ChatMessage) -> String {
    let who = match message.role {
        Role::User => "You",
        Role::Assistant => assistant_name,
    };
    format!("[{}] {who}: {}", message.timestamp, format_reply(message))
}
