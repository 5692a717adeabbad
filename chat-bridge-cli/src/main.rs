//! CLI entry point for chat-bridge

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast;
use tracing::{error, info};

use chat_bridge_core::config::{Config, ConfigLoader};
use chat_bridge_core::logging::init_logging;
use chat_bridge_server::{run_server, AppState};

mod client;

use client::{ApiClient, SendOutcome};

#[derive(Parser)]
#[command(name = "chat-bridge")]
#[command(about = "A polling relay bridging a local chat client and a browser-driven consumer")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the relay server
    Serve {
        /// Override the listen port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Interactive chat through the relay
    Chat {
        /// Server API base URL
        #[arg(short, long)]
        server: Option<String>,
        /// Seconds to wait for each reply
        #[arg(short, long, default_value_t = 300)]
        timeout: u64,
    },
    /// Submit a single message and exit
    Send {
        /// Message to submit
        #[arg(short, long)]
        message: String,
        /// Server API base URL
        #[arg(short, long)]
        server: Option<String>,
    },
    /// Show resolved configuration and server reachability
    Status {
        /// Server API base URL
        #[arg(short, long)]
        server: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = match cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };

    match cli.command {
        Commands::Serve { port } => {
            run_serve(&config_loader, port).await?;
        }
        Commands::Chat { server, timeout } => {
            tracing_subscriber::fmt::init();
            run_chat(server, timeout).await?;
        }
        Commands::Send { message, server } => {
            tracing_subscriber::fmt::init();
            run_send(server, &message).await?;
        }
        Commands::Status { server } => {
            tracing_subscriber::fmt::init();
            run_status(&config_loader, server).await?;
        }
    }

    Ok(())
}

/// Run the relay server until Ctrl+C
async fn run_serve(loader: &ConfigLoader, port_override: Option<u16>) -> Result<()> {
    let mut config = loader.load()?;
    if let Some(port) = port_override {
        config.server.port = port;
    }

    // the guard flushes buffered file output when dropped at exit
    let _log_guard = init_logging(&config.logging);

    println!("{}", style("Starting chat-bridge relay...").bold().cyan());
    println!("Listen: {}:{}", config.server.host, config.server.port);
    println!("Model: {}", config.envelope.model);
    if config.relay.throttle.enabled {
        println!(
            "Throttle: every {} ms",
            config.relay.throttle.min_interval_ms
        );
    } else {
        println!("Throttle: {}", style("disabled").dim());
    }

    let state = AppState::from_config(&config);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let host = config.server.host.clone();
    let port = config.server.port;
    let server_handle = tokio::spawn(async move {
        if let Err(e) = run_server(state, &host, port, shutdown_rx).await {
            error!("Server error: {}", e);
        }
    });

    println!(
        "\n{}",
        style("Relay is running. Press Ctrl+C to stop.").green()
    );

    tokio::signal::ctrl_c().await?;
    println!("\n{}", style("Shutting down...").yellow());

    let _ = shutdown_tx.send(());
    let _ = server_handle.await;

    println!("{}", style("Relay stopped.").green());
    Ok(())
}

/// Interactive chat loop: submit, then poll for the reply
async fn run_chat(server: Option<String>, timeout_secs: u64) -> Result<()> {
    let client = ApiClient::new(server);
    let timeout = Duration::from_secs(timeout_secs);

    println!("{}", style("Welcome to chat-bridge!").bold().cyan());
    println!("Relay: {}", client.base_url());
    println!("Type your messages and press Enter to send. Ctrl+C to exit.\n");

    loop {
        let message: String = match Input::new().with_prompt("you").interact_text() {
            Ok(input) => input,
            // interrupted or stdin closed
            Err(_) => break,
        };
        if message.trim().is_empty() {
            continue;
        }

        match client.send_message(&message).await {
            Ok(SendOutcome::Accepted) => {}
            Ok(SendOutcome::Duplicate) => {
                println!(
                    "{}",
                    style("Message already in flight, waiting for its reply.").yellow()
                );
            }
            Err(e) => {
                println!("{} {}", style("Failed to send:").red(), e);
                continue;
            }
        }

        let spinner = waiting_spinner();
        let reply = client
            .wait_for_response(timeout, Duration::from_millis(500))
            .await;
        spinner.finish_and_clear();

        match reply {
            Ok(Some(text)) => {
                println!("{} {}\n", style("bridge:").bold().green(), text);
            }
            Ok(None) => {
                println!(
                    "{}\n",
                    style("No response received within timeout.").yellow()
                );
            }
            Err(e) => {
                println!("{} {}\n", style("Failed to poll:").red(), e);
            }
        }
    }

    println!("\n{}", style("Bye.").dim());
    Ok(())
}

/// Submit one message and report the outcome
async fn run_send(server: Option<String>, message: &str) -> Result<()> {
    let client = ApiClient::new(server);
    match client.send_message(message).await? {
        SendOutcome::Accepted => {
            info!("message queued");
            println!("{}", style("Message queued successfully.").green());
        }
        SendOutcome::Duplicate => {
            println!("{}", style("Message already processed.").yellow());
        }
    }
    Ok(())
}

/// Print resolved configuration and probe the server
async fn run_status(loader: &ConfigLoader, server: Option<String>) -> Result<()> {
    let config = match loader.load() {
        Ok(config) => config,
        Err(e) => {
            println!("{} {}", style("Failed to load config:").red(), e);
            Config::default()
        }
    };

    println!("{}", style("chat-bridge Status").bold().cyan());
    println!();

    println!("{}", style("Configuration:").bold());
    println!("  Config dir: {}", loader.config_dir().display());
    println!("  Listen: {}:{}", config.server.host, config.server.port);
    println!("  Model: {}", config.envelope.model);
    println!("  Response log capacity: {}", config.relay.max_responses);
    if config.relay.throttle.enabled {
        println!(
            "  Throttle: every {} ms",
            config.relay.throttle.min_interval_ms
        );
    } else {
        println!("  Throttle: {}", style("disabled").dim());
    }
    if config.transcript.enabled {
        println!("  Transcript: {}", config.transcript.dir);
    } else {
        println!("  Transcript: {}", style("disabled").dim());
    }
    println!();

    let client = ApiClient::new(server);
    println!("{}", style("Server:").bold());
    if client.probe().await {
        println!("  {}: {}", client.base_url(), style("reachable").green());
    } else {
        println!("  {}: {}", client.base_url(), style("unreachable").red());
    }

    Ok(())
}

/// Spinner shown while polling for a reply
fn waiting_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.set_message("Waiting for response...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}
