//! OpenSentinel CLI — the main entry point.
//!
//! Commands:
//! - `init`     — Write a default config file
//! - `register` — Register this application and print the issued key
//! - `chat`     — Send a message to the platform assistant
//! - `notify`   — Send a notification through a platform channel
//! - `memory`   — Store or search memories
//! - `tools`    — List or execute platform tools
//! - `agent`    — Spawn a sub-agent
//! - `status`   — Show platform status
//! - `health`   — Check whether the platform is reachable

use clap::{Parser, Subcommand};
use opensentinel_core::{AgentType, MemoryType, NotifyChannel, Priority};
use serde_json::Value;

mod commands;

use commands::ConnectionArgs;

#[derive(Parser)]
#[command(
    name = "opensentinel",
    about = "OpenSentinel — connect applications to the OpenSentinel AI platform",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    connection: ConnectionArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file to ~/.opensentinel/config.toml
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Register this application and print the issued API key
    Register,

    /// Chat with the platform assistant
    Chat {
        message: String,

        /// Extra context sent alongside the message
        #[arg(long)]
        context: Option<String>,

        /// Do not let the platform call tools
        #[arg(long)]
        no_tools: bool,

        #[arg(long)]
        system_prompt: Option<String>,
    },

    /// Send a notification (telegram, discord, slack, email, all)
    Notify {
        channel: NotifyChannel,

        message: String,

        #[arg(long)]
        recipient: Option<String>,

        /// low, normal, high or urgent
        #[arg(long, default_value = "normal")]
        priority: Priority,
    },

    /// Store or search memories
    Memory {
        #[command(subcommand)]
        action: MemoryAction,
    },

    /// List or execute platform tools
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },

    /// Manage sub-agents
    Agent {
        #[command(subcommand)]
        action: AgentAction,
    },

    /// Show platform status
    Status,

    /// Check whether the platform is reachable
    Health,
}

#[derive(Subcommand)]
enum MemoryAction {
    /// Store a memory
    Store {
        content: String,

        /// episodic, semantic or procedural
        #[arg(long = "type", default_value = "semantic")]
        memory_type: MemoryType,

        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        importance: i64,

        /// JSON object attached to the memory
        #[arg(long, value_parser = commands::parse_json)]
        metadata: Option<Value>,
    },

    /// Search stored memories
    Search {
        query: String,

        #[arg(long, default_value_t = 5)]
        limit: u32,

        /// Include memories stored by other applications
        #[arg(long)]
        cross_app: bool,
    },
}

#[derive(Subcommand)]
enum ToolsAction {
    /// List available tools
    List,

    /// Execute a tool
    Exec {
        tool: String,

        /// Tool input as JSON
        #[arg(long, value_parser = commands::parse_json, default_value = "{}")]
        input: Value,
    },
}

#[derive(Subcommand)]
enum AgentAction {
    /// Spawn a sub-agent (research, coding, writing, analysis)
    Spawn {
        agent_type: AgentType,

        task: String,

        #[arg(long)]
        context: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let conn = &cli.connection;
    match cli.command {
        Commands::Init { force } => commands::init::run(conn, force).await?,
        Commands::Register => commands::register::run(conn).await?,
        Commands::Chat {
            message,
            context,
            no_tools,
            system_prompt,
        } => commands::chat::run(conn, message, context, !no_tools, system_prompt).await?,
        Commands::Notify {
            channel,
            message,
            recipient,
            priority,
        } => commands::notify::run(conn, channel, message, recipient, priority).await?,
        Commands::Memory { action } => match action {
            MemoryAction::Store {
                content,
                memory_type,
                importance,
                metadata,
            } => commands::memory::store(conn, content, memory_type, importance, metadata).await?,
            MemoryAction::Search {
                query,
                limit,
                cross_app,
            } => commands::memory::search(conn, query, limit, cross_app).await?,
        },
        Commands::Tools { action } => match action {
            ToolsAction::List => commands::tools::list(conn).await?,
            ToolsAction::Exec { tool, input } => commands::tools::exec(conn, &tool, input).await?,
        },
        Commands::Agent { action } => match action {
            AgentAction::Spawn {
                agent_type,
                task,
                context,
            } => commands::agent::spawn(conn, agent_type, task, context).await?,
        },
        Commands::Status => commands::status::run(conn).await?,
        Commands::Health => commands::health::run(conn).await?,
    }

    Ok(())
}
