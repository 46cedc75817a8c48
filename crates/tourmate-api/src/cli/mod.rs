//! CLI command definitions and dispatch for the `tourmate` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod chat;
pub mod session;

use clap::{Parser, Subcommand};

/// TourMate travel-assistant gateway and chat client.
#[derive(Parser)]
#[command(name = "tourmate", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the gateway HTTP server.
    Serve {
        /// Bind address override (e.g. "0.0.0.0:3000"); defaults to the
        /// configured bind address.
        #[arg(long)]
        bind: Option<String>,

        /// Bridge tracing spans to OpenTelemetry (stdout exporter).
        #[arg(long)]
        otel: bool,
    },

    /// Chat with TourMate from the terminal.
    Chat {
        /// Gateway URL to connect to.
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        gateway: String,

        /// Display language for replies (e.g. "English", "日本語 (Japanese)").
        #[arg(long)]
        language: Option<String>,
    },

    /// Inspect or clear the persisted session id.
    Session {
        #[command(subcommand)]
        action: session::SessionCommand,
    },
}
