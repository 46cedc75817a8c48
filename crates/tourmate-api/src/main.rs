//! TourMate gateway and terminal chat client entry point.
//!
//! Binary name: `tourmate`
//!
//! Parses CLI arguments, then either starts the gateway HTTP server
//! (`tourmate serve`), runs the interactive chat client (`tourmate chat`),
//! or manages the persisted session id (`tourmate session ...`).

mod cli;
mod http;
mod state;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { bind, otel } => {
            // The server gets the full observability setup; RUST_LOG drives
            // the filter.
            tourmate_observe::tracing_setup::init_tracing(otel)
                .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

            let state = AppState::init().await?;
            let addr = bind.unwrap_or_else(|| state.config.bind.clone());
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} TourMate gateway listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!(
                "  {} backend: {}",
                console::style("→").dim(),
                console::style(&state.config.backend_url).dim()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
            tourmate_observe::tracing_setup::shutdown_tracing();
        }

        Commands::Chat { gateway, language } => {
            init_cli_tracing(cli.verbose, cli.quiet);
            cli::chat::run_chat_loop(&gateway, language.as_deref()).await?;
        }

        Commands::Session { action } => {
            init_cli_tracing(cli.verbose, cli.quiet);
            cli::session::run(action).await?;
        }
    }

    Ok(())
}

/// Set up tracing for CLI commands based on verbosity flags.
fn init_cli_tracing(verbose: u8, quiet: bool) {
    let filter = match verbose {
        0 if quiet => "error",
        0 => "warn",
        1 => "info,tourmate=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
