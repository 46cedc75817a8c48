//! Main chat loop orchestration.
//!
//! Coordinates the complete conversation lifecycle: session resolution
//! against the gateway (reusing the persisted id when it is still valid),
//! history replay, the welcome message, and the input loop with slash
//! commands.

use console::style;
use tracing::info;

use tourmate_core::chat::orchestrator::{ChatOrchestrator, TurnOutcome};
use tourmate_core::session::controller::{SessionController, SessionPhase};
use tourmate_infra::config::resolve_data_dir;
use tourmate_infra::gateway::GatewayClient;
use tourmate_infra::store::FileSessionStore;
use tourmate_types::chat::{ChatMessage, Sender};
use tourmate_types::language::backend_language;

use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use super::table;

/// Timeout for gateway calls from the terminal client, in seconds.
const CLIENT_TIMEOUT_SECS: u64 = 60;

/// Opening message shown before any history.
const WELCOME: &str = "Hi, I'm TourMate! I can help you discover Sri Lanka - \
from finding hotels and attractions to locating emergency services. \
How can I assist with your travel plans today?";

/// Run the interactive chat loop against a gateway.
pub async fn run_chat_loop(gateway_url: &str, language: Option<&str>) -> anyhow::Result<()> {
    let client = GatewayClient::new(gateway_url, CLIENT_TIMEOUT_SECS);
    let store = FileSessionStore::new(&resolve_data_dir());

    // Resolve the session once, up front. No session, no chat.
    let spinner = new_spinner("connecting...");
    let mut controller = SessionController::new(client.clone(), store);
    controller.resolve().await;
    spinner.finish_and_clear();

    let session_id = match controller.phase() {
        SessionPhase::Ready { session_id } => session_id.clone(),
        _ => {
            eprintln!(
                "\n  {} Could not reach the gateway at {gateway_url}.",
                style("✗").red().bold()
            );
            eprintln!(
                "  {}",
                style("Start it with `tourmate serve` and try again.").dim()
            );
            anyhow::bail!("session resolution failed");
        }
    };
    info!(session_id = %session_id, "session ready");

    let history = controller.take_history();
    let replayed = history.len();

    let mut orchestrator = ChatOrchestrator::new(client);
    orchestrator.set_language(language.map(|l| backend_language(l).to_string()));
    orchestrator.push_message(ChatMessage::bot(WELCOME, now_display()));
    orchestrator.bind_session(&session_id, history);

    print_banner(gateway_url, &session_id, language);
    for message in orchestrator.transcript() {
        print_message(message);
    }
    if replayed > 0 {
        println!(
            "  {}",
            style(format!("(replayed {replayed} earlier messages)")).dim()
        );
        println!();
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) = ChatInput::new(prompt)
        .map_err(|e| anyhow::anyhow!("failed to initialize input: {e}"))?;

    loop {
        let event = chat_input.read_line().await;
        match event {
            InputEvent::Eof => {
                println!("\n  {}", style("Session ended.").dim());
                break;
            }
            InputEvent::Interrupted => {
                println!(
                    "\n  {}",
                    style("Press Ctrl+D to exit, or keep chatting.").dim()
                );
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                if let Some(command) = commands::parse(&text) {
                    match command {
                        ChatCommand::Help => {
                            commands::print_help();
                            continue;
                        }
                        ChatCommand::Clear => {
                            chat_input.clear();
                            continue;
                        }
                        ChatCommand::Exit => {
                            println!("\n  {}", style("Session ended.").dim());
                            break;
                        }
                        ChatCommand::History => {
                            println!();
                            for message in orchestrator.transcript() {
                                print_message(message);
                            }
                            continue;
                        }
                        ChatCommand::Language(name) => {
                            if name.is_empty() {
                                commands::print_help();
                            } else {
                                let backend_name = backend_language(&name);
                                orchestrator.set_language(Some(backend_name.to_string()));
                                println!(
                                    "  {} replies now in {}",
                                    style("✓").green(),
                                    style(backend_name).cyan()
                                );
                            }
                            continue;
                        }
                    }
                }

                let spinner = new_spinner("thinking...");
                let outcome = orchestrator.submit_turn(&text).await;
                spinner.finish_and_clear();

                if outcome != TurnOutcome::Ignored {
                    if let Some(message) = orchestrator.transcript().last() {
                        print_message(message);
                    }
                }
            }
        }
    }

    Ok(())
}

/// Print the welcome banner.
fn print_banner(gateway_url: &str, session_id: &str, language: Option<&str>) {
    println!();
    println!(
        "  {} {}",
        style("🌴").bold(),
        style("TourMate").cyan().bold()
    );
    println!("  {}", style(format!("gateway: {gateway_url}")).dim());
    println!("  {}", style(format!("session: {session_id}")).dim());
    if let Some(language) = language {
        println!(
            "  {}",
            style(format!("language: {}", backend_language(language))).dim()
        );
    }
    println!("  {}", style("Type /help for commands.").dim());
    println!();
}

/// Print one transcript message, including any table payload.
fn print_message(message: &ChatMessage) {
    let label = match message.sender {
        Sender::User => style("You").green().bold(),
        Sender::Bot => style("TourMate").cyan().bold(),
    };
    println!(
        "  {} {}  {}",
        label,
        style(&message.timestamp).dim(),
        message.text
    );

    if let Some(rows) = &message.table_data {
        table::print_table(rows, message.table_insights.as_deref());
    }
}

/// Spinner shown while a gateway call is in flight.
fn new_spinner(message: &'static str) -> indicatif::ProgressBar {
    let spinner = indicatif::ProgressBar::new_spinner();
    spinner.set_style(
        indicatif::ProgressStyle::default_spinner()
            .template("  {spinner:.cyan} {msg}")
            .expect("valid spinner template"),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// Display-formatted time of day for locally generated messages.
fn now_display() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
