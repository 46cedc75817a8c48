//! Persisted-session CLI commands.
//!
//! `tourmate session show` prints the stored id (if any); `tourmate session
//! clear` discards it so the next chat run mints a fresh session.

use clap::Subcommand;
use console::style;

use tourmate_core::session::store::SessionStore;
use tourmate_infra::config::resolve_data_dir;
use tourmate_infra::store::FileSessionStore;

/// Session store subcommands.
#[derive(Subcommand)]
pub enum SessionCommand {
    /// Show the persisted session id.
    Show,

    /// Discard the persisted session id.
    Clear,
}

pub async fn run(action: SessionCommand) -> anyhow::Result<()> {
    let store = FileSessionStore::new(&resolve_data_dir());

    match action {
        SessionCommand::Show => match store.load().await? {
            Some(id) => {
                println!("  session id: {}", style(id).cyan());
            }
            None => {
                println!("  {}", style("no session id stored").dim());
            }
        },
        SessionCommand::Clear => {
            store.clear().await?;
            println!("  {} session id cleared", style("✓").green());
        }
    }

    Ok(())
}
