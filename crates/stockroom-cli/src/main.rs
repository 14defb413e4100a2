mod coordinator;
mod presenter;
mod products;
mod session;
mod shell;
mod stores;

use clap::{Parser, Subcommand};
use stockroom_client::InventoryClient;
use tracing_subscriber::EnvFilter;

use crate::coordinator::Coordinator;
use crate::products::ProductsCommands;
use crate::session::Session;
use crate::stores::StoresCommands;

#[derive(Debug, Parser)]
#[command(name = "stockroom")]
#[command(about = "Browse and manage stores and their products")]
struct Cli {
    /// API root, e.g. <http://localhost:3000/api>. Overrides `STOCKROOM_API_BASE_URL`.
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Interactive session (default)
    Shell,
    /// Store list, search, create and delete
    Stores {
        #[command(subcommand)]
        command: StoresCommands,
    },
    /// Product table operations for one store
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = stockroom_core::load_app_config()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = InventoryClient::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    tracing::debug!(base_url = %config.api_base_url, env = %config.env, "client ready");
    let mut session = Session::new(Coordinator::new(client, config.notification_ttl()));

    match cli.command {
        None | Some(Commands::Shell) => shell::run_shell(session).await,
        Some(Commands::Stores { command }) => {
            stores::run_stores(&mut session, command).await;
            finish(&session)
        }
        Some(Commands::Products { command }) => {
            products::run_products(&mut session, command).await;
            finish(&session)
        }
    }
}

/// Print the final screen of a one-shot command and turn a failed outcome
/// into a non-zero exit.
fn finish(session: &Session) -> anyhow::Result<()> {
    let screen = session.screen();
    println!("{}", presenter::render_text(screen));

    if screen.not_found {
        anyhow::bail!("the backend answered 404 Not found");
    }
    if let Some(error) = &screen.error {
        anyhow::bail!("{error}");
    }
    if session.coordinator().state().pending_validation_error {
        anyhow::bail!("the form was not submitted: fix the fields marked with !");
    }
    Ok(())
}

#[cfg(test)]
mod tests;
