//! # pulse-cli
//!
//! `pulse` — command-line client for InventoryPulse: sign in, watch the
//! real-time event stream, browse the catalog, manage the display theme.

#![deny(unsafe_code)]

mod watch;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use pulse_api::ApiClient;
use pulse_session::{SessionStore, Theme, load_theme, save_theme, toggle_theme};
use pulse_settings::{ClientSettings, load_settings};

/// InventoryPulse command-line client.
#[derive(Parser, Debug)]
#[command(name = "pulse", about = "InventoryPulse command-line client")]
struct Cli {
    /// Override the REST API base URL.
    #[arg(long)]
    api_url: Option<String>,

    /// Override the event stream URL.
    #[arg(long)]
    ws_url: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Sign in and persist the session.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long)]
        password: String,
    },
    /// Drop the persisted session.
    Logout,
    /// Stream real-time events until interrupted.
    Watch,
    /// List products.
    Products {
        /// 1-based page number.
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Items per page.
        #[arg(long, default_value_t = 10)]
        page_size: u32,
        /// Only products in this category.
        #[arg(long)]
        category_id: Option<u64>,
    },
    /// Show or change the display theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeCommand>,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Print the current theme.
    Show,
    /// Flip between light and dark.
    Toggle,
    /// Switch to the light theme.
    Light,
    /// Switch to the dark theme.
    Dark,
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

fn api_client(settings: &ClientSettings) -> ApiClient {
    let session = Arc::new(SessionStore::open(&settings.data_dir()));
    ApiClient::new(settings.api_url.clone(), session)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let mut settings = load_settings().context("failed to load settings")?;
    if let Some(api_url) = cli.api_url {
        settings.api_url = api_url;
    }
    if let Some(ws_url) = cli.ws_url {
        settings.ws_url = ws_url;
    }

    match cli.command {
        CliCommand::Login { email, password } => login(&settings, &email, &password).await,
        CliCommand::Logout => logout(&settings),
        CliCommand::Watch => watch::run(&settings).await,
        CliCommand::Products {
            page,
            page_size,
            category_id,
        } => products(&settings, page, page_size, category_id).await,
        CliCommand::Theme { action } => theme(&settings, action),
    }
}

async fn login(settings: &ClientSettings, email: &str, password: &str) -> Result<()> {
    let client = api_client(settings);
    let user = client
        .login(email, password)
        .await
        .context("login failed")?;
    println!("Signed in as {} ({})", user.email, user.role);
    Ok(())
}

fn logout(settings: &ClientSettings) -> Result<()> {
    let client = api_client(settings);
    client.logout().context("logout failed")?;
    println!("Signed out");
    Ok(())
}

async fn products(
    settings: &ClientSettings,
    page: u32,
    page_size: u32,
    category_id: Option<u64>,
) -> Result<()> {
    let client = api_client(settings);
    let listing = client
        .list_products(page, page_size, category_id)
        .await
        .context("failed to list products")?;

    println!(
        "{:<6} {:<30} {:<14} {:>8} {:>10}",
        "ID", "NAME", "SKU", "QTY", "PRICE"
    );
    for product in &listing.data {
        println!(
            "{:<6} {:<30} {:<14} {:>8} {:>10.2}",
            product.id, product.name, product.sku, product.quantity, product.price
        );
    }
    println!(
        "page {}/{} ({} items)",
        listing.page, listing.total_pages, listing.total_items
    );
    Ok(())
}

fn theme(settings: &ClientSettings, action: Option<ThemeCommand>) -> Result<()> {
    let data_dir = settings.data_dir();
    let theme = match action.unwrap_or(ThemeCommand::Show) {
        ThemeCommand::Show => load_theme(&data_dir),
        ThemeCommand::Toggle => toggle_theme(&data_dir).context("failed to save theme")?,
        ThemeCommand::Light => {
            save_theme(&data_dir, Theme::Light).context("failed to save theme")?;
            Theme::Light
        }
        ThemeCommand::Dark => {
            save_theme(&data_dir, Theme::Dark).context("failed to save theme")?;
            Theme::Dark
        }
    };
    println!("{theme}");
    Ok(())
}
