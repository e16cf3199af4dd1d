//src/main.rs

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use seiwa::config::{AppConfig, AppState};

#[derive(Parser)]
#[command(name = "seiwa")]
#[command(about = "Back-office de escalas médicas: médicos, hospitais, produções e repasses")]
struct Cli {
    /// URL base da API (sobrescreve API_URL)
    #[arg(long)]
    api_url: Option<String>,
    /// Itens por página nas listagens (sobrescreve PAGE_SIZE)
    #[arg(long)]
    page_size: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs vão para o stderr; o stdout é da interface
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("seiwa=warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut config = AppConfig::from_env().context("Falha ao ler a configuração")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(page_size) = cli.page_size.filter(|size| *size > 0) {
        config.page_size = page_size;
    }

    let app_state = AppState::new(config);
    tracing::info!("🚀 Seiwa iniciado");

    seiwa::terminal::run(app_state).await
}
