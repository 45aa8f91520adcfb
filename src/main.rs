use anyhow::{Context, Result};
use std::net::SocketAddr;
use tracing::info;
use tracing_subscriber::EnvFilter;

use recipe_recommender::cli::parse_args;
use recipe_recommender::web::{router, AppState};
use recipe_recommender::RecipeRecommender;

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli_args = parse_args();
    init_tracing(cli_args.debug);

    // Dataset, encoders and index are all built before anything is served.
    let recommender = RecipeRecommender::from_csv(&cli_args.dataset).with_context(|| {
        format!("Failed to build recommender from '{}'", cli_args.dataset.display())
    })?;

    let state = AppState::new(recommender, cli_args.truncate_length, cli_args.debug)
        .context("Failed to load page templates")?;

    let addr: SocketAddr = cli_args
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address {}", cli_args.bind))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, debug = cli_args.debug, "serving recipe recommendations");

    axum::serve(listener, router(state))
        .await
        .context("server shutdown")?;
    Ok(())
}
