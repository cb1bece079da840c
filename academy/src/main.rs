use academy::{AppState, Config, app, init_logging};
use anyhow::Context;
use clap::Parser;
use std::net::SocketAddr;
use tracing::info;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = Config::parse();
    init_logging();

    let client = config.generation_client()?;
    let state = AppState::new(config.mentor(client));
    let app = app(state);

    let addr: SocketAddr = config
        .addr
        .parse()
        .with_context(|| format!("invalid bind address {}", config.addr))?;
    info!(%addr, backend = ?config.backend, "academic mentor listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
