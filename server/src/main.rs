use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use workout_server::{logging, Config, RecordStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load().context("loading configuration")?;
    logging::init_logging(&config.log.level);

    let store = RecordStore::open(&config.storage)
        .await
        .context("opening record store")?;
    info!(records = store.len().await?, "record store ready");

    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    workout_server::run_until(listener, store.clone(), shutdown_signal()).await?;

    store.close().await.context("closing record store")?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "could not listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
