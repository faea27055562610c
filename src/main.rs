use introspection_journal::{router, AppState, Config, LogStore};
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();
    let store = LogStore::new(&config.data_path);

    match store.load().await {
        Ok(loaded) => {
            if let Some(recovery) = loaded.recovery {
                warn!("{}", recovery.message());
            }
            info!(
                path = %store.path().display(),
                days = loaded.journal.days.len(),
                "journal ready"
            );
        }
        Err(err) => warn!(path = %store.path().display(), "journal not readable yet: {err}"),
    }

    let app = router(AppState::new(store));

    info!("listening on http://{}", config.bind_addr);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!("failed to listen for ctrl-c: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
