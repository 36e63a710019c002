use calorie_tracker::{AppState, Config, Dashboard, FileStore, Storage, Tracker, router};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = Config::from_env();

    let store = FileStore::open(&config.data_path)?;
    info!("using data file {}", store.path().display());

    let mut tracker = Tracker::new(Storage::new(store), Dashboard::new());
    tracker.load_items();
    let state = AppState::new(tracker);

    let addr = config.socket_addr();
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
    }
}
