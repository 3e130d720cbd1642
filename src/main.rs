use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tripr::config::AppConfig;
use tripr::error::AppError;
use tripr::routes::create_router;
use tripr::services::{kv::FileStore, storage::TripStorage, store::TripStore};
use tripr::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = AppConfig::from_env()?;

    let files = FileStore::new(config.data_dir.clone());
    files.ensure_structure().await?;
    info!("storing trips under {}", files.item_path(&config.storage_key).display());

    let storage = TripStorage::with_key(Arc::new(files), config.storage_key.as_str());
    let trips = TripStore::new(storage);
    trips.load().await;
    info!("loaded {} trips", trips.trips().len());

    let state = AppState::new(config.clone(), trips);
    let app = create_router(state);

    let listener = TcpListener::bind(config.listen_addr).await?;
    info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    let filter_layer = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tripr=debug".into());

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();
}
