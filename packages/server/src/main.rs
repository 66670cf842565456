use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{Level, info};
use url::Url;

use common::storage::filesystem::FilesystemBlobStore;
use common::storage::s3::S3BlobStore;
use common::storage::BlobStore;
use server::cache::LoggingViewCache;
use server::config::{AppConfig, StorageBackend};
use server::pricing::HttpPriceSuggester;
use server::state::AppState;
use server::{build_router, database};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let config = AppConfig::load()?;

    let db = database::init_db(&config.database.url).await?;

    let public_base = Url::parse(&config.storage.public_base_url)?;
    let blob_store: Arc<dyn BlobStore> = match config.storage.backend {
        StorageBackend::Filesystem => Arc::new(
            FilesystemBlobStore::new(
                config.storage.root.clone(),
                public_base,
                config.storage.max_image_size,
            )
            .await?,
        ),
        StorageBackend::S3 => {
            let s3 = config
                .storage
                .s3
                .clone()
                .ok_or_else(|| anyhow::anyhow!("storage.s3 must be configured for the s3 backend"))?;
            Arc::new(S3BlobStore::new(
                s3.endpoint,
                s3.region,
                &s3.access_key,
                &s3.secret_key,
                public_base,
            )?)
        }
    };

    let state = AppState {
        db,
        blob_store,
        views: Arc::new(LoggingViewCache),
        pricing: Arc::new(HttpPriceSuggester::new(config.pricing.clone())),
        config: config.clone(),
    };

    let app = build_router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server running at http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
