use std::sync::Arc;

use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::cache::ViewCache;
use crate::config::AppConfig;
use crate::pricing::PriceSuggester;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub blob_store: Arc<dyn BlobStore>,
    pub views: Arc<dyn ViewCache>,
    pub pricing: Arc<dyn PriceSuggester>,
    pub config: AppConfig,
}
