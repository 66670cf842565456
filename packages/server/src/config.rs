use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CorsConfig {
    pub allow_origins: Vec<String>,
    pub max_age: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Argon2 PHC hash of the shared admin password. The plaintext password
    /// is never stored or compared client-side.
    pub admin_password_hash: String,
    /// Admin session token lifetime in minutes.
    pub session_ttl_minutes: i64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Filesystem,
    S3,
}

#[derive(Debug, Deserialize, Clone)]
pub struct S3Config {
    pub endpoint: String,
    pub region: String,
    pub access_key: String,
    pub secret_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Root directory for the filesystem backend.
    pub root: PathBuf,
    /// Base URL all public object URLs are rooted under.
    pub public_base_url: String,
    /// Maximum accepted size of a single uploaded image, in bytes.
    pub max_image_size: u64,
    /// Required when `backend` is `s3`.
    pub s3: Option<S3Config>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PricingConfig {
    /// Chat-completions endpoint of the valuation provider.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub pricing: PricingConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 3000)?
            .set_default("server.cors.allow_origins", Vec::<String>::new())?
            .set_default("server.cors.max_age", 3600)?
            .set_default("auth.session_ttl_minutes", 60)?
            .set_default("storage.backend", "filesystem")?
            .set_default("storage.root", "./data/media")?
            .set_default("storage.public_base_url", "http://127.0.0.1:3000/media")?
            .set_default("storage.max_image_size", 16 * 1024 * 1024)?
            // Load from config/config.toml
            .add_source(File::with_name("config/config").required(false))
            // Override from environment (e.g., MOTOMART__AUTH__JWT_SECRET)
            .add_source(Environment::with_prefix("MOTOMART").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
