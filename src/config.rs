use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    pub tables: TableSettings,
    pub geocoder: GeocoderSettings,
    pub cache: CacheSettings,
    pub discovery: DiscoverySettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_books_table")]
    pub books: String,
    #[serde(default = "default_wishlists_table")]
    pub wishlists: String,
    #[serde(default = "default_profiles_table")]
    pub profiles: String,
}

fn default_books_table() -> String { "books".to_string() }
fn default_wishlists_table() -> String { "wishlists".to_string() }
fn default_profiles_table() -> String { "profiles".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct GeocoderSettings {
    #[serde(default = "default_geocoder_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_geocoder_user_agent")]
    pub user_agent: String,
}

fn default_geocoder_endpoint() -> String {
    "https://nominatim.openstreetmap.org".to_string()
}

fn default_geocoder_user_agent() -> String {
    format!("bookswap-match/{}", env!("CARGO_PKG_VERSION"))
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub redis_url: String,
    pub ttl_secs: Option<u64>,
    pub l1_cache_size: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiscoverySettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub tiers: TiersConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TiersConfig {
    #[serde(default = "default_double_match_score")]
    pub double_match: f64,
    #[serde(default = "default_wishlist_match_score")]
    pub wishlist_match: f64,
}

impl Default for TiersConfig {
    fn default() -> Self {
        Self {
            double_match: default_double_match_score(),
            wishlist_match: default_wishlist_match_score(),
        }
    }
}

fn default_double_match_score() -> f64 { 1000.0 }
fn default_wishlist_match_score() -> f64 { 100.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SWAP_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SWAP_)
            // e.g., SWAP_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SWAP")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the common deployment environment variables as overrides
///
/// SUPABASE_URL / SUPABASE_SERVICE_KEY and REDIS_URL are the names the
/// hosting platform injects; they win over the SWAP__-prefixed forms.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let supabase_url = env::var("SUPABASE_URL")
        .or_else(|_| env::var("SWAP_SUPABASE__URL"))
        .ok();
    let supabase_api_key = env::var("SUPABASE_SERVICE_KEY")
        .or_else(|_| env::var("SWAP_SUPABASE__API_KEY"))
        .ok();
    let redis_url = env::var("REDIS_URL")
        .or_else(|_| env::var("SWAP_CACHE__REDIS_URL"))
        .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string());

    let mut builder = Config::builder()
        .add_source(settings)
        .set_override("cache.redis_url", redis_url)?;

    if let Some(url) = supabase_url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(api_key) = supabase_api_key {
        builder = builder.set_override("supabase.api_key", api_key)?;
    }

    builder.build()
}
