use crate::db::cache::FEED_CACHE_TTL;
use crate::services::recommendation_service::DEFAULT_POPULAR_WINDOW_DAYS;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: Option<String>,
    pub port: u16,
    // Recommendation tuning
    pub popular_window_days: i64,
    pub feed_cache_ttl: usize,
    pub default_limit: i64,
}

impl Config {
    pub fn init() -> Config {
        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let redis_url = std::env::var("REDIS_URL").ok().filter(|url| !url.trim().is_empty());

        Config {
            database_url,
            redis_url,
            port: env_or("PORT", 8000),
            popular_window_days: env_or("RECO_POPULAR_WINDOW_DAYS", DEFAULT_POPULAR_WINDOW_DAYS),
            feed_cache_ttl: env_or("RECO_CACHE_TTL", FEED_CACHE_TTL),
            default_limit: env_or("RECO_DEFAULT_LIMIT", 10),
        }
    }
}

/// Parsed env var, or `default` when unset or unparsable.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{} has an invalid value {:?}; using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
