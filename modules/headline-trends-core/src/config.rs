use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Contains only secrets and env-specific values; server tuning lives in the
/// TOML FileConfig.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Database
    pub database_url: String,
    pub database_max_connections: u32,
}

const DEFAULT_MAX_CONNECTIONS: u32 = 10;

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_keys();
        Ok(config)
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.is_empty())
            .context("DATABASE_URL environment variable is required")?;

        let database_max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS must be a number, got {raw:?}"))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            database_url: normalize_database_url(&database_url),
            database_max_connections,
        })
    }

    fn log_keys(&self) {
        let scheme = self.database_url.split("://").next().unwrap_or_default();
        tracing::info!("Config loaded:");
        tracing::info!("  DATABASE_URL: {scheme}://...({} chars)", self.database_url.len());
        tracing::info!("  DATABASE_MAX_CONNECTIONS: {}", self.database_max_connections);
    }
}

/// Hosting providers hand out `postgres://` URLs; rewrite to `postgresql://`.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{rest}"),
        None => url.to_string(),
    }
}
