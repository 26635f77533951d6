use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not a valid number: {value}")]
    NotANumber { name: &'static str, value: String },
}

/// Runtime settings, read once from the environment (and `.env` via dotenv).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    /// When unset, single-product reads are cached in-process instead.
    pub redis_url: Option<String>,
    pub cache_ttl_secs: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            jwt_secret: required("JWT_SECRET")?,
            port: numeric("PORT", 8080)?,
            redis_url: env::var("REDIS_URL").ok().filter(|v| !v.is_empty()),
            cache_ttl_secs: numeric("CACHE_TTL_SECS", 900)?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::Missing(name))
}

fn numeric<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_uses_port() {
        let config = AppConfig {
            database_url: "sqlite::memory:".into(),
            jwt_secret: "secret".into(),
            port: 3000,
            redis_url: None,
            cache_ttl_secs: 60,
        };
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }

    #[test]
    fn missing_error_names_the_variable() {
        assert_eq!(
            ConfigError::Missing("JWT_SECRET").to_string(),
            "JWT_SECRET must be set"
        );
    }
}
