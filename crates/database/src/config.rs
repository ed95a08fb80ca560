/// Default location of the scheduler database file.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://scheduler.db";

/// Default upper bound on pooled connections.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Errors raised while reading database settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed
    #[error("Invalid value for {name}: {value}")]
    InvalidValue {
        /// Name of the offending variable
        name: &'static str,
        /// The raw value found in the environment
        value: String,
    },
}

/// Settings used to build the connection pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// sqlx connection URL, e.g. `sqlite://scheduler.db`
    pub url: String,
    /// Maximum number of pooled connections
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Reads `DATABASE_URL` and `DATABASE_MAX_CONNECTIONS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "DATABASE_MAX_CONNECTIONS",
                        value,
                    });
                }
            },
            None => DEFAULT_MAX_CONNECTIONS,
        };

        Ok(Self {
            url,
            max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = DatabaseConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, DatabaseConfig::default());
    }

    #[test]
    fn test_reads_overrides() {
        let config = DatabaseConfig::from_lookup(|name| match name {
            "DATABASE_URL" => Some("sqlite://other.db".to_string()),
            "DATABASE_MAX_CONNECTIONS" => Some("2".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.url, "sqlite://other.db");
        assert_eq!(config.max_connections, 2);
    }

    #[test]
    fn test_rejects_zero_connections() {
        let result = DatabaseConfig::from_lookup(|name| {
            (name == "DATABASE_MAX_CONNECTIONS").then(|| "0".to_string())
        });
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
