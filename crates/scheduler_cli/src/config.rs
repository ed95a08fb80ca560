use database::{ConfigError, DatabaseConfig};

/// Lowest cost bcrypt accepts.
pub const MIN_BCRYPT_COST: u32 = 4;

/// Highest cost bcrypt accepts.
pub const MAX_BCRYPT_COST: u32 = 31;

/// Runtime settings for the scheduler, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Where and how to connect to the database
    pub database: DatabaseConfig,
    /// bcrypt cost used when hashing new passwords
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Reads `DATABASE_URL`, `DATABASE_MAX_CONNECTIONS` and `BCRYPT_COST`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database = DatabaseConfig::from_lookup(&lookup)?;

        let bcrypt_cost = match lookup("BCRYPT_COST") {
            Some(value) => match value.trim().parse::<u32>() {
                Ok(cost) if (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&cost) => cost,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "BCRYPT_COST",
                        value,
                    });
                }
            },
            None => bcrypt::DEFAULT_COST,
        };

        Ok(Self {
            database,
            bcrypt_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.database, DatabaseConfig::default());
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        let with_cost = |cost: &'static str| {
            AppConfig::from_lookup(move |name| (name == "BCRYPT_COST").then(|| cost.to_string()))
        };

        assert_eq!(with_cost("4").unwrap().bcrypt_cost, 4);
        assert!(with_cost("3").is_err());
        assert!(with_cost("32").is_err());
        assert!(with_cost("fast").is_err());
    }
}
