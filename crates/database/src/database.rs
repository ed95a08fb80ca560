use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};

use crate::config::DatabaseConfig;

/// Tables backing accounts, vaccine stock and caregiver availability.
const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS patients (
        username TEXT PRIMARY KEY,
        salt BLOB NOT NULL,
        password_hash TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS caregivers (
        username TEXT PRIMARY KEY,
        salt BLOB NOT NULL,
        password_hash TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS vaccines (
        name TEXT PRIMARY KEY,
        doses INTEGER NOT NULL CHECK (doses >= 0)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS availabilities (
        appointment_id INTEGER PRIMARY KEY AUTOINCREMENT,
        caregiver_username TEXT NOT NULL REFERENCES caregivers(username),
        slot_date TEXT NOT NULL,
        vaccine_name TEXT REFERENCES vaccines(name),
        patient_username TEXT REFERENCES patients(username)
    )
    "#,
];

/// Creates a connection pool to the SQLite database described by `config`,
/// creating the database file if it does not exist yet.
pub async fn create_connection_pool(config: &DatabaseConfig) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await
}

/// Creates a private in-memory database with the schema already in place.
///
/// The pool holds exactly one connection that is never recycled, since every
/// SQLite in-memory connection is its own database.
pub async fn create_in_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;
    Ok(pool)
}

/// Creates the scheduler tables if they are missing.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }

    log::debug!("Database schema ready");
    Ok(())
}

/// Tests the database connection by executing a simple query.
pub async fn test_connection(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let row = sqlx::query("SELECT 1 AS test").fetch_one(pool).await?;

    let test_value: i64 = row.get("test");
    log::info!("✅ Database connection successful! Test value: {}", test_value);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_pool_has_schema() {
        let pool = create_in_memory_pool().await.unwrap();
        test_connection(&pool).await.unwrap();

        let tables: Vec<String> = sqlx::query(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(&pool)
        .await
        .unwrap()
        .iter()
        .map(|row| row.get("name"))
        .collect();

        assert_eq!(
            tables,
            vec!["availabilities", "caregivers", "patients", "vaccines"]
        );
    }

    #[tokio::test]
    async fn test_init_schema_is_idempotent() {
        let pool = create_in_memory_pool().await.unwrap();
        init_schema(&pool).await.unwrap();
    }

    #[tokio::test]
    async fn test_negative_doses_rejected_by_storage() {
        let pool = create_in_memory_pool().await.unwrap();

        let result = sqlx::query("INSERT INTO vaccines (name, doses) VALUES ('Pfizer', -1)")
            .execute(&pool)
            .await;

        assert!(result.is_err());
    }
}
