//! # Vaccine Scheduling
//!
//! This crate provides vaccine dose inventory, caregiver availability and the
//! reservation workflow that ties them together. All state lives in the
//! database; the services only hold a connection pool.

/// Types for inventory, availability and reservation operations
mod scheduling_types;
pub use scheduling_types::*;

/// Parsing of `yyyy-mm-dd` dates from user input
mod date;
pub use date::*;

/// Service for vaccine dose stock
mod inventory;
pub use inventory::*;

/// Service for caregiver availability slots
mod availability;
pub use availability::*;

/// Booking and cancellation across inventory and availability
mod reservation;
pub use reservation::*;

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    pub async fn pool() -> SqlitePool {
        database::create_in_memory_pool().await.unwrap()
    }

    pub async fn add_caregiver(pool: &SqlitePool, username: &str) {
        sqlx::query("INSERT INTO caregivers (username, salt, password_hash) VALUES (?, X'00', 'x')")
            .bind(username)
            .execute(pool)
            .await
            .unwrap();
    }

    pub async fn add_patient(pool: &SqlitePool, username: &str) {
        sqlx::query("INSERT INTO patients (username, salt, password_hash) VALUES (?, X'00', 'x')")
            .bind(username)
            .execute(pool)
            .await
            .unwrap();
    }
}
