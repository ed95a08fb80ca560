//! # Database
//!
//! This crate provides the SQLite connection pool and schema bootstrap for the
//! vaccine scheduler.

/// Database connection settings read from the environment.
pub mod config;
pub use config::*;

/// Connection pool creation, schema bootstrap and connectivity checks.
pub mod database;
pub use database::*;
