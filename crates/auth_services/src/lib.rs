//! # Auth Services
//!
//! This crate provides account registration and authentication for patients and caregivers.
//! Passwords are salted and hashed with bcrypt and never stored in plaintext.

/// Password strength policy.
pub mod password;
/// Service definitions for account registration and authentication operations.
pub mod service;
/// Types and structures used in authentication services.
pub mod types;
