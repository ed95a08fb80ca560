use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::password::validate_password_strength;

/// The two kinds of account the scheduler knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Books and cancels appointments
    Patient,
    /// Publishes availability and manages vaccine stock
    Caregiver,
}

impl Role {
    /// Name of the table holding accounts with this role.
    pub fn table(&self) -> &'static str {
        match self {
            Role::Patient => "patients",
            Role::Caregiver => "caregivers",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Patient => write!(f, "patient"),
            Role::Caregiver => write!(f, "caregiver"),
        }
    }
}

/// Username and password pair supplied on registration
#[derive(Debug, Validate)]
pub struct Credentials {
    /// Username of the account
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Plaintext password, checked against the strength policy
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
}

impl Credentials {
    /// Creates a new credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Account model representing the database schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// Unique username within the role
    pub username: String,
    /// Random salt the password hash was computed with
    pub salt: Vec<u8>,
    /// bcrypt hash of the password
    pub password_hash: String,
    /// Whether this is a patient or a caregiver
    pub role: Role,
}

/// Custom error type for authentication-related errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// The username already exists for this role
    #[error("Username already exists")]
    DuplicateUsername,

    /// The password does not satisfy the strength policy
    #[error("Password is not strong enough")]
    WeakPassword,

    /// The stored salt has an unexpected length
    #[error("Stored salt for {0} is corrupt")]
    CorruptSalt(String),

    /// A database error occurred
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An error occurred while hashing the password
    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// An error occurred while validating input data
    #[error("Validation error: {0}")]
    Validation(String),
}
