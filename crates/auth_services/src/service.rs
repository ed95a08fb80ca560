use std::str::FromStr;

use bcrypt::{HashParts, hash_with_salt};
use sqlx::{Row, SqlitePool};
use validator::Validate;

use crate::types::{Account, AuthError, Credentials, Role};

/// Length of the random salt generated for every account.
pub const SALT_LENGTH: usize = 16;

/// A service for handling account operations such as registering patients and
/// caregivers and verifying their credentials.
pub struct AuthService {
    pool: SqlitePool,
    cost: u32,
}

impl AuthService {
    /// Creates a new instance of `AuthService` with the provided database connection pool,
    /// hashing new passwords with the given bcrypt cost.
    pub fn with_cost(pool: SqlitePool, cost: u32) -> Self {
        Self { pool, cost }
    }

    /// Returns whether an account with this username already exists for the role.
    pub async fn username_exists(&self, username: &str, role: Role) -> Result<bool, AuthError> {
        let existing = sqlx::query(&format!(
            "SELECT username FROM {} WHERE username = ?",
            role.table()
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(existing.is_some())
    }

    /// Registers a new account with the given role.
    ///
    /// The username is checked for uniqueness before the password is checked for strength.
    pub async fn register(
        &self,
        credentials: &Credentials,
        role: Role,
    ) -> Result<Account, AuthError> {
        if self.username_exists(&credentials.username, role).await? {
            return Err(AuthError::DuplicateUsername);
        }

        credentials.validate().map_err(|e| {
            if e.field_errors().contains_key("password") {
                AuthError::WeakPassword
            } else {
                AuthError::Validation(e.to_string())
            }
        })?;

        let salt: [u8; SALT_LENGTH] = rand::random();
        let password_hash = hash_password(&credentials.password, salt, self.cost)?;

        sqlx::query(&format!(
            "INSERT INTO {} (username, salt, password_hash) VALUES (?, ?, ?)",
            role.table()
        ))
        .bind(&credentials.username)
        .bind(&salt[..])
        .bind(&password_hash)
        .execute(&self.pool)
        .await?;

        log::info!("Registered {} account {}", role, credentials.username);

        Ok(Account {
            username: credentials.username.clone(),
            salt: salt.to_vec(),
            password_hash,
            role,
        })
    }

    /// Retrieves an account by username, returning `None` if not found.
    pub async fn get_account(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<Account>, AuthError> {
        let row = sqlx::query(&format!(
            "SELECT username, salt, password_hash FROM {} WHERE username = ?",
            role.table()
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|row| Account {
            username: row.get("username"),
            salt: row.get("salt"),
            password_hash: row.get("password_hash"),
            role,
        }))
    }

    /// Verifies a password by recomputing the hash with the stored salt.
    ///
    /// Returns `None` for an unknown username or a wrong password.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Option<Account>, AuthError> {
        let Some(account) = self.get_account(username, role).await? else {
            log::debug!("No {} account named {}", role, username);
            return Ok(None);
        };

        let salt: [u8; SALT_LENGTH] = account
            .salt
            .as_slice()
            .try_into()
            .map_err(|_| AuthError::CorruptSalt(account.username.clone()))?;
        let cost = HashParts::from_str(&account.password_hash)?.get_cost();

        if hash_password(password, salt, cost)? == account.password_hash {
            Ok(Some(account))
        } else {
            log::debug!("Password mismatch for {} {}", role, username);
            Ok(None)
        }
    }
}

fn hash_password(password: &str, salt: [u8; SALT_LENGTH], cost: u32) -> Result<String, AuthError> {
    Ok(hash_with_salt(password, cost, salt)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use database::create_in_memory_pool;

    const TEST_COST: u32 = 4;

    async fn service() -> AuthService {
        let pool = create_in_memory_pool().await.unwrap();
        AuthService::with_cost(pool, TEST_COST)
    }

    #[tokio::test]
    async fn test_register_stores_salted_hash() {
        let service = service().await;
        let account = service
            .register(&Credentials::new("carol", "Abc12345!"), Role::Caregiver)
            .await
            .unwrap();

        assert_eq!(account.username, "carol");
        assert_eq!(account.role, Role::Caregiver);
        assert_eq!(account.salt.len(), SALT_LENGTH);
        assert_ne!(account.password_hash, "Abc12345!");

        let stored = service
            .get_account("carol", Role::Caregiver)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored, account);
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected_per_role() {
        let service = service().await;
        let credentials = Credentials::new("pat", "Abc12345!");

        service.register(&credentials, Role::Patient).await.unwrap();
        let second = service.register(&credentials, Role::Patient).await;
        assert!(matches!(second, Err(AuthError::DuplicateUsername)));

        // the same name is free in the other role
        service.register(&credentials, Role::Caregiver).await.unwrap();
    }

    #[tokio::test]
    async fn test_duplicate_checked_before_strength() {
        let service = service().await;
        service
            .register(&Credentials::new("pat", "Abc12345!"), Role::Patient)
            .await
            .unwrap();

        let result = service
            .register(&Credentials::new("pat", "weak"), Role::Patient)
            .await;
        assert!(matches!(result, Err(AuthError::DuplicateUsername)));
    }

    #[tokio::test]
    async fn test_weak_password_rejected() {
        let service = service().await;
        let result = service
            .register(&Credentials::new("pat", "password1"), Role::Patient)
            .await;

        assert!(matches!(result, Err(AuthError::WeakPassword)));
        assert!(!service.username_exists("pat", Role::Patient).await.unwrap());
    }

    #[tokio::test]
    async fn test_authenticate() {
        let service = service().await;
        service
            .register(&Credentials::new("pat", "Abc12345!"), Role::Patient)
            .await
            .unwrap();

        let account = service
            .authenticate("pat", "Abc12345!", Role::Patient)
            .await
            .unwrap();
        assert_eq!(account.map(|a| a.username), Some("pat".to_string()));

        assert!(
            service
                .authenticate("pat", "Abc12345?", Role::Patient)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            service
                .authenticate("pat", "Abc12345!", Role::Caregiver)
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            service
                .authenticate("nobody", "Abc12345!", Role::Patient)
                .await
                .unwrap()
                .is_none()
        );
    }
}
