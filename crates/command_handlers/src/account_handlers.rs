use auth_services::types::{AuthError, Credentials, Role};

use crate::context::HandlerContext;
use crate::error::CommandError;
use crate::session::Session;

const CREATE_FAILED: &str = "Failed to create user.";
const LOGIN_FAILED: &str = "Login failed.";

/// Handles `create_patient <username> <password>`
pub async fn create_patient(
    ctx: &HandlerContext,
    session: &mut Session,
    args: &[&str],
) -> Result<String, CommandError> {
    create_account(ctx, session, args, Role::Patient).await
}

/// Handles `create_caregiver <username> <password>`
pub async fn create_caregiver(
    ctx: &HandlerContext,
    session: &mut Session,
    args: &[&str],
) -> Result<String, CommandError> {
    create_account(ctx, session, args, Role::Caregiver).await
}

/// Registers the account and makes it the current session.
async fn create_account(
    ctx: &HandlerContext,
    session: &mut Session,
    args: &[&str],
    role: Role,
) -> Result<String, CommandError> {
    let [username, password] = args else {
        return Err(CommandError::Validation(CREATE_FAILED.to_string()));
    };

    let account = ctx
        .auth_service()
        .register(&Credentials::new(*username, *password), role)
        .await
        .map_err(|e| match e {
            AuthError::DuplicateUsername => {
                CommandError::Auth("Username taken, try again!".to_string())
            }
            AuthError::WeakPassword => {
                CommandError::Auth("Password is not strong enough, try again!".to_string())
            }
            AuthError::Validation(_) => CommandError::Validation(CREATE_FAILED.to_string()),
            other => CommandError::storage(CREATE_FAILED, other),
        })?;

    let reply = format!("Created user {}", account.username);
    session.login(account);
    Ok(reply)
}

/// Handles `login_patient <username> <password>`
pub async fn login_patient(
    ctx: &HandlerContext,
    session: &mut Session,
    args: &[&str],
) -> Result<String, CommandError> {
    login(ctx, session, args, Role::Patient).await
}

/// Handles `login_caregiver <username> <password>`
pub async fn login_caregiver(
    ctx: &HandlerContext,
    session: &mut Session,
    args: &[&str],
) -> Result<String, CommandError> {
    login(ctx, session, args, Role::Caregiver).await
}

async fn login(
    ctx: &HandlerContext,
    session: &mut Session,
    args: &[&str],
    role: Role,
) -> Result<String, CommandError> {
    if session.is_logged_in() {
        return Err(CommandError::Auth("User already logged in.".to_string()));
    }

    let [username, password] = args else {
        return Err(CommandError::Validation(LOGIN_FAILED.to_string()));
    };

    let account = ctx
        .auth_service()
        .authenticate(username, password, role)
        .await
        .map_err(|e| CommandError::storage(LOGIN_FAILED, e))?
        .ok_or_else(|| CommandError::Auth(LOGIN_FAILED.to_string()))?;

    let reply = format!("Logged in as: {}", account.username);
    session.login(account);
    Ok(reply)
}

/// Handles `logout`
pub fn logout(session: &mut Session) -> Result<String, CommandError> {
    if !session.logout() {
        return Err(CommandError::Auth("Please login first.".to_string()));
    }

    Ok("Successfully logged out!".to_string())
}
