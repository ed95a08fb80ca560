//! # Command Handlers for the Vaccine Scheduler
//!
//! This crate turns one line of user input into one reply. It owns the
//! login session, the per-command handlers and the dispatcher that routes
//! operations to them.

/// Shared handles passed to every handler
mod context;
pub use context::*;

/// Error type mapping failures to user-facing replies
mod error;
pub use error::*;

/// The currently logged-in account
mod session;
pub use session::*;

/// Account handlers (create, login, logout)
mod account_handlers;
pub use account_handlers::*;

/// Availability and appointment handlers
mod schedule_handlers;
pub use schedule_handlers::*;

/// Vaccine stock handlers
mod inventory_handlers;
pub use inventory_handlers::*;

/// Tokenizing and routing of input lines
mod dispatcher;
pub use dispatcher::*;
