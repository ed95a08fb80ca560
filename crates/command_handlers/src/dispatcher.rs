use crate::account_handlers::*;
use crate::context::HandlerContext;
use crate::error::CommandError;
use crate::inventory_handlers::*;
use crate::schedule_handlers::*;
use crate::session::Session;

/// What the command loop should do after a line has been handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the reply and read the next line
    Reply(String),
    /// Print the farewell and stop
    Quit(String),
}

impl Outcome {
    /// The text to print
    pub fn text(&self) -> &str {
        match self {
            Outcome::Reply(text) | Outcome::Quit(text) => text,
        }
    }
}

/// Splits the line on whitespace, routes the operation to its handler and
/// turns any failure into its reply. Never fails.
pub async fn dispatch(ctx: &HandlerContext, session: &mut Session, line: &str) -> Outcome {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&operation, args)) = tokens.split_first() else {
        return Outcome::Reply("Please try again!".to_string());
    };

    log::debug!("Dispatching {} with {} argument(s)", operation, args.len());

    let result = match operation {
        "create_patient" => create_patient(ctx, session, args).await,
        "create_caregiver" => create_caregiver(ctx, session, args).await,
        "login_patient" => login_patient(ctx, session, args).await,
        "login_caregiver" => login_caregiver(ctx, session, args).await,
        "search_caregiver_schedule" => search_caregiver_schedule(ctx, session, args).await,
        "reserve" => reserve(ctx, session, args).await,
        "upload_availability" => upload_availability(ctx, session, args).await,
        "cancel" => cancel(ctx, session, args).await,
        "add_doses" => add_doses(ctx, session, args).await,
        "show_appointments" => show_appointments(ctx, session, args).await,
        "logout" => logout(session),
        "quit" => return Outcome::Quit("Bye!".to_string()),
        _ => Err(CommandError::Validation("Invalid operation name!".to_string())),
    };

    Outcome::Reply(result.unwrap_or_else(|e| e.reply()))
}
