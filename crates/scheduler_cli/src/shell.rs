use std::io::{self, Write};

use command_handlers::{HandlerContext, Outcome, Session, dispatch};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Commands listed in the greeting
const MENU: [&str; 12] = [
    "create_patient <username> <password>",
    "create_caregiver <username> <password>",
    "login_patient <username> <password>",
    "login_caregiver <username> <password>",
    "search_caregiver_schedule <date>",
    "reserve <date> <vaccine>",
    "upload_availability <date>",
    "cancel <appointment_id>",
    "add_doses <vaccine> <number>",
    "show_appointments",
    "logout",
    "quit",
];

/// Writes the welcome text and the command menu.
pub fn print_greeting<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Welcome to the COVID-19 Vaccine Reservation Scheduling Application!"
    )?;
    writeln!(out, "*** Please enter one of the following commands ***")?;
    for command in MENU {
        writeln!(out, "> {}", command)?;
    }
    writeln!(out)
}

/// Reads commands until `quit` or end of input, writing one reply per line.
///
/// Each line is handled to completion before the next one is read.
pub async fn run<R, W>(ctx: &HandlerContext, input: R, out: &mut W) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut session = Session::default();
    let mut lines = input.lines();

    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                log::info!("End of input, shutting down");
                writeln!(out, "Bye!")?;
                return Ok(());
            }
            // the undecodable bytes are already consumed, the next line reads normally
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                log::warn!("Skipping unreadable input line: {}", e);
                writeln!(out, "Please try again!")?;
                continue;
            }
            Err(e) => return Err(e),
        };

        match dispatch(ctx, &mut session, &line).await {
            Outcome::Reply(reply) => writeln!(out, "{}", reply)?,
            Outcome::Quit(farewell) => {
                writeln!(out, "{}", farewell)?;
                return Ok(());
            }
        }
    }
}
