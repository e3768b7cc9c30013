use crate::cli::commands::{open_pool, resolve_caller};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use crate::utils::time::fmt_local;
use std::io::{self, Write};

fn ask_confirmation(prompt: &str) -> AppResult<bool> {
    print!("{prompt} [y/N]: ");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let ans = input.trim().to_lowercase();
    Ok(ans == "y" || ans == "yes")
}

/// Handle `delete <session>`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Delete { session, yes } = &cli.command else {
        return Ok(());
    };

    let caller = resolve_caller(cli, cfg)?;
    if !caller.is_admin {
        return Err(AppError::NotAuthorized(caller.employee_id));
    }

    let mut pool = open_pool(cfg)?;
    let (target, breaks) = SessionLogic::load(&mut pool, *session)?;

    if !*yes {
        warning(format!(
            "Session #{} of {} (clock-in {}) and its {} break(s) will be removed.",
            target.id,
            target.employee_id,
            fmt_local(&target.clock_in),
            breaks.len()
        ));
        if !ask_confirmation("Proceed?")? {
            info("Operation cancelled.");
            return Ok(());
        }
    }

    SessionLogic::delete(&mut pool, &caller, *session)?;
    success(format!("Session #{} deleted.", session));
    Ok(())
}
