use crate::cli::commands::{now, open_pool, resolve_caller};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calculator::classifier::classify;
use crate::core::session::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{field, success};
use crate::utils::colors::badge;
use crate::utils::time::fmt_local;

/// Handle `in`
pub fn handle_in(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let caller = resolve_caller(cli, cfg)?;
    let at = now(cli)?;
    let mut pool = open_pool(cfg)?;

    let session = SessionLogic::clock_in(&mut pool, &caller.employee_id, at)?;

    success(format!(
        "Clocked in as {} at {} (session #{}).",
        session.employee_id,
        fmt_local(&session.clock_in),
        session.id
    ));
    Ok(())
}

/// Handle `out`
pub fn handle_out(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Out { session } = &cli.command else {
        return Ok(());
    };

    let caller = resolve_caller(cli, cfg)?;
    let at = now(cli)?;
    let mut pool = open_pool(cfg)?;

    let session_id = match session {
        Some(id) => {
            let (target, _) = SessionLogic::load(&mut pool, *id)?;
            if target.employee_id != caller.employee_id && !caller.is_admin {
                return Err(AppError::NotAuthorized(caller.employee_id));
            }
            *id
        }
        None => {
            SessionLogic::active_for(&mut pool, &caller.employee_id)?
                .ok_or_else(|| AppError::NoActiveSession(caller.employee_id.clone()))?
                .0
                .id
        }
    };

    let (closed, breaks) = SessionLogic::clock_out(&mut pool, session_id, at)?;
    let usage = classify(&breaks, &cfg.break_policy);

    success(format!(
        "Clocked out at {} (session #{}).",
        fmt_local(&at),
        closed.id
    ));
    field(
        "Worked",
        format!("{:.2} h", closed.total_hours_display().unwrap_or_default()),
    );
    field(
        "Breaks",
        format!(
            "lunch {} min, other {} min → {}",
            usage.lunch_minutes(),
            usage.other_minutes(),
            badge(usage.status)
        ),
    );
    Ok(())
}
