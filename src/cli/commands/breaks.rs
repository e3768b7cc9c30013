use crate::cli::commands::{now, open_pool, resolve_caller};
use crate::cli::parser::{BreakAction, Cli, Commands};
use crate::config::Config;
use crate::core::breaks::BreakLogic;
use crate::core::calculator::elapsed::break_duration;
use crate::core::session::SessionLogic;
use crate::errors::{AppError, AppResult};
use crate::models::BreakType;
use crate::ui::messages::success;
use crate::utils::time::{fmt_local_time, format_clock};

/// Handle `break start <type>` / `break end` against the caller's active session.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Break { action } = &cli.command else {
        return Ok(());
    };

    let caller = resolve_caller(cli, cfg)?;
    let at = now(cli)?;
    let mut pool = open_pool(cfg)?;

    let (session, _) = SessionLogic::active_for(&mut pool, &caller.employee_id)?
        .ok_or_else(|| AppError::NoActiveSession(caller.employee_id.clone()))?;

    match action {
        BreakAction::Start { kind } => {
            let kind = BreakType::from_code(kind)
                .ok_or_else(|| AppError::InvalidBreakType(kind.to_string()))?;
            let record = BreakLogic::start(&mut pool, session.id, kind, at)?;
            success(format!(
                "{} break started at {} (break #{}).",
                record.break_type.label(),
                fmt_local_time(&record.break_start),
                record.id
            ));
        }
        BreakAction::End => {
            let record = BreakLogic::end(&mut pool, session.id, at)?;
            success(format!(
                "{} break ended at {} after {}.",
                record.break_type.label(),
                fmt_local_time(&at),
                format_clock(break_duration(&record, at))
            ));
        }
    }

    Ok(())
}
