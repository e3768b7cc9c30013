use crate::cli::commands::{open_pool, resolve_caller};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::session::{Correction, SessionLogic};
use crate::errors::AppResult;
use crate::ui::messages::{field, success};
use crate::utils::time::{fmt_local, parse_optional_datetime};

/// Handle `correct <session> [--in ..] [--out ..]`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Correct {
        session,
        clock_in,
        clock_out,
    } = &cli.command
    else {
        return Ok(());
    };

    let caller = resolve_caller(cli, cfg)?;
    let patch = Correction {
        clock_in: parse_optional_datetime(clock_in.as_ref())?,
        clock_out: parse_optional_datetime(clock_out.as_ref())?,
    };

    let mut pool = open_pool(cfg)?;
    let corrected = SessionLogic::correct(&mut pool, &caller, *session, &patch)?;

    success(format!(
        "Session #{} of {} corrected.",
        corrected.id, corrected.employee_id
    ));
    field("In", fmt_local(&corrected.clock_in));
    if let Some(out) = corrected.clock_out.as_ref() {
        field("Out", fmt_local(out));
    }
    field(
        "Worked",
        format!("{:.2} h", corrected.total_hours_display().unwrap_or_default()),
    );
    Ok(())
}
