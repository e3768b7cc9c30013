use crate::cli::commands::{now, open_pool, resolve_caller};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::report::{EmployeeReport, Period, ReportLogic};
use crate::core::calculator::elapsed::break_duration;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{field, header, info};
use crate::utils::colors::{badge, colorize_optional};
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::time::{fmt_local_time, format_minutes, whole_minutes};
use crate::utils::{describe_break, mins2readable};
use chrono::Local;

/// Handle `report`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Report {
        period,
        employee,
        details,
    } = &cli.command
    else {
        return Ok(());
    };

    let caller = resolve_caller(cli, cfg)?;

    // Non-administrators only ever see their own sessions.
    let filter = match employee {
        Some(e) if caller.is_admin || *e == caller.employee_id => Some(e.clone()),
        Some(_) => return Err(AppError::NotAuthorized(caller.employee_id)),
        None if caller.is_admin => None,
        None => Some(caller.employee_id.clone()),
    };

    let period = Period::parse(period)?;
    let at = now(cli)?;
    let mut pool = open_pool(cfg)?;

    let reports = ReportLogic::period(&mut pool, period, filter.as_deref(), at, &cfg.break_policy)?;

    if reports.is_empty() {
        info(format!("No sessions found ({}).", period.label()));
        return Ok(());
    }

    println!("📅 Sessions ({})", period.label());
    for report in &reports {
        print_employee(report, *details, at);
    }

    Ok(())
}

fn print_employee(report: &EmployeeReport, details: bool, at: chrono::DateTime<chrono::Utc>) {
    header(&report.employee_id);

    let mut table = Table::new(vec![
        Column::new("ID", 5),
        Column::new("Date", 10),
        Column::new("In", 5),
        Column::new("Out", 5),
        Column::new("Status", 9),
        Column::new("Hours", 6),
        Column::new("Lunch", 5),
        Column::new("Other", 5),
        Column::new("Breaks", 10),
    ]);

    for s in &report.sessions {
        let session = &s.session;
        table.add_row(vec![
            session.id.to_string(),
            session.clock_in.with_timezone(&Local).format("%Y-%m-%d").to_string(),
            fmt_local_time(&session.clock_in),
            colorize_optional(
                &session
                    .clock_out
                    .as_ref()
                    .map(fmt_local_time)
                    .unwrap_or_else(|| "--:--".to_string()),
            ),
            session.status.to_db_str().to_string(),
            colorize_optional(
                &session
                    .total_hours_display()
                    .map(|h| format!("{:.2}", h))
                    .unwrap_or_else(|| "-".to_string()),
            ),
            format_minutes(s.usage.lunch_minutes()),
            format_minutes(s.usage.other_minutes()),
            badge(s.usage.status),
        ]);
    }

    print!("{}", table.render());

    if details {
        for s in &report.sessions {
            if s.breaks.is_empty() {
                continue;
            }
            println!("  #{}", s.session.id);
            for b in &s.breaks {
                let (label, color) = describe_break(b.break_type);
                let end = b
                    .break_end
                    .as_ref()
                    .map(fmt_local_time)
                    .unwrap_or_else(|| "open".to_string());
                println!(
                    "    {}{:<8}\x1b[0m {} - {:<5} {}",
                    color,
                    label,
                    fmt_local_time(&b.break_start),
                    end,
                    mins2readable(whole_minutes(break_duration(b, at)), false, false)
                );
            }
        }
    }

    println!();
    field("Total", bold(&format!("{:.2} h", report.total_hours)));
    if report.in_progress > 0 {
        field("Open", format!("{} session(s) in progress", report.in_progress));
    }
    for (kind, tally) in &report.tallies {
        field(
            kind.label(),
            format!(
                "{} break(s), {}",
                tally.count,
                mins2readable(tally.minutes(), false, false)
            ),
        );
    }
}
