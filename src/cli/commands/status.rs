use crate::cli::commands::{now, open_pool, resolve_caller};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::calculator::classifier::classify;
use crate::core::session::SessionLogic;
use crate::core::ticker::{LiveSnapshot, LiveTicker};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{field, header, info, warning};
use crate::utils::colors::badge;
use crate::utils::describe_break;
use crate::utils::time::{Clock, SystemClock, fmt_local, format_clock};
use std::time::Duration;

/// Handle `status [--watch [--seconds N]]`
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Status { watch, seconds } = &cli.command else {
        return Ok(());
    };

    let caller = resolve_caller(cli, cfg)?;
    let mut pool = open_pool(cfg)?;

    let Some((session, breaks)) = SessionLogic::active_for(&mut pool, &caller.employee_id)? else {
        info(format!("{} is not clocked in.", caller.employee_id));
        return Ok(());
    };

    let at = now(cli)?;
    let snapshot = LiveSnapshot::capture(&session, &breaks, at);
    let usage = classify(&breaks, &cfg.break_policy);

    header(format!("Session #{} · {}", session.id, session.employee_id));
    field("In", fmt_local(&session.clock_in));
    field("Worked", format_clock(snapshot.worked));
    field("Break", describe_open_break(&snapshot));
    field(
        "Usage",
        format!(
            "lunch {} min, other {} min → {}",
            usage.lunch_minutes(),
            usage.other_minutes(),
            badge(usage.status)
        ),
    );

    if *watch {
        if cli.at.is_some() {
            warning("--at is ignored while watching; live counters use the wall clock.");
        }
        println!();
        watch_session(pool, session.id, cfg.tick_seconds, *seconds)?;
    }

    Ok(())
}

fn describe_open_break(snapshot: &LiveSnapshot) -> String {
    match snapshot.open_break {
        Some((kind, elapsed)) => {
            let (label, color) = describe_break(kind);
            format!("{}{}\x1b[0m for {}", color, label, format_clock(elapsed))
        }
        None => "-".to_string(),
    }
}

/// Refresh the counters until Ctrl-C, the optional deadline, or clock-out.
fn watch_session(
    mut pool: DbPool,
    session_id: i64,
    tick_seconds: u64,
    seconds: Option<u64>,
) -> AppResult<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut handle = LiveTicker::every_seconds(tick_seconds).spawn(move || {
            let (session, breaks) = SessionLogic::load(&mut pool, session_id)?;
            Ok(LiveSnapshot::capture(&session, &breaks, SystemClock.now()))
        });

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let deadline = async {
            match seconds {
                Some(s) => tokio::time::sleep(Duration::from_secs(s)).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(deadline);

        let outcome = loop {
            tokio::select! {
                _ = &mut ctrl_c => break Ok(()),
                _ = &mut deadline => break Ok(()),
                next = handle.next() => match next {
                    Some(Ok(snapshot)) => {
                        println!(
                            "{}  worked {}  break {}",
                            snapshot.at.with_timezone(&chrono::Local).format("%H:%M:%S"),
                            format_clock(snapshot.worked),
                            describe_open_break(&snapshot)
                        );
                        if !snapshot.active {
                            info(format!("Session #{} has been closed.", session_id));
                            break Ok(());
                        }
                    }
                    Some(Err(e)) => break Err(e),
                    None => break Ok(()),
                },
            }
        };

        handle.shutdown().await;
        outcome
    })
}
