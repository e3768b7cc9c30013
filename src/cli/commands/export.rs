use crate::cli::commands::{now, open_pool};
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::report::Period;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        force,
    } = &cli.command
    {
        let period = Period::parse(period)?;
        let at = now(cli)?;
        let mut pool = open_pool(cfg)?;

        ExportLogic::export(
            &mut pool,
            *format,
            file,
            period,
            at,
            &cfg.break_policy,
            *force,
        )?;
    }
    Ok(())
}
