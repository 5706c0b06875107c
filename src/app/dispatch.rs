use crate::Config;
use crate::app::report::{render_report, render_week};
use crate::app::weekly::{RunMode, run_weekly};
use crate::calendar::week_of;
use crate::cli::commands::{Cli, Commands};
use crate::store::NotionStore;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use tracing::debug;

fn target_day(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Week { date } => {
            println!("{}", render_week(&week_of(target_day(date))));
            Ok(())
        }
        Commands::Create {
            date,
            dry_run,
            on_existing,
            no_month_index,
        } => {
            let config = Config::load(cli.config.as_deref())?;
            debug!(path = %config.config_path.display(), "loaded config");

            let mut settings = config.require_run_settings()?;
            if let Some(policy) = on_existing {
                settings.on_existing = policy;
            }
            if no_month_index {
                settings.month_index = None;
            }

            let store = NotionStore::from_config(&config.notion)?;
            let mode = if dry_run {
                RunMode::DryRun
            } else {
                RunMode::Apply
            };
            let report = run_weekly(&store, &settings, target_day(date), mode).await?;
            println!("{}", render_report(&report));
            Ok(())
        }
    }
}
