use crate::config::OnExisting;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// `weekpage` - Creates this week's Notion page from a day template.
#[derive(Parser, Debug)]
#[command(name = "weekpage")]
#[command(version)]
#[command(about = "Create this week's Notion page from a day template.", long_about = None)]
pub struct Cli {
    /// Config file (default: ~/.weekpage/config.toml)
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the page for the week containing today (or --date)
    Create {
        /// Any day of the target week, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Read everything and print the plan without writing
        #[arg(long)]
        dry_run: bool,

        /// What to do when the week's page already exists
        #[arg(long, value_enum)]
        on_existing: Option<OnExisting>,

        /// Skip filing the page under its month
        #[arg(long)]
        no_month_index: bool,
    },

    /// Print the week, previous-week and month labels
    Week {
        /// Any day of the target week, YYYY-MM-DD
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}
