mod grid;

use chrono::Local;
use clap::{Parser, Subcommand};

use contribcal::config::Config;
use contribcal::logging::{self, LogTarget};
use contribcal::services::CalendarQuery;
use contribcal::types::Locale;

use grid::{CalendarArgs, GridArgs};

/// Contribution calendar for blog posts and life records
#[derive(Parser)]
#[command(name = "contribcal")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// API base URL (overrides config and CONTRIBCAL_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Locale for links and labels (zh, en)
    #[arg(long, global = true)]
    locale: Option<String>,

    /// Log level or filter directive
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch interactive TUI (default)
    Tui(CalendarArgs),

    /// Print the calendar grid
    Grid(GridArgs),
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        // Config loading and locale parsing log, so the subscriber goes first
        logging::init(&self.log_level, self.log_target()?)?;

        let mut config = Config::load()?;
        if let Some(url) = self.api_url.filter(|u| !u.trim().is_empty()) {
            config.api_url = url;
        }
        if let Some(tag) = self.locale.as_deref() {
            config.locale = Locale::parse(tag);
        }

        let today = Local::now().date_naive();
        match self.command {
            None => run_tui(config, CalendarArgs::default(), today),
            Some(Commands::Tui(args)) => run_tui(config, args, today),
            Some(Commands::Grid(args)) => {
                args.run(&config, today)?;
                Ok(())
            }
        }
    }

    /// The TUI owns the terminal, so it logs to a file
    fn log_target(&self) -> anyhow::Result<LogTarget> {
        match self.command {
            Some(Commands::Grid(_)) => Ok(LogTarget::Stderr),
            None | Some(Commands::Tui(_)) => Ok(LogTarget::File(
                Config::data_dir()?.join("contribcal.log"),
            )),
        }
    }
}

fn run_tui(config: Config, args: CalendarArgs, today: chrono::NaiveDate) -> anyhow::Result<()> {
    let query = CalendarQuery {
        kind: args.kind(&config),
        span: args.span(today),
    };
    tracing::info!(kind = query.kind.as_str(), span = %query.span.label(), "starting tui");
    contribcal::tui::run(config, query, today)
}
