// src/cli.rs
use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use tracing::error;

use crate::config::{AppOptions, OnCorrupt};
use crate::log::{self, LogOptions};
use crate::runner::{self, RunOptions};
use crate::specs::JmaWeekSource;
use crate::store::{JsonFileStore, WindowStore};
use crate::window::{Reading, Window};

#[derive(Parser, Debug)]
#[command(
    name = "forecast_window",
    version,
    about = "Keep a rolling weekly forecast window on disk"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// TOML config file; flags override it.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Persisted window file.
    #[arg(short = 'o', long = "out", global = true)]
    pub out: Option<PathBuf>,

    /// Number of day slots in the window.
    #[arg(long, global = true)]
    pub days: Option<usize>,

    /// Debug logging (unless FORECAST_LOG is set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also append log lines to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch the page and merge it into the stored window (default).
    Run(RunArgs),
    /// Print the stored window without fetching.
    Show,
}

#[derive(Args, Debug, Default, Clone)]
pub struct RunArgs {
    /// Forecast page URL.
    #[arg(long)]
    pub url: Option<String>,
    /// City heading the temperature rows.
    #[arg(long)]
    pub city: Option<String>,
    /// Region heading the icon row.
    #[arg(long)]
    pub region: Option<String>,
    /// Prefix stored for icon references.
    #[arg(long)]
    pub icon_root: Option<String>,
    /// What to do with an unreadable stored window.
    #[arg(long, value_enum)]
    pub on_corrupt: Option<OnCorrupt>,
    /// Day of month to treat as today.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=31))]
    pub today: Option<u8>,
    /// Merge but do not write.
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    log::init(&LogOptions { verbose: cli.verbose, file: cli.log_file.clone() })
        .wrap_err("cannot set up logging")?;

    let result = dispatch(cli);
    if let Err(e) = &result {
        error!(error = %e, "run failed");
    }
    result
}

fn dispatch(cli: Cli) -> Result<()> {
    let run_args = match &cli.command {
        Some(Command::Run(a)) => a.clone(),
        Some(Command::Show) => {
            let opts = resolve_options(&cli, &RunArgs::default())?;
            return show(&opts);
        }
        None => RunArgs::default(),
    };
    let opts = resolve_options(&cli, &run_args)?;

    let mut source = JmaWeekSource::new(opts.source.clone(), opts.window.days);
    let store = JsonFileStore::new(&opts.store.path, opts.window.days);
    let run_opts = RunOptions {
        days: opts.window.days,
        today: run_args.today,
        on_corrupt: opts.store.on_corrupt,
        dry_run: run_args.dry_run,
    };

    let summary = runner::run(&mut source, &store, &run_opts)?;

    match &summary.saved_to {
        Some(p) => println!("Wrote {}", p.display()),
        None => print!("{}", format_window(&summary.window)),
    }
    Ok(())
}

/// Config file (if any), then flags on top.
pub fn resolve_options(cli: &Cli, args: &RunArgs) -> Result<AppOptions> {
    let mut opts = match &cli.config {
        Some(path) => AppOptions::from_file(path)?,
        None => AppOptions::default(),
    };

    if let Some(p) = &cli.out {
        opts.store.path = p.clone();
    }
    if let Some(d) = cli.days {
        opts.window.days = d;
    }
    if let Some(u) = &args.url {
        opts.source.url = u.clone();
    }
    if let Some(c) = &args.city {
        opts.source.city = c.clone();
    }
    if let Some(r) = &args.region {
        opts.source.region = r.clone();
    }
    if let Some(r) = &args.icon_root {
        opts.source.icon_root = r.clone();
    }
    if let Some(oc) = args.on_corrupt {
        opts.store.on_corrupt = oc;
    }

    opts.validate()?;
    Ok(opts)
}

fn show(opts: &AppOptions) -> Result<()> {
    let store = JsonFileStore::new(&opts.store.path, opts.window.days);
    match store.load()? {
        Some(w) => print!("{}", format_window(&w)),
        None => println!("No stored window at {}", store.path().display()),
    }
    Ok(())
}

/// One line per slot: day, max, min, icon URL. `--` marks missing values.
pub fn format_window(w: &Window) -> String {
    let mut out = String::new();
    for (i, d) in w.days().iter().enumerate() {
        if d.is_empty() {
            let _ = writeln!(out, "--");
            continue;
        }
        let min = match d.min_temperature {
            Reading::Value(v) => v.to_string(),
            Reading::Unavailable => "--".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>2}  {:>3}  {:>3}  {}",
            d.day_of_month,
            d.max_temperature,
            min,
            w.icon_url(i)
        );
    }
    out
}
