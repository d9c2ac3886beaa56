//! # Mishna Harvest CLI (`mishna`)
//!
//! Fetches the Mishnah tractate by tractate from the remote text API and
//! writes one JSON file per tractate, plus `_summary.json`.
//!
//! ## Usage
//!
//! ```bash
//! mishna --config ./config/mishna.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `mishna test` | Fetch Berakhot only, as a smoke test |
//! | `mishna all` | Fetch every tractate (asks first unless `--yes`), then summarize |
//! | `mishna unit <group> <unit>` | Fetch one tractate |
//! | `mishna summary` | Rebuild `_summary.json` from files on disk |
//! | `mishna catalog` | List the catalog |
//!
//! If the config file does not exist, built-in defaults are used.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mishna_harvest::catalog::Catalog;
use mishna_harvest::progress::ProgressMode;
use mishna_harvest::{catalog_cmd, config, harvest_cmd, stats};

/// Mishna Harvest: fetch the Mishnah into per-tractate JSON files.
#[derive(Parser)]
#[command(
    name = "mishna",
    about = "Fetch the Mishnah from a remote text API into per-tractate JSON files",
    version
)]
struct Cli {
    /// Path to configuration file (TOML). Defaults apply when it is absent.
    #[arg(long, global = true, default_value = "./config/mishna.toml")]
    config: PathBuf,

    /// Progress output on stderr: `human`, `json`, or `off`.
    /// Defaults to `human` when stderr is a terminal.
    #[arg(long, global = true)]
    progress: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a single default tractate (Berakhot) as a smoke test.
    Test,

    /// Fetch every tractate in the catalog.
    ///
    /// Units are fetched one at a time with fixed pauses between requests,
    /// so a full run takes a long time. A unit that fails does not stop the
    /// run; failures are listed at the end.
    All {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,

        /// Do not rebuild `_summary.json` after the run.
        #[arg(long)]
        no_summary: bool,
    },

    /// Fetch one tractate by group (seder) and unit (masechet) name.
    Unit {
        /// Group name as it appears in the catalog, e.g. `זרעים`.
        group: String,
        /// Unit name as it appears in the catalog, e.g. `ברכות`.
        unit: String,
    },

    /// Rebuild the summary file from persisted tractate files and print it.
    Summary,

    /// List groups, units, external ids and section counts.
    Catalog,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_or_default(&cli.config)?;
    let catalog = match &cfg.catalog.path {
        Some(path) => Catalog::load(path)?,
        None => Catalog::builtin()?,
    };

    let mode = match cli.progress.as_deref() {
        Some(value) => ProgressMode::parse(value)?,
        None => ProgressMode::default_for_tty(),
    };

    match cli.command {
        Commands::Test => {
            harvest_cmd::run_smoke_test(&cfg, &catalog, mode.reporter())?;
        }
        Commands::All { yes, no_summary } => {
            harvest_cmd::run_all(&cfg, &catalog, yes, no_summary, mode.reporter())?;
        }
        Commands::Unit { group, unit } => {
            harvest_cmd::run_unit(&cfg, &catalog, &group, &unit, mode.reporter())?;
        }
        Commands::Summary => {
            stats::run_summary(&cfg, &catalog)?;
        }
        Commands::Catalog => {
            catalog_cmd::list_catalog(&catalog)?;
        }
    }

    Ok(())
}
