//! `mishna test`, `mishna unit` and `mishna all`.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::corpus::{build_summary, Harvester};
use crate::progress::ProgressReporter;

/// Unit fetched by `mishna test`.
pub const SMOKE_TEST_GROUP: &str = "זרעים";
pub const SMOKE_TEST_UNIT: &str = "ברכות";

/// Fetch the default unit to check connectivity and the output directory.
pub fn run_smoke_test(
    config: &Config,
    catalog: &Catalog,
    reporter: Box<dyn ProgressReporter>,
) -> Result<()> {
    run_unit(config, catalog, SMOKE_TEST_GROUP, SMOKE_TEST_UNIT, reporter)
}

/// Fetch one named unit. Errors if the unit is unknown or cannot be saved.
pub fn run_unit(
    config: &Config,
    catalog: &Catalog,
    group: &str,
    unit: &str,
    reporter: Box<dyn ProgressReporter>,
) -> Result<()> {
    let harvester = Harvester::from_config(config, reporter)?;

    if !harvester.run_single(catalog, group, unit)? {
        bail!("Failed to save unit {}/{}", group, unit);
    }

    println!("unit {}/{}", group, unit);
    println!("  saved to: {}", harvester.output_dir().display());
    println!("ok");
    Ok(())
}

/// Fetch the whole catalog, then (unless `no_summary`) write the summary.
///
/// Without `yes`, asks for confirmation on stdin first.
pub fn run_all(
    config: &Config,
    catalog: &Catalog,
    yes: bool,
    no_summary: bool,
    reporter: Box<dyn ProgressReporter>,
) -> Result<()> {
    let total = catalog.unit_count();

    if !yes && !confirm(total, catalog.section_count())? {
        println!("Cancelled.");
        return Ok(());
    }

    let harvester = Harvester::from_config(config, reporter)?;
    let report = harvester.run_all(catalog);

    println!("fetch all");
    println!("  completed: {} / {} units", report.success_count, total);
    println!("  failed: {}", report.failed_units.len());
    for label in &report.failed_units {
        println!("    - {}", label);
    }

    if !no_summary {
        build_summary(catalog, harvester.output_dir())?;
        println!(
            "  summary: {}",
            crate::store::summary_path(harvester.output_dir()).display()
        );
    }
    println!("ok");
    Ok(())
}

fn confirm(units: usize, sections: u64) -> Result<bool> {
    print!(
        "This fetches {} units ({} sections) and takes a long time. Continue? (y/n): ",
        units, sections
    );
    std::io::stdout().flush()?;

    let mut answer = String::new();
    std::io::stdin().lock().read_line(&mut answer)?;
    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
