//! Corpus statistics.
//!
//! `mishna summary` rebuilds `_summary.json` from the unit files already on
//! disk and prints the totals, with a per-group breakdown, so a partial run
//! can be inspected without fetching anything.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::corpus::build_summary;
use crate::models::CorpusSummary;
use crate::progress::format_number;
use crate::store::summary_path;

/// Run the summary command: rebuild the summary file and print it.
pub fn run_summary(config: &Config, catalog: &Catalog) -> Result<()> {
    let output_dir = &config.output.dir;
    let summary = build_summary(catalog, output_dir)?;
    print_summary(&summary, catalog);
    println!("  Written to:  {}", summary_path(output_dir).display());
    println!();
    Ok(())
}

fn print_summary(summary: &CorpusSummary, catalog: &Catalog) {
    println!("Mishna corpus summary");
    println!("=====================");
    println!();
    println!("  Generated:   {}", summary.timestamp);
    println!(
        "  Units:       {} / {} ({}%)",
        summary.total_units,
        catalog.unit_count(),
        percent(summary.total_units, catalog.unit_count() as u64)
    );
    println!(
        "  Sections:    {} / {}",
        summary.total_sections,
        catalog.section_count()
    );
    println!("  Items:       {}", format_number(summary.total_items));
    println!("  Words:       {}", format_number(summary.total_words));

    if !summary.by_group.is_empty() {
        println!();
        println!("  By group:");
        println!(
            "  {:<12} {:>6} {:>9} {:>8} {:>10}",
            "GROUP", "UNITS", "SECTIONS", "ITEMS", "WORDS"
        );
        println!("  {}", "-".repeat(49));

        for (name, g) in &summary.by_group {
            println!(
                "  {:<12} {:>6} {:>9} {:>8} {:>10}",
                name,
                g.unit_count,
                g.section_count,
                format_number(g.item_count),
                format_number(g.word_count)
            );
        }
    }

    println!();
}

fn percent(part: u64, whole: u64) -> u64 {
    if whole > 0 {
        (part * 100) / whole
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_handles_zero() {
        assert_eq!(percent(0, 0), 0);
        assert_eq!(percent(1, 63), 1);
        assert_eq!(percent(63, 63), 100);
    }
}
