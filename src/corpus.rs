//! Corpus aggregation: drive the unit pipeline across the catalog and roll
//! persisted units up into a [`CorpusSummary`].
//!
//! # Workflow
//!
//! 1. [`Harvester::run_all`] walks groups, then units, in declaration order.
//! 2. Each unit is fetched ([`fetch_unit`]) and saved ([`save_unit`]).
//! 3. A failed save marks the unit failed; the run always moves on.
//! 4. [`build_summary`] re-reads every unit file that exists and writes
//!    `_summary.json` next to them.

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::catalog::{Catalog, CatalogEntry};
use crate::config::Config;
use crate::error::LookupError;
use crate::fetcher::{HttpTextSource, TextSource};
use crate::models::{CorpusSummary, GroupSummary, UnitSummary};
use crate::pacing::{FixedDelay, Pacer};
use crate::progress::ProgressReporter;
use crate::store::{load_unit, save_unit, write_summary};
use crate::unit::fetch_unit;

/// Outcome of a full catalog run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub success_count: usize,
    /// `group/unit` labels, in the order they failed.
    pub failed_units: Vec<String>,
}

/// Fetches units and persists them to one output directory.
pub struct Harvester {
    source: Box<dyn TextSource>,
    pacer: Box<dyn Pacer>,
    reporter: Box<dyn ProgressReporter>,
    output_dir: PathBuf,
}

impl Harvester {
    pub fn new(
        source: Box<dyn TextSource>,
        pacer: Box<dyn Pacer>,
        reporter: Box<dyn ProgressReporter>,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            source,
            pacer,
            reporter,
            output_dir,
        }
    }

    /// HTTP source and fixed pacing as configured.
    pub fn from_config(config: &Config, reporter: Box<dyn ProgressReporter>) -> Result<Self> {
        Ok(Self::new(
            Box::new(HttpTextSource::new(&config.api)?),
            Box::new(FixedDelay::from_config(&config.pacing)),
            reporter,
            config.output.dir.clone(),
        ))
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fetch and save one entry. Returns whether the save succeeded.
    pub fn harvest_entry(&self, entry: &CatalogEntry) -> bool {
        let record = fetch_unit(
            self.source.as_ref(),
            self.pacer.as_ref(),
            self.reporter.as_ref(),
            entry,
        );
        save_unit(&record, &self.output_dir, self.reporter.as_ref())
    }

    /// Fetch every unit of the catalog. A unit's failure never stops the run.
    pub fn run_all(&self, catalog: &Catalog) -> RunReport {
        let mut report = RunReport::default();
        let total = catalog.unit_count();

        for (i, entry) in catalog.entries().enumerate() {
            if self.harvest_entry(entry) {
                report.success_count += 1;
            } else {
                report
                    .failed_units
                    .push(format!("{}/{}", entry.group_name, entry.native_name));
            }
            if i + 1 < total {
                self.pacer.after_unit();
            }
        }

        report
    }

    /// Fetch a single named unit.
    pub fn run_single(
        &self,
        catalog: &Catalog,
        group: &str,
        unit: &str,
    ) -> Result<bool, LookupError> {
        let entry = catalog.find(group, unit)?;
        Ok(self.harvest_entry(entry))
    }
}

/// Roll up every readable unit file in `output_dir`.
///
/// Units without a readable file contribute nothing, so the summary reflects
/// what has been persisted so far. Every catalog group appears, possibly with
/// zero counts.
pub fn summarize(catalog: &Catalog, output_dir: &Path, timestamp: String) -> CorpusSummary {
    let mut summary = CorpusSummary {
        timestamp,
        total_units: 0,
        total_sections: 0,
        total_items: 0,
        total_words: 0,
        by_group: Default::default(),
    };

    for group in catalog.groups() {
        let mut stats = GroupSummary::default();

        for entry in &group.units {
            let Some(record) = load_unit(output_dir, &entry.native_name) else {
                continue;
            };
            let meta = &record.metadata;
            stats.unit_count += 1;
            stats.section_count += meta.section_count as u64;
            stats.item_count += meta.total_item_count;
            stats.word_count += meta.total_word_count;
            stats.per_unit.insert(
                entry.native_name.clone(),
                UnitSummary {
                    section_count: meta.section_count as u64,
                    item_count: meta.total_item_count,
                    word_count: meta.total_word_count,
                },
            );
        }

        summary.total_units += stats.unit_count;
        summary.total_sections += stats.section_count;
        summary.total_items += stats.item_count;
        summary.total_words += stats.word_count;
        summary.by_group.insert(group.name.clone(), stats);
    }

    summary
}

/// Build the summary with the current local time and write `_summary.json`.
pub fn build_summary(catalog: &Catalog, output_dir: &Path) -> Result<CorpusSummary> {
    let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let summary = summarize(catalog, output_dir, timestamp);
    write_summary(&summary, output_dir)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::NoDelay;
    use crate::progress::NoProgress;
    use crate::store::{summary_path, write_unit};
    use anyhow::bail;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    const TWO_GROUPS: &str = r#"
[[group]]
name = "g1"
units = [
    { name = "alpha", id = "Alpha", sections = 2 },
    { name = "beta", id = "Beta", sections = 1 },
]

[[group]]
name = "g2"
units = [{ name = "gamma", id = "Gamma", sections = 3 }]
"#;

    /// Every section of every unit returns the same two passages.
    struct Fixed;

    impl TextSource for Fixed {
        fn fetch_texts(&self, _id: &str, _section: u32) -> Result<Vec<String>> {
            Ok(vec!["one two".to_string(), "three".to_string()])
        }
    }

    struct Failing;

    impl TextSource for Failing {
        fn fetch_texts(&self, id: &str, section: u32) -> Result<Vec<String>> {
            bail!("no route to {}.{}", id, section)
        }
    }

    struct UnitCounter(Rc<Cell<u32>>);

    impl Pacer for UnitCounter {
        fn after_section(&self) {}
        fn after_unit(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn harvester(source: Box<dyn TextSource>, out: &Path) -> Harvester {
        Harvester::new(
            source,
            Box::new(NoDelay),
            Box::new(NoProgress),
            out.to_path_buf(),
        )
    }

    #[test]
    fn run_all_saves_every_unit() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();
        let report = harvester(Box::new(Fixed), tmp.path()).run_all(&catalog);

        assert_eq!(report.success_count, 3);
        assert!(report.failed_units.is_empty());
        for name in ["alpha", "beta", "gamma"] {
            assert!(tmp.path().join(format!("{}.json", name)).exists());
        }
    }

    #[test]
    fn units_with_every_fetch_failed_count_as_saved() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();
        let report = harvester(Box::new(Failing), tmp.path()).run_all(&catalog);

        // Success is the save outcome; an empty record still saves.
        assert_eq!(report.success_count, 3);
        assert!(report.failed_units.is_empty());
        let alpha = load_unit(tmp.path(), "alpha").unwrap();
        assert!(alpha.sections.is_empty());
        assert_eq!(alpha.metadata.total_item_count, 0);
    }

    #[test]
    fn save_failures_are_reported_and_run_continues() {
        let tmp = TempDir::new().unwrap();
        let blocker = tmp.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();

        let report = harvester(Box::new(Fixed), &blocker).run_all(&catalog);
        assert_eq!(report.success_count, 0);
        assert_eq!(report.failed_units, vec!["g1/alpha", "g1/beta", "g2/gamma"]);
    }

    #[test]
    fn unit_pacing_runs_between_units() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();
        let count = Rc::new(Cell::new(0));
        let h = Harvester::new(
            Box::new(Fixed),
            Box::new(UnitCounter(count.clone())),
            Box::new(NoProgress),
            tmp.path().to_path_buf(),
        );
        h.run_all(&catalog);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn run_single_looks_up_catalog() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();
        let h = harvester(Box::new(Fixed), tmp.path());

        assert_eq!(h.run_single(&catalog, "g2", "gamma"), Ok(true));
        assert!(tmp.path().join("gamma.json").exists());
        assert!(!tmp.path().join("alpha.json").exists());

        assert_eq!(
            h.run_single(&catalog, "g3", "gamma"),
            Err(LookupError::UnknownGroup("g3".to_string()))
        );
        assert!(matches!(
            h.run_single(&catalog, "g1", "gamma"),
            Err(LookupError::UnknownUnit { .. })
        ));
    }

    #[test]
    fn summary_counts_only_persisted_units() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();
        let alpha = catalog.find("g1", "alpha").unwrap();
        let gamma = catalog.find("g2", "gamma").unwrap();
        write_unit(&fetch_unit(&Fixed, &NoDelay, &NoProgress, alpha), tmp.path()).unwrap();
        write_unit(&fetch_unit(&Fixed, &NoDelay, &NoProgress, gamma), tmp.path()).unwrap();
        // Unreadable file is skipped like a missing one.
        std::fs::write(tmp.path().join("beta.json"), "garbage").unwrap();

        let summary = summarize(&catalog, tmp.path(), "t".to_string());

        assert_eq!(summary.total_units, 2);
        assert_eq!(summary.total_sections, 5);
        // 2 items and 3 words per section.
        assert_eq!(summary.total_items, 10);
        assert_eq!(summary.total_words, 15);

        let g1 = &summary.by_group["g1"];
        assert_eq!(g1.unit_count, 1);
        assert_eq!(g1.per_unit["alpha"].item_count, 4);
        assert!(!g1.per_unit.contains_key("beta"));
        assert_eq!(summary.by_group["g2"].word_count, 9);
    }

    #[test]
    fn summary_of_empty_directory_lists_groups_with_zeros() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();
        let summary = summarize(&catalog, tmp.path(), "t".to_string());
        assert_eq!(summary.total_units, 0);
        assert_eq!(summary.total_words, 0);
        let groups: Vec<&String> = summary.by_group.keys().collect();
        assert_eq!(groups, vec!["g1", "g2"]);
    }

    #[test]
    fn build_summary_is_stable_apart_from_timestamp() {
        let tmp = TempDir::new().unwrap();
        let catalog = Catalog::from_toml_str(TWO_GROUPS).unwrap();
        harvester(Box::new(Fixed), tmp.path()).run_all(&catalog);

        let mut first = build_summary(&catalog, tmp.path()).unwrap();
        let mut second = build_summary(&catalog, tmp.path()).unwrap();
        assert!(summary_path(tmp.path()).exists());

        first.timestamp.clear();
        second.timestamp.clear();
        assert_eq!(first, second);
    }
}
