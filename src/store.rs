//! Persistence of unit records and the corpus summary.
//!
//! Layout of the output directory:
//!
//! ```text
//! <output>/
//!   _summary.json        corpus summary (sorts before unit files)
//!   ברכות.json            one file per unit, named after its native name
//!   ...
//! ```
//!
//! Files are UTF-8, pretty-printed with two-space indentation, with non-ASCII
//! text written literally. Writes overwrite existing files.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::models::{CorpusSummary, UnitRecord};
use crate::progress::{HarvestEvent, ProgressReporter};

pub const SUMMARY_FILE_NAME: &str = "_summary.json";

pub fn unit_path(output_dir: &Path, native_name: &str) -> PathBuf {
    output_dir.join(format!("{}.json", native_name))
}

pub fn summary_path(output_dir: &Path) -> PathBuf {
    output_dir.join(SUMMARY_FILE_NAME)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Write `unit` to its file in `output_dir`, creating the directory if needed.
pub fn write_unit(unit: &UnitRecord, output_dir: &Path) -> Result<PathBuf> {
    let path = unit_path(output_dir, &unit.native_name);
    write_json(&path, unit)?;
    Ok(path)
}

/// Save `unit`, reporting the outcome. Returns `false` on any I/O failure.
pub fn save_unit(unit: &UnitRecord, output_dir: &Path, reporter: &dyn ProgressReporter) -> bool {
    match write_unit(unit, output_dir) {
        Ok(path) => {
            reporter.report(HarvestEvent::UnitSaved {
                unit: unit.native_name.clone(),
                path,
            });
            true
        }
        Err(e) => {
            reporter.report(HarvestEvent::UnitFailed {
                group: unit.group_name.clone(),
                unit: unit.native_name.clone(),
                reason: format!("{:#}", e),
            });
            false
        }
    }
}

/// Read a previously saved unit. Missing or malformed files yield `None`.
pub fn load_unit(output_dir: &Path, native_name: &str) -> Option<UnitRecord> {
    let content = std::fs::read_to_string(unit_path(output_dir, native_name)).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn write_summary(summary: &CorpusSummary, output_dir: &Path) -> Result<PathBuf> {
    let path = summary_path(output_dir);
    write_json(&path, summary)?;
    Ok(path)
}
