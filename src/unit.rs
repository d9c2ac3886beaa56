//! Unit aggregation: fetch every section of one unit into a [`UnitRecord`].

use crate::catalog::CatalogEntry;
use crate::fetcher::{fetch_section, TextSource};
use crate::models::UnitRecord;
use crate::pacing::Pacer;
use crate::progress::{HarvestEvent, ProgressReporter};

/// Fetch sections `1..=section_count` of `unit` in ascending order.
///
/// Never fails: sections that could not be fetched are simply absent, and a
/// unit with no successful section comes back with empty sections and zero
/// totals. The pacer runs between consecutive section requests.
pub fn fetch_unit(
    source: &dyn TextSource,
    pacer: &dyn Pacer,
    reporter: &dyn ProgressReporter,
    unit: &CatalogEntry,
) -> UnitRecord {
    reporter.report(HarvestEvent::UnitStarted {
        group: unit.group_name.clone(),
        unit: unit.native_name.clone(),
        sections: unit.section_count,
    });

    let mut record = UnitRecord::empty(unit);

    for section_number in 1..=unit.section_count {
        if section_number > 1 {
            pacer.after_section();
        }
        if let Some(section) = fetch_section(source, reporter, unit, section_number) {
            record.push_section(section);
        }
    }

    reporter.report(HarvestEvent::UnitFinished {
        unit: unit.native_name.clone(),
        items: record.metadata.total_item_count,
        words: record.metadata.total_word_count,
    });

    record
}
