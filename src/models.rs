//! Records produced by the harvest pipeline and written to disk.
//!
//! Field names are serialized with the Hebrew keys of the established file
//! format, so persisted files can be read by existing consumers unchanged.
//! Maps keep insertion order (`IndexMap`), which is response order for items
//! and ascending section order for sections.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogEntry;

/// Map key for a section, e.g. `פרק_3`.
pub fn section_key(section_number: u32) -> String {
    format!("פרק_{}", section_number)
}

/// Map key for an item within a section, e.g. `משנה_12`.
pub fn item_key(index: u32) -> String {
    format!("משנה_{}", index)
}

/// A single numbered passage (mishnah).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextItem {
    #[serde(rename = "טקסט")]
    pub text: String,
    /// 1-based position in the section's response array.
    #[serde(rename = "מספר_משנה")]
    pub index: u32,
    #[serde(rename = "מספר_מילים")]
    pub word_count: u64,
}

/// One fetched section (chapter).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionRecord {
    #[serde(rename = "פרק")]
    pub section_number: u32,
    #[serde(rename = "משניות")]
    pub items: IndexMap<String, TextItem>,
    #[serde(rename = "מספר_משניות")]
    pub item_count: u64,
}

impl SectionRecord {
    pub fn new(section_number: u32, items: Vec<TextItem>) -> Self {
        let items: IndexMap<String, TextItem> = items
            .into_iter()
            .map(|item| (item_key(item.index), item))
            .collect();
        Self {
            section_number,
            item_count: items.len() as u64,
            items,
        }
    }

    pub fn word_count(&self) -> u64 {
        self.items.values().map(|i| i.word_count).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitMetadata {
    #[serde(rename = "מספר_פרקים")]
    pub section_count: u32,
    #[serde(rename = "מספר_משניות_סה_כ")]
    pub total_item_count: u64,
    #[serde(rename = "מספר_מילים_סה_כ")]
    pub total_word_count: u64,
    #[serde(rename = "משניות_לפי_פרק")]
    pub item_count_by_section: IndexMap<String, u64>,
}

/// A complete unit (tractate) record, one file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitRecord {
    #[serde(rename = "מסכת")]
    pub native_name: String,
    #[serde(rename = "מסכת_אנגלית")]
    pub external_id: String,
    #[serde(rename = "סדר")]
    pub group_name: String,
    #[serde(rename = "פרקים")]
    pub sections: IndexMap<String, SectionRecord>,
    #[serde(rename = "מטאדטה")]
    pub metadata: UnitMetadata,
}

impl UnitRecord {
    /// An empty record for `entry`, before any section has been fetched.
    pub fn empty(entry: &CatalogEntry) -> Self {
        Self {
            native_name: entry.native_name.clone(),
            external_id: entry.external_id.clone(),
            group_name: entry.group_name.clone(),
            sections: IndexMap::new(),
            metadata: UnitMetadata {
                section_count: entry.section_count,
                total_item_count: 0,
                total_word_count: 0,
                item_count_by_section: IndexMap::new(),
            },
        }
    }

    /// Add a fetched section and fold its counts into the running totals.
    pub fn push_section(&mut self, section: SectionRecord) {
        let key = section_key(section.section_number);
        self.metadata.total_item_count += section.item_count;
        self.metadata.total_word_count += section.word_count();
        self.metadata
            .item_count_by_section
            .insert(key.clone(), section.item_count);
        self.sections.insert(key, section);
    }
}

/// Per-unit line in the corpus summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSummary {
    #[serde(rename = "פרקים")]
    pub section_count: u64,
    #[serde(rename = "משניות")]
    pub item_count: u64,
    #[serde(rename = "מילים")]
    pub word_count: u64,
}

/// Per-group roll-up in the corpus summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    #[serde(rename = "מסכתות")]
    pub unit_count: u64,
    #[serde(rename = "פרקים")]
    pub section_count: u64,
    #[serde(rename = "משניות")]
    pub item_count: u64,
    #[serde(rename = "מילים")]
    pub word_count: u64,
    #[serde(rename = "מסכתות_פירוט")]
    pub per_unit: IndexMap<String, UnitSummary>,
}

/// Cross-corpus statistics rebuilt from the persisted unit files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    #[serde(rename = "תאריך_חילוץ")]
    pub timestamp: String,
    #[serde(rename = "סה_כ_מסכתות")]
    pub total_units: u64,
    #[serde(rename = "סה_כ_פרקים")]
    pub total_sections: u64,
    #[serde(rename = "סה_כ_משניות")]
    pub total_items: u64,
    #[serde(rename = "סה_כ_מילים")]
    pub total_words: u64,
    #[serde(rename = "פירוט_לפי_סדר")]
    pub by_group: IndexMap<String, GroupSummary>,
}
