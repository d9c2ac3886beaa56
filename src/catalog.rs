//! The fixed group → unit catalog.
//!
//! The catalog is data, not code: it lives in `catalog/mishnah.toml` and is
//! embedded into the binary at compile time. A different catalog file can be
//! loaded with [`Catalog::load`] (see `[catalog].path` in the config).
//!
//! # Format
//!
//! ```toml
//! [[group]]
//! name = "זרעים"
//! units = [
//!     { name = "ברכות", id = "Berakhot", sections = 9 },
//! ]
//! ```
//!
//! Declaration order in the file is the iteration order everywhere.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

use crate::error::LookupError;

const BUILTIN_CATALOG: &str = include_str!("../catalog/mishnah.toml");

/// One unit (tractate) of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub native_name: String,
    pub external_id: String,
    pub group_name: String,
    pub section_count: u32,
}

/// A top-level group (order) and its units, in declaration order.
#[derive(Debug, Clone)]
pub struct CatalogGroup {
    pub name: String,
    pub units: Vec<CatalogEntry>,
}

/// Immutable catalog of every group and unit known in advance.
#[derive(Debug, Clone)]
pub struct Catalog {
    groups: Vec<CatalogGroup>,
}

#[derive(Deserialize)]
struct RawCatalog {
    #[serde(default)]
    group: Vec<RawGroup>,
}

#[derive(Deserialize)]
struct RawGroup {
    name: String,
    #[serde(default)]
    units: Vec<RawUnit>,
}

#[derive(Deserialize)]
struct RawUnit {
    name: String,
    id: String,
    sections: u32,
}

/// A name usable as a single file stem inside the output directory.
fn is_plain_file_stem(name: &str) -> bool {
    name != "." && name != ".." && !name.contains(['/', '\\'])
}

impl Catalog {
    /// The embedded Mishnah catalog.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN_CATALOG).context("Failed to parse embedded catalog")
    }

    /// Load a catalog from a TOML file on disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
    }

    /// Parse and validate a catalog document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let raw: RawCatalog = toml::from_str(content)?;

        if raw.group.is_empty() {
            bail!("catalog declares no groups");
        }

        // Unit files are named after the unit alone, so names are unique
        // across the whole catalog.
        let mut seen: HashSet<String> = HashSet::new();
        let mut groups = Vec::with_capacity(raw.group.len());

        for g in raw.group {
            if g.name.trim().is_empty() {
                bail!("catalog group with empty name");
            }
            let mut units = Vec::with_capacity(g.units.len());
            for u in g.units {
                if u.name.trim().is_empty() || u.id.trim().is_empty() {
                    bail!("unit in group '{}' has an empty name or id", g.name);
                }
                if u.sections == 0 {
                    bail!("unit '{}/{}' must have sections >= 1", g.name, u.name);
                }
                if !is_plain_file_stem(&u.name) {
                    bail!(
                        "unit name '{}/{}' must not contain path separators or be '.' or '..'",
                        g.name,
                        u.name
                    );
                }
                if !seen.insert(u.name.clone()) {
                    bail!("duplicate unit name '{}' in catalog (group '{}')", u.name, g.name);
                }
                units.push(CatalogEntry {
                    native_name: u.name,
                    external_id: u.id,
                    group_name: g.name.clone(),
                    section_count: u.sections,
                });
            }
            groups.push(CatalogGroup {
                name: g.name,
                units,
            });
        }

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[CatalogGroup] {
        &self.groups
    }

    /// Every entry, groups first then units, in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.groups.iter().flat_map(|g| g.units.iter())
    }

    /// Look up a unit by group and native name.
    pub fn find(&self, group: &str, unit: &str) -> Result<&CatalogEntry, LookupError> {
        let g = self
            .groups
            .iter()
            .find(|g| g.name == group)
            .ok_or_else(|| LookupError::UnknownGroup(group.to_string()))?;
        g.units
            .iter()
            .find(|u| u.native_name == unit)
            .ok_or_else(|| LookupError::UnknownUnit {
                group: group.to_string(),
                unit: unit.to_string(),
            })
    }

    pub fn unit_count(&self) -> usize {
        self.groups.iter().map(|g| g.units.len()).sum()
    }

    pub fn section_count(&self) -> u64 {
        self.entries().map(|e| e.section_count as u64).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_shape() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.groups().len(), 6);
        assert_eq!(catalog.unit_count(), 63);
        assert_eq!(catalog.section_count(), 525);
        assert_eq!(catalog.groups()[0].name, "זרעים");
        assert_eq!(catalog.groups()[5].name, "טהרות");
    }

    #[test]
    fn builtin_lookup() {
        let catalog = Catalog::builtin().unwrap();
        let kelim = catalog.find("טהרות", "כלים").unwrap();
        assert_eq!(kelim.external_id, "Kelim");
        assert_eq!(kelim.section_count, 30);
        assert_eq!(kelim.group_name, "טהרות");

        // Tahorot is both a group and a unit inside it.
        let tahorot = catalog.find("טהרות", "טהרות").unwrap();
        assert_eq!(tahorot.external_id, "Tahorot");
    }

    #[test]
    fn entries_follow_declaration_order() {
        let catalog = Catalog::builtin().unwrap();
        let first: Vec<&str> = catalog
            .entries()
            .take(3)
            .map(|e| e.external_id.as_str())
            .collect();
        assert_eq!(first, vec!["Berakhot", "Peah", "Demai"]);
        assert_eq!(catalog.entries().last().unwrap().external_id, "Oktzin");
    }

    #[test]
    fn find_reports_missing_group_and_unit() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            catalog.find("nope", "ברכות").unwrap_err(),
            LookupError::UnknownGroup("nope".to_string())
        );
        assert!(matches!(
            catalog.find("זרעים", "שבת").unwrap_err(),
            LookupError::UnknownUnit { .. }
        ));
    }

    #[test]
    fn rejects_zero_sections() {
        let err = Catalog::from_toml_str(
            r#"
[[group]]
name = "g"
units = [{ name = "u", id = "U", sections = 0 }]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("sections >= 1"));
    }

    #[test]
    fn rejects_duplicates_and_empty() {
        assert!(Catalog::from_toml_str("").is_err());
        let dup = r#"
[[group]]
name = "g"
units = [
    { name = "u", id = "U", sections = 1 },
    { name = "u", id = "V", sections = 2 },
]
"#;
        assert!(Catalog::from_toml_str(dup).is_err());
    }

    #[test]
    fn rejects_same_unit_name_in_different_groups() {
        let err = Catalog::from_toml_str(
            r#"
[[group]]
name = "a"
units = [{ name = "u", id = "A", sections = 1 }]

[[group]]
name = "b"
units = [{ name = "u", id = "B", sections = 2 }]
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("duplicate unit name 'u'"));
    }

    #[test]
    fn group_and_unit_may_share_a_name() {
        let catalog = Catalog::from_toml_str(
            r#"
[[group]]
name = "t"
units = [{ name = "t", id = "T", sections = 1 }]
"#,
        )
        .unwrap();
        assert_eq!(catalog.find("t", "t").unwrap().external_id, "T");
    }

    #[test]
    fn rejects_unit_names_that_escape_the_output_dir() {
        for name in ["../x", "a/b", "a\\\\b", "..", "."] {
            let doc = format!(
                "[[group]]\nname = \"g\"\nunits = [{{ name = \"{}\", id = \"X\", sections = 1 }}]\n",
                name
            );
            let err = Catalog::from_toml_str(&doc).unwrap_err();
            assert!(
                err.to_string().contains("path separators"),
                "{}: {}",
                name,
                err
            );
        }
    }
}
