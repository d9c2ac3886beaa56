use anyhow::Result;

use crate::catalog::Catalog;

pub fn list_catalog(catalog: &Catalog) -> Result<()> {
    println!(
        "{:<12} {:<14} {:<16} {:>8}",
        "GROUP", "UNIT", "ID", "SECTIONS"
    );

    for group in catalog.groups() {
        for unit in &group.units {
            println!(
                "{:<12} {:<14} {:<16} {:>8}",
                group.name, unit.native_name, unit.external_id, unit.section_count
            );
        }
    }

    println!();
    println!(
        "{} groups, {} units, {} sections",
        catalog.groups().len(),
        catalog.unit_count(),
        catalog.section_count()
    );

    Ok(())
}
