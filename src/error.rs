use thiserror::Error;

/// Lookup failure when a caller names a group or unit the catalog does not
/// declare.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("group '{0}' not found in catalog")]
    UnknownGroup(String),
    #[error("unit '{unit}' not found in group '{group}'")]
    UnknownUnit { group: String, unit: String },
}
