//! Request pacing.
//!
//! The remote API tolerates a modest request rate. Pacing is a flat sleep
//! between sections and between units, expressed as a [`Pacer`] so the
//! fetch loops never call `sleep` directly.

use std::time::Duration;

use crate::config::PacingConfig;

/// Decides how long to wait between consecutive requests.
pub trait Pacer {
    /// Called after each section fetch attempt.
    fn after_section(&self);
    /// Called after each unit has been fetched and saved.
    fn after_unit(&self);
}

/// Fixed sleeps, independent of observed load.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay {
    pub section: Duration,
    pub unit: Duration,
}

impl FixedDelay {
    pub fn from_config(config: &PacingConfig) -> Self {
        Self {
            section: config.section_delay(),
            unit: config.unit_delay(),
        }
    }
}

impl Pacer for FixedDelay {
    fn after_section(&self) {
        if !self.section.is_zero() {
            std::thread::sleep(self.section);
        }
    }

    fn after_unit(&self) {
        if !self.unit.is_zero() {
            std::thread::sleep(self.unit);
        }
    }
}

/// No waiting at all. Used in tests and against local mirrors.
pub struct NoDelay;

impl Pacer for NoDelay {
    fn after_section(&self) {}
    fn after_unit(&self) {}
}
