//! Harvest progress reporting.
//!
//! Reports what the harvester is doing (which unit, each section attempt,
//! saves and failures) so long runs are observable. Progress is emitted on
//! **stderr** so stdout remains parseable for scripts.

use std::io::Write;
use std::path::PathBuf;

/// A single progress event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HarvestEvent {
    /// A unit is about to be fetched.
    UnitStarted {
        group: String,
        unit: String,
        sections: u32,
    },
    /// A section was fetched and parsed.
    SectionFetched {
        unit: String,
        section: u32,
        items: u64,
        words: u64,
    },
    /// A section fetch failed and the section was skipped.
    SectionFailed {
        unit: String,
        section: u32,
        reason: String,
    },
    /// Every section of a unit has been attempted.
    UnitFinished { unit: String, items: u64, words: u64 },
    /// A unit file was written.
    UnitSaved { unit: String, path: PathBuf },
    /// A unit could not be persisted.
    UnitFailed {
        group: String,
        unit: String,
        reason: String,
    },
}

/// Reports harvest progress. Implementations write to stderr (human or JSON).
pub trait ProgressReporter: Send + Sync {
    /// Emit a progress event. Called from the fetch and save paths.
    fn report(&self, event: HarvestEvent);
}

/// Human-friendly progress on stderr: "  section 3: 12 items, 1,204 words".
pub struct StderrProgress;

impl ProgressReporter for StderrProgress {
    fn report(&self, event: HarvestEvent) {
        let line = match &event {
            HarvestEvent::UnitStarted {
                group,
                unit,
                sections,
            } => format!("fetch {}/{}  {} sections\n", group, unit, sections),
            HarvestEvent::SectionFetched {
                section,
                items,
                words,
                ..
            } => format!(
                "  section {}: {} items, {} words\n",
                section,
                format_number(*items),
                format_number(*words)
            ),
            HarvestEvent::SectionFailed {
                section, reason, ..
            } => format!("  section {}: failed: {}\n", section, reason),
            HarvestEvent::UnitFinished { unit, items, words } => format!(
                "done {}: {} items, {} words\n",
                unit,
                format_number(*items),
                format_number(*words)
            ),
            HarvestEvent::UnitSaved { unit, path } => {
                format!("saved {} -> {}\n", unit, path.display())
            }
            HarvestEvent::UnitFailed {
                group,
                unit,
                reason,
            } => format!("failed {}/{}: {}\n", group, unit, reason),
        };
        let _ = std::io::stderr().lock().write_all(line.as_bytes());
        let _ = std::io::stderr().lock().flush();
    }
}

/// Machine-readable progress: one JSON object per line on stderr.
pub struct JsonProgress;

impl ProgressReporter for JsonProgress {
    fn report(&self, event: HarvestEvent) {
        let obj = event_json(&event);
        if let Ok(line) = serde_json::to_string(&obj) {
            let _ = writeln!(std::io::stderr().lock(), "{}", line);
            let _ = std::io::stderr().lock().flush();
        }
    }
}

fn event_json(event: &HarvestEvent) -> serde_json::Value {
    match event {
        HarvestEvent::UnitStarted {
            group,
            unit,
            sections,
        } => serde_json::json!({
            "event": "unit_started",
            "group": group,
            "unit": unit,
            "sections": sections
        }),
        HarvestEvent::SectionFetched {
            unit,
            section,
            items,
            words,
        } => serde_json::json!({
            "event": "section_fetched",
            "unit": unit,
            "section": section,
            "items": items,
            "words": words
        }),
        HarvestEvent::SectionFailed {
            unit,
            section,
            reason,
        } => serde_json::json!({
            "event": "section_failed",
            "unit": unit,
            "section": section,
            "reason": reason
        }),
        HarvestEvent::UnitFinished { unit, items, words } => serde_json::json!({
            "event": "unit_finished",
            "unit": unit,
            "items": items,
            "words": words
        }),
        HarvestEvent::UnitSaved { unit, path } => serde_json::json!({
            "event": "unit_saved",
            "unit": unit,
            "path": path.display().to_string()
        }),
        HarvestEvent::UnitFailed {
            group,
            unit,
            reason,
        } => serde_json::json!({
            "event": "unit_failed",
            "group": group,
            "unit": unit,
            "reason": reason
        }),
    }
}

/// No-op reporter when progress is disabled.
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: HarvestEvent) {}
}

pub(crate) fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + (s.len() - 1) / 3);
    let chars: Vec<char> = s.chars().rev().collect();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }
    result.chars().rev().collect()
}

/// Progress mode for the CLI: off, human (stderr), or JSON (stderr).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProgressMode {
    Off,
    Human,
    Json,
}

impl ProgressMode {
    /// Default: human progress when stderr is a TTY, otherwise off.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stderr) {
            ProgressMode::Human
        } else {
            ProgressMode::Off
        }
    }

    /// Parse a `--progress` value.
    pub fn parse(value: &str) -> anyhow::Result<Self> {
        match value {
            "off" => Ok(ProgressMode::Off),
            "human" => Ok(ProgressMode::Human),
            "json" => Ok(ProgressMode::Json),
            other => anyhow::bail!(
                "Unknown progress mode: '{}'. Must be off, human, or json.",
                other
            ),
        }
    }

    /// Build a reporter for this mode.
    pub fn reporter(&self) -> Box<dyn ProgressReporter> {
        match self {
            ProgressMode::Off => Box::new(NoProgress),
            ProgressMode::Human => Box::new(StderrProgress),
            ProgressMode::Json => Box::new(JsonProgress),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_comma() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn parse_modes() {
        assert_eq!(ProgressMode::parse("off").unwrap(), ProgressMode::Off);
        assert_eq!(ProgressMode::parse("json").unwrap(), ProgressMode::Json);
        assert!(ProgressMode::parse("loud").is_err());
    }

    #[test]
    fn json_event_shape() {
        let v = event_json(&HarvestEvent::SectionFailed {
            unit: "ברכות".to_string(),
            section: 2,
            reason: "HTTP 500".to_string(),
        });
        assert_eq!(v["event"], "section_failed");
        assert_eq!(v["unit"], "ברכות");
        assert_eq!(v["section"], 2);
    }
}
