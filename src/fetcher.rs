//! Section fetcher.
//!
//! One HTTP GET per (unit, section):
//!
//! ```text
//! GET {host}/api/texts/{prefix}_{external_id}.{section}
//! ```
//!
//! The response is JSON; the configured text field (`he`) holds an ordered
//! array of passage strings. A network error, a non-2xx status, an
//! unparseable body, or a missing or empty text array is a failure for that
//! section only. [`fetch_section`] turns failures into `None` and a progress
//! event; nothing propagates to the unit.

use anyhow::{bail, Context, Result};
use std::time::Duration;

use crate::catalog::CatalogEntry;
use crate::config::ApiConfig;
use crate::models::{SectionRecord, TextItem};
use crate::progress::{HarvestEvent, ProgressReporter};
use crate::words::count_words;

/// Largest backoff exponent: retries wait at most 2^5 = 32 seconds.
const MAX_BACKOFF_SHIFT: u32 = 5;

/// Exponential backoff before retry `attempt` (1-based): 1s, 2s, 4s, ... 32s.
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(1 << (attempt - 1).min(MAX_BACKOFF_SHIFT))
}

/// Source of raw section texts.
///
/// [`HttpTextSource`] is the production implementation; tests substitute
/// scripted sources.
pub trait TextSource {
    /// Return the section's text array in response order. Elements that are
    /// not strings come back as empty strings so positions are preserved.
    fn fetch_texts(&self, external_id: &str, section: u32) -> Result<Vec<String>>;
}

/// Text source backed by the remote text API.
pub struct HttpTextSource {
    client: reqwest::blocking::Client,
    host: String,
    prefix: String,
    text_field: String,
    max_retries: u32,
}

impl HttpTextSource {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            prefix: config.prefix.clone(),
            text_field: config.text_field.clone(),
            max_retries: config.max_retries,
        })
    }

    pub fn section_url(&self, external_id: &str, section: u32) -> String {
        format!(
            "{}/api/texts/{}_{}.{}",
            self.host, self.prefix, external_id, section
        )
    }
}

impl TextSource for HttpTextSource {
    /// Retry strategy (only when `max_retries > 0`):
    /// - HTTP 429 or 5xx → retry with exponential backoff
    /// - other non-2xx → fail immediately
    /// - network error → retry
    /// - unparseable body → fail immediately
    fn fetch_texts(&self, external_id: &str, section: u32) -> Result<Vec<String>> {
        let url = self.section_url(external_id, section);
        let mut last_err = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                std::thread::sleep(backoff_delay(attempt));
            }

            let response = match self.client.get(&url).send() {
                Ok(r) => r,
                Err(e) => {
                    last_err = Some(anyhow::Error::new(e).context(format!("GET {} failed", url)));
                    continue;
                }
            };

            let status = response.status();
            if status.is_success() {
                let json: serde_json::Value = response
                    .json()
                    .with_context(|| format!("Invalid JSON body from {}", url))?;
                return parse_texts(&json, &self.text_field);
            }

            if status.as_u16() == 429 || status.is_server_error() {
                last_err = Some(anyhow::anyhow!("HTTP {} from {}", status, url));
                continue;
            }

            bail!("HTTP {} from {}", status, url);
        }

        Err(last_err.unwrap_or_else(|| anyhow::anyhow!("GET {} failed after retries", url)))
    }
}

/// Extract the text array from a response body.
pub fn parse_texts(json: &serde_json::Value, text_field: &str) -> Result<Vec<String>> {
    let texts = json
        .get(text_field)
        .and_then(|v| v.as_array())
        .ok_or_else(|| anyhow::anyhow!("response has no '{}' array", text_field))?;

    if texts.is_empty() {
        bail!("response '{}' array is empty", text_field);
    }

    Ok(texts
        .iter()
        .map(|v| v.as_str().unwrap_or_default().to_string())
        .collect())
}

/// Build a section from its raw texts. Blank entries are dropped without
/// renumbering the ones that remain.
pub fn build_section(section_number: u32, texts: &[String]) -> SectionRecord {
    let items = texts
        .iter()
        .enumerate()
        .filter_map(|(i, raw)| {
            let text = raw.trim();
            if text.is_empty() {
                return None;
            }
            Some(TextItem {
                text: text.to_string(),
                index: i as u32 + 1,
                word_count: count_words(text),
            })
        })
        .collect();
    SectionRecord::new(section_number, items)
}

/// Fetch one section of `unit`. Returns `None` on any failure.
pub fn fetch_section(
    source: &dyn TextSource,
    reporter: &dyn ProgressReporter,
    unit: &CatalogEntry,
    section_number: u32,
) -> Option<SectionRecord> {
    match source.fetch_texts(&unit.external_id, section_number) {
        Ok(texts) => {
            let section = build_section(section_number, &texts);
            reporter.report(HarvestEvent::SectionFetched {
                unit: unit.native_name.clone(),
                section: section_number,
                items: section.item_count,
                words: section.word_count(),
            });
            Some(section)
        }
        Err(e) => {
            reporter.report(HarvestEvent::SectionFailed {
                unit: unit.native_name.clone(),
                section: section_number,
                reason: format!("{:#}", e),
            });
            None
        }
    }
}
