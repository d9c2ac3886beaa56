//! # Mishna Harvest
//!
//! Fetches the Mishnah from a remote text API and stores it as one JSON file
//! per tractate plus a corpus-wide summary.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//! │ Catalog  │──▶│  Corpus  │──▶│   Unit   │──▶│ Fetcher  │──▶ text API
//! │ (TOML)   │   │ run_all  │   │fetch_unit│   │ per sect │
//! └──────────┘   └────┬─────┘   └────┬─────┘   └──────────┘
//!                     │              ▼
//!                     │         ┌──────────┐
//!                     └────────▶│  Store   │──▶ <output>/*.json
//!                  build_summary└──────────┘
//! ```
//!
//! The pipeline is sequential and blocking: one request at a time, paced by
//! fixed delays. A failed section is skipped; a failed save marks its unit
//! failed; nothing aborts the run.
//!
//! ## Quick Start
//!
//! ```bash
//! mishna catalog                 # list groups, units, section counts
//! mishna test                    # fetch Berakhot as a smoke test
//! mishna unit נזיקין "בבא קמא"   # fetch one tractate
//! mishna all --yes               # fetch everything, then summarize
//! mishna summary                 # rebuild _summary.json from disk
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`catalog`] | Embedded group → unit catalog |
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Persisted record types |
//! | [`words`] | Word counting |
//! | [`fetcher`] | Per-section HTTP fetch and parsing |
//! | [`pacing`] | Delays between requests |
//! | [`unit`] | Per-unit aggregation |
//! | [`store`] | Reading and writing JSON files |
//! | [`corpus`] | Whole-catalog runs and the summary |
//! | [`progress`] | Progress reporting on stderr |

pub mod catalog;
pub mod catalog_cmd;
pub mod config;
pub mod corpus;
pub mod error;
pub mod fetcher;
pub mod harvest_cmd;
pub mod models;
pub mod pacing;
pub mod progress;
pub mod stats;
pub mod store;
pub mod unit;
pub mod words;
