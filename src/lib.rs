//! Incident Atlas
//!
//! Body-map heatmaps and dashboard summaries for workplace accident
//! records.
//!
//! This crate provides the core implementation for the
//! `incident-atlas` CLI tool: heat level computation, label-to-region
//! grouping, the dashboard aggregations, and clients for the dashboard
//! API or a local dataset export.
//!
//! ## Getting Started
//!
//! ```bash
//! incident-atlas levels hands=12 feet=3 eyes=0
//! incident-atlas heatmap --input accidents.json --svg body.svg --summary
//! ```

pub mod api;
pub mod commands;
pub mod dataset;
pub mod heat;
pub mod insights;
pub mod output;
pub mod render;
pub mod source;
pub mod state;
pub mod utils;

pub use heat::{heat_level, HeatLevelCalculator, MAX_HEAT_LEVEL};
