//! Body-map heat computation.
//!
//! This module turns a body-part aggregate into:
//! - Per-region counts (label grouping)
//! - Heat levels 0-10 and their display bands
//! - A versioned report

pub mod level;
pub mod regions;
pub mod schema;

// Re-export main types and functions
pub use level::{heat_level, max_count, percentage_of_max, HeatBand, HeatLevelCalculator, MAX_HEAT_LEVEL};
pub use regions::{heat_results, BodyRegionCount, RegionDefinition, RegionMap};
pub use schema::{to_report, HeatResult, HeatmapReport};
