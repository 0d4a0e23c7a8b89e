//! Heatmap rendering.
//!
//! Converts heat results into an SVG body map or a terminal table.

pub mod body_map;
pub mod summary;

// Re-export main types
pub use body_map::{band_color, level_style, render_body_svg, BodyMapConfig};
pub use summary::render_text_summary;
