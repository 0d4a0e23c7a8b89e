//! Local dataset exports.

pub mod loader;

pub use loader::{load_accidents, parse_accidents};
