//! Dashboard API communication.

pub mod client;
pub mod types;

pub use client::DashboardClient;
pub use types::{Accident, BodyPartCount, ChartSeries, DashboardStats, NextAction, SafetyRecord, Statistics};
