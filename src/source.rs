//! Data sources: the remote dashboard API or a local dataset export.
//!
//! Both variants answer the same queries with the same types, so commands
//! never need to know where the data comes from.

use crate::api::types::{
    Accident, BodyPartCount, ChartSeries, DashboardStats, NextAction, SafetyRecord, Statistics,
};
use crate::api::DashboardClient;
use crate::dataset::load_accidents;
use crate::insights::{self, MonthRange};
use crate::state::Filters;
use crate::utils::error::{ApiError, DatasetError};
use std::path::Path;

pub enum DataSource {
    Remote(DashboardClient),
    Local { label: String, accidents: Vec<Accident> },
}

impl DataSource {
    pub fn remote(base_url: &str) -> Result<Self, ApiError> {
        Ok(DataSource::Remote(DashboardClient::new(base_url)?))
    }

    pub fn local(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        Ok(DataSource::Local {
            label: path.display().to_string(),
            accidents: load_accidents(path)?,
        })
    }

    /// In-memory dataset
    pub fn from_accidents(label: impl Into<String>, accidents: Vec<Accident>) -> Self {
        DataSource::Local {
            label: label.into(),
            accidents,
        }
    }

    /// API URL or dataset path
    pub fn describe(&self) -> String {
        match self {
            DataSource::Remote(client) => client.base_url().to_string(),
            DataSource::Local { label, .. } => label.clone(),
        }
    }

    pub fn body_parts(&self, filters: &Filters) -> Result<Vec<BodyPartCount>, ApiError> {
        match self {
            DataSource::Remote(client) => client.body_parts(filters),
            DataSource::Local { accidents, .. } => {
                Ok(insights::body_part_counts(accidents.iter().filter(|a| filters.matches(a))))
            }
        }
    }

    pub fn dashboard_stats(&self, filters: &Filters) -> Result<DashboardStats, ApiError> {
        match self {
            DataSource::Remote(client) => client.dashboard_stats(filters),
            DataSource::Local { accidents, .. } => Ok(insights::dashboard_stats(accidents, filters)),
        }
    }

    pub fn statistics(&self) -> Result<Statistics, ApiError> {
        match self {
            DataSource::Remote(client) => client.statistics(),
            DataSource::Local { accidents, .. } => Ok(insights::statistics(accidents)),
        }
    }

    pub fn monthly(&self, filters: &Filters, range: MonthRange) -> Result<ChartSeries, ApiError> {
        match self {
            DataSource::Remote(client) => client.monthly(filters, range),
            DataSource::Local { accidents, .. } => Ok(insights::monthly_series(
                accidents.iter().filter(|a| filters.matches(a)),
                range,
            )),
        }
    }

    pub fn sectors(&self, filters: &Filters) -> Result<ChartSeries, ApiError> {
        match self {
            DataSource::Remote(client) => client.sectors(filters),
            DataSource::Local { accidents, .. } => {
                Ok(insights::sector_series(accidents.iter().filter(|a| filters.matches(a))))
            }
        }
    }

    pub fn locations(&self, filters: &Filters, country: Option<&str>) -> Result<ChartSeries, ApiError> {
        match self {
            DataSource::Remote(client) => client.locations(filters, country),
            DataSource::Local { accidents, .. } => Ok(insights::location_series(
                accidents.iter().filter(|a| filters.matches(a)),
                country,
            )),
        }
    }

    pub fn safety_record(&self) -> Result<SafetyRecord, ApiError> {
        match self {
            DataSource::Remote(client) => client.safety_record(),
            DataSource::Local { accidents, .. } => Ok(insights::safety_record(accidents)),
        }
    }

    pub fn next_actions(&self) -> Result<Vec<NextAction>, ApiError> {
        match self {
            DataSource::Remote(client) => client.next_actions(),
            DataSource::Local { accidents, .. } => Ok(insights::next_actions(accidents)),
        }
    }

    pub fn accidents_page(&self, filters: &Filters, page: usize, per_page: usize) -> Result<Vec<Accident>, ApiError> {
        match self {
            DataSource::Remote(client) => client.accidents_page(filters, page, per_page),
            DataSource::Local { accidents, .. } => Ok(insights::paginate(accidents, filters, page, per_page)),
        }
    }
}
