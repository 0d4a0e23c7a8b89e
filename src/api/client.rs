//! HTTP client for the dashboard JSON API.

use super::types::{
    Accident, BodyPartCount, BodyPartsPayload, ChartSeries, DashboardStats, NextAction, SafetyRecord, Statistics,
};
use crate::insights::MonthRange;
use crate::state::Filters;
use crate::utils::config::DEFAULT_HTTP_TIMEOUT;
use crate::utils::error::ApiError;
use log::{debug, info};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Client for one dashboard backend
pub struct DashboardClient {
    client: Client,
    base_url: String,
}

impl DashboardClient {
    /// Create a new API client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, DEFAULT_HTTP_TIMEOUT)
    }

    /// Create a client with custom timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = normalize_base_url(&base_url.into())?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::RequestFailed)?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Body-part aggregate for the heatmap (`/api/heatmap/bodyparts`)
    pub fn body_parts(&self, filters: &Filters) -> Result<Vec<BodyPartCount>, ApiError> {
        let payload: BodyPartsPayload = self.get_json("/api/heatmap/bodyparts", &filters.to_query_pairs())?;
        Ok(payload.into_counts())
    }

    /// Summary cards (`/api/dashboard/stats`)
    pub fn dashboard_stats(&self, filters: &Filters) -> Result<DashboardStats, ApiError> {
        self.get_json("/api/dashboard/stats", &filters.to_query_pairs())
    }

    /// Unfiltered statistics (`/api/statistics`)
    pub fn statistics(&self) -> Result<Statistics, ApiError> {
        self.get_json("/api/statistics", &[])
    }

    /// Monthly trend (`/api/charts/monthly`)
    pub fn monthly(&self, filters: &Filters, range: MonthRange) -> Result<ChartSeries, ApiError> {
        let mut query = filters.to_query_pairs();
        query.push(("range", range.as_query()));
        self.get_json("/api/charts/monthly", &query)
    }

    /// Sector split (`/api/charts/sectors`)
    pub fn sectors(&self, filters: &Filters) -> Result<ChartSeries, ApiError> {
        self.get_json("/api/charts/sectors", &filters.to_query_pairs())
    }

    /// Top locations (`/api/charts/locations`)
    pub fn locations(&self, filters: &Filters, country: Option<&str>) -> Result<ChartSeries, ApiError> {
        let mut query = filters.to_query_pairs();
        query.push(("filterCountry", country.unwrap_or("all").to_string()));
        self.get_json("/api/charts/locations", &query)
    }

    /// Safety record (`/api/safety-record`)
    pub fn safety_record(&self) -> Result<SafetyRecord, ApiError> {
        self.get_json("/api/safety-record", &[])
    }

    /// Recommended actions (`/api/next-actions`)
    pub fn next_actions(&self) -> Result<Vec<NextAction>, ApiError> {
        self.get_json("/api/next-actions", &[])
    }

    /// Every accident, newest first (`/api/accidents`)
    pub fn accidents(&self) -> Result<Vec<Accident>, ApiError> {
        self.get_json("/api/accidents", &[])
    }

    /// One page of the filtered incident listing (`/api/accidents/filtered`)
    pub fn accidents_page(&self, filters: &Filters, page: usize, per_page: usize) -> Result<Vec<Accident>, ApiError> {
        let query = page_query(filters, page, per_page);
        self.get_json("/api/accidents/filtered", &query)
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        info!("Fetching {}", url);
        debug!("Query: {:?}", query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .map_err(ApiError::RequestFailed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                endpoint: path.to_string(),
            });
        }

        response.json().map_err(ApiError::RequestFailed)
    }
}

/// Query of the incident listing: filters, then paging, then search
pub fn page_query(filters: &Filters, page: usize, per_page: usize) -> Vec<(&'static str, String)> {
    let mut query = filters.to_query_pairs();
    query.push(("page", page.max(1).to_string()));
    query.push(("perPage", per_page.to_string()));
    if let Some(search) = filters.search_text() {
        query.push(("search", search.to_string()));
    }
    query
}

/// Validate the base URL and strip trailing slashes
fn normalize_base_url(url: &str) -> Result<String, ApiError> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ApiError::InvalidUrl("URL cannot be empty".to_string()));
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::InvalidUrl(format!("{} must start with http:// or https://", url)));
    }

    Ok(url.trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("http://localhost:5001/").unwrap(), "http://localhost:5001");
        assert_eq!(normalize_base_url(" https://atlas.example ").unwrap(), "https://atlas.example");
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("ftp://localhost").is_err());
    }

    #[test]
    fn test_page_query_appends_search_last() {
        let filters = Filters::new().with_country("Brasil").with_search(" queda ");
        let query = page_query(&filters, 0, 20);

        assert_eq!(
            query,
            vec![
                ("country", "Brasil".to_string()),
                ("page", "1".to_string()),
                ("perPage", "20".to_string()),
                ("search", "queda".to_string()),
            ]
        );
    }
}
