//! Wire types of the dashboard HTTP/JSON API.
//!
//! Field names follow the API's camelCase JSON. The same types are produced
//! locally by `insights` so both data sources answer with identical shapes.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One incident record as served by `/api/accidents`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accident {
    pub id: i64,
    /// ISO date or datetime
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub local: Option<String>,
    #[serde(default)]
    pub sector: Option<String>,
    #[serde(default)]
    pub accident_level: Option<String>,
    #[serde(default)]
    pub potential_level: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub employee_type: Option<String>,
    #[serde(default)]
    pub critical_risk: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub body_part: Option<String>,
}

impl Accident {
    /// Calendar day of the accident, if the date parses
    pub fn day(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_day)
    }
}

/// Parse `YYYY-MM-DD` or an ISO datetime (`YYYY-MM-DDTHH:MM:SS[.fff]`) into a day
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.date()))
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f").map(|dt| dt.date()))
        .ok()
}

/// Format a day the way the API serializes timestamps
pub fn format_timestamp(day: NaiveDate) -> String {
    format!("{}T00:00:00", day.format("%Y-%m-%d"))
}

/// Aggregate count for one raw body-part label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyPartCount {
    #[serde(alias = "body_part", alias = "bodyPart")]
    pub part: String,
    pub count: u64,
}

impl BodyPartCount {
    pub fn new(part: impl Into<String>, count: u64) -> Self {
        Self { part: part.into(), count }
    }
}

/// `/api/heatmap/bodyparts` payload; older servers answer with a bare array
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum BodyPartsPayload {
    Wrapped {
        #[serde(rename = "bodyParts")]
        body_parts: Vec<BodyPartCount>,
    },
    Bare(Vec<BodyPartCount>),
}

impl BodyPartsPayload {
    pub fn into_counts(self) -> Vec<BodyPartCount> {
        match self {
            BodyPartsPayload::Wrapped { body_parts } => body_parts,
            BodyPartsPayload::Bare(counts) => counts,
        }
    }
}

/// Count and share of one gender in the filtered set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderShare {
    pub count: u64,
    pub percent: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// `/api/dashboard/stats` payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total: u64,
    pub women: GenderShare,
    pub men: GenderShare,
    pub countries_count: usize,
    pub date_range: DateRange,
}

/// Labels plus values of one chart
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<u64>,
}

impl ChartSeries {
    pub fn total(&self) -> u64 {
        self.data.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderCount {
    pub gender: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorCount {
    pub sector: Option<String>,
    pub count: u64,
}

/// Month key is `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthCount {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationCount {
    pub local: Option<String>,
    pub country: Option<String>,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPartStat {
    pub body_part: Option<String>,
    pub count: u64,
}

/// `/api/statistics` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub gender: Vec<GenderCount>,
    pub countries: Vec<CountryCount>,
    pub sectors: Vec<SectorCount>,
    pub months: Vec<MonthCount>,
    pub locations: Vec<LocationCount>,
    pub body_parts: Vec<BodyPartStat>,
}

/// `/api/safety-record` payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRecord {
    pub record_days: i64,
    pub record_start_date: Option<String>,
    pub record_end_date: Option<String>,
    pub current_days_since_last: i64,
    pub last_severe_accident_date: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionPriority {
    Urgent,
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    InProgress,
    Planned,
}

/// One entry of `/api/next-actions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextAction {
    pub priority: ActionPriority,
    pub status: ActionStatus,
    pub title: String,
    pub location: String,
    pub responsible: String,
    /// `dd/mm/YYYY`
    pub deadline: String,
    pub description: String,
}
