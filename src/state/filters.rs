//! Dashboard filters.
//!
//! The same filter set drives both data sources: it is serialized into the
//! API's query parameters for remote requests and evaluated directly against
//! accident records for a local dataset.

use crate::api::types::{Accident, Statistics};
use crate::utils::config::{FALLBACK_START_DATE, GENDER_FEMALE, GENDER_MALE};
use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Gender as stored in the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Label used in the dataset and in query parameters
    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => GENDER_MALE,
            Gender::Female => GENDER_FEMALE,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            GENDER_MALE => Some(Gender::Male),
            GENDER_FEMALE => Some(Gender::Female),
            _ => None,
        }
    }
}

/// Active filters of the dashboard
///
/// Empty `genders` or `countries` do not restrict anything, matching the
/// backend which only adds a clause for parameters that are present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub genders: BTreeSet<Gender>,
    pub countries: Vec<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

/// Columns the free-text search looks at
const SEARCH_FIELDS: usize = 6;

impl Filters {
    /// Filters that restrict nothing
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial dashboard filters derived from the overall statistics
    ///
    /// **Public** - used when the dashboard starts
    ///
    /// Selects every known country (sorted), both genders, and the full
    /// span of months present in the data.
    pub fn initial(statistics: &Statistics) -> Self {
        let mut countries: Vec<String> = statistics
            .countries
            .iter()
            .filter_map(|c| c.country.clone())
            .collect();
        countries.sort();
        countries.dedup();

        let first_month = statistics.months.first().and_then(|m| month_start(&m.month));
        let last_month = statistics.months.last().and_then(|m| month_start(&m.month));

        let (start_date, end_date) = match (first_month, last_month) {
            (Some(first), Some(last)) => (Some(first), Some(month_end(last))),
            _ => {
                let (y, m, d) = FALLBACK_START_DATE;
                (NaiveDate::from_ymd_opt(y, m, d), Some(Utc::now().date_naive()))
            }
        };

        Self {
            genders: [Gender::Male, Gender::Female].into_iter().collect(),
            countries,
            start_date,
            end_date,
            search: None,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.genders.insert(gender);
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.countries.push(country.into());
        self
    }

    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Trimmed search text, `None` when blank
    pub fn search_text(&self) -> Option<&str> {
        self.search.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }

    /// Query parameters in the order the dashboard sends them
    ///
    /// `search` is not included: only the incident listing accepts it, and
    /// the client adds it there.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        // dashboard sends men first
        for gender in [Gender::Male, Gender::Female] {
            if self.genders.contains(&gender) {
                pairs.push(("gender", gender.label().to_string()));
            }
        }

        for country in &self.countries {
            pairs.push(("country", country.clone()));
        }

        if let Some(start) = self.start_date {
            pairs.push(("startDate", start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            pairs.push(("endDate", end.format("%Y-%m-%d").to_string()));
        }

        pairs
    }

    /// Whether an accident passes gender, country and date filters
    pub fn matches(&self, accident: &Accident) -> bool {
        if !self.genders.is_empty() {
            let gender = accident.gender.as_deref().and_then(Gender::from_label);
            if !gender.is_some_and(|g| self.genders.contains(&g)) {
                return false;
            }
        }

        if !self.countries.is_empty() {
            let country = accident.country.as_deref().unwrap_or_default();
            if !self.countries.iter().any(|c| c == country) {
                return false;
            }
        }

        if self.start_date.is_some() || self.end_date.is_some() {
            let Some(day) = accident.day() else {
                return false;
            };
            if self.start_date.is_some_and(|start| day < start) {
                return false;
            }
            if self.end_date.is_some_and(|end| day > end) {
                return false;
            }
        }

        true
    }

    /// Like [`Filters::matches`], also applying the free-text search
    pub fn matches_with_search(&self, accident: &Accident) -> bool {
        if !self.matches(accident) {
            return false;
        }

        match self.search_text() {
            Some(needle) => search_matches(accident, needle),
            None => true,
        }
    }
}

/// Case-insensitive substring search over the searchable columns
pub fn search_matches(accident: &Accident, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    let fields: [&Option<String>; SEARCH_FIELDS] = [
        &accident.country,
        &accident.local,
        &accident.description,
        &accident.accident_level,
        &accident.critical_risk,
        &accident.sector,
    ];

    fields
        .iter()
        .filter_map(|f| f.as_deref())
        .any(|value| value.to_lowercase().contains(&needle))
}

/// First day of a `YYYY-MM` month key
pub fn month_start(month: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), "%Y-%m-%d").ok()
}

/// Last day of the month containing `day`
pub fn month_end(day: NaiveDate) -> NaiveDate {
    let (year, month) = if day.month() == 12 {
        (day.year() + 1, 1)
    } else {
        (day.year(), day.month() + 1)
    };

    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .unwrap_or(day)
}
