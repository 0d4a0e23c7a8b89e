//! Dashboard state and its update function.
//!
//! State is never mutated in place: every [`Action`] produces a new
//! [`DashboardState`] through [`update`], and views are projections of it.

pub mod filters;

pub use filters::{Filters, Gender};

use crate::api::types::Accident;
use crate::utils::config::DEFAULT_PER_PAGE;
use chrono::NaiveDate;
use log::debug;

/// Paginated incident list
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentFeed {
    /// Incidents loaded so far, newest first
    pub items: Vec<Accident>,
    /// Next page to request (1-based)
    pub page: usize,
    pub per_page: usize,
    /// False once a short page came back
    pub has_more: bool,
}

impl IncidentFeed {
    pub fn new(per_page: usize) -> Self {
        Self {
            items: Vec::new(),
            page: 1,
            per_page: per_page.max(1),
            has_more: true,
        }
    }
}

impl Default for IncidentFeed {
    fn default() -> Self {
        Self::new(DEFAULT_PER_PAGE)
    }
}

/// Whole dashboard state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub filters: Filters,
    pub available_countries: Vec<String>,
    pub incidents: IncidentFeed,
}

impl DashboardState {
    pub fn new(filters: Filters, per_page: usize) -> Self {
        Self {
            available_countries: filters.countries.clone(),
            filters,
            incidents: IncidentFeed::new(per_page),
        }
    }
}

/// Something that happened on the dashboard
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ToggleGender(Gender),
    SetCountries(Vec<String>),
    SetDateRange(Option<NaiveDate>, Option<NaiveDate>),
    SetSearch(String),
    /// A page of the incident listing arrived
    PageLoaded(Vec<Accident>),
}

/// Apply an action, returning the next state
///
/// Any change to filters or search restarts the incident feed at page 1.
pub fn update(state: &DashboardState, action: Action) -> DashboardState {
    let mut next = state.clone();

    match action {
        Action::ToggleGender(gender) => {
            if !next.filters.genders.remove(&gender) {
                next.filters.genders.insert(gender);
            }
            next.incidents = IncidentFeed::new(state.incidents.per_page);
        }
        Action::SetCountries(countries) => {
            next.filters.countries = countries;
            next.incidents = IncidentFeed::new(state.incidents.per_page);
        }
        Action::SetDateRange(start, end) => {
            next.filters.start_date = start;
            next.filters.end_date = end;
            next.incidents = IncidentFeed::new(state.incidents.per_page);
        }
        Action::SetSearch(search) => {
            let search = search.trim().to_string();
            next.filters.search = (!search.is_empty()).then_some(search);
            next.incidents = IncidentFeed::new(state.incidents.per_page);
        }
        Action::PageLoaded(page) => {
            let feed = &mut next.incidents;
            feed.has_more = page.len() == feed.per_page;
            feed.page += 1;
            feed.items.extend(page);
            debug!(
                "Incident feed: {} items, next page {}, more: {}",
                feed.items.len(),
                feed.page,
                feed.has_more
            );
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: usize) -> Vec<Accident> {
        (0..n)
            .map(|i| Accident {
                id: i as i64,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn test_full_page_keeps_feed_open() {
        let state = DashboardState::new(Filters::new(), 2);
        let state = update(&state, Action::PageLoaded(page(2)));

        assert_eq!(state.incidents.items.len(), 2);
        assert_eq!(state.incidents.page, 2);
        assert!(state.incidents.has_more);
    }

    #[test]
    fn test_short_page_closes_feed() {
        let state = DashboardState::new(Filters::new(), 2);
        let state = update(&state, Action::PageLoaded(page(2)));
        let state = update(&state, Action::PageLoaded(page(1)));

        assert_eq!(state.incidents.items.len(), 3);
        assert!(!state.incidents.has_more);
    }

    #[test]
    fn test_filter_change_resets_feed() {
        let state = DashboardState::new(Filters::new(), 2);
        let loaded = update(&state, Action::PageLoaded(page(2)));
        let toggled = update(&loaded, Action::ToggleGender(Gender::Male));

        assert!(toggled.filters.genders.contains(&Gender::Male));
        assert_eq!(toggled.incidents, IncidentFeed::new(2));

        let toggled_back = update(&toggled, Action::ToggleGender(Gender::Male));
        assert!(toggled_back.filters.genders.is_empty());
    }

    #[test]
    fn test_update_leaves_previous_state_untouched() {
        let state = DashboardState::new(Filters::new(), 20);
        let _ = update(&state, Action::SetSearch("queda".into()));
        assert_eq!(state.filters.search, None);
    }

    #[test]
    fn test_blank_search_clears() {
        let state = DashboardState::new(Filters::new().with_search("x"), 20);
        let state = update(&state, Action::SetSearch("   ".into()));
        assert_eq!(state.filters.search, None);
    }
}
