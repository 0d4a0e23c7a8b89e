//! Dashboard cards, overall statistics, and the incident listing.

use super::charts::month_key;
use super::{count_by, ranked};
use crate::api::types::{
    format_timestamp, parse_day, Accident, BodyPartCount, BodyPartStat, CountryCount, DashboardStats, DateRange,
    GenderCount, GenderShare, LocationCount, MonthCount, SectorCount, Statistics,
};
use crate::state::Filters;
use crate::utils::config::{GENDER_FEMALE, GENDER_MALE, STATISTICS_LOCATION_LIMIT, UNSPECIFIED_BODY_PART};
use std::cmp::Reverse;

/// Summary cards for the filtered data
///
/// **Public** - local equivalent of `/api/dashboard/stats`
pub fn dashboard_stats(accidents: &[Accident], filters: &Filters) -> DashboardStats {
    let filtered: Vec<&Accident> = accidents.iter().filter(|a| filters.matches(a)).collect();
    let total = filtered.len() as u64;

    let count_gender = |label: &str| {
        filtered
            .iter()
            .filter(|a| a.gender.as_deref() == Some(label))
            .count() as u64
    };
    let women = count_gender(GENDER_FEMALE);
    let men = count_gender(GENDER_MALE);

    let days: Vec<_> = filtered.iter().filter_map(|a| a.day()).collect();

    DashboardStats {
        total,
        women: GenderShare { count: women, percent: share(women, total) },
        men: GenderShare { count: men, percent: share(men, total) },
        countries_count: filters.countries.len(),
        date_range: DateRange {
            start: days.iter().min().copied().map(format_timestamp),
            end: days.iter().max().copied().map(format_timestamp),
        },
    }
}

/// Percentage rounded to one decimal, 0 when `total` is 0
pub fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = count as f64 / total as f64 * 100.0;
    (percent * 10.0).round() / 10.0
}

/// Whole days covered by a date range, `None` if either end is missing
pub fn period_days(range: &DateRange) -> Option<i64> {
    let start = range.start.as_deref().and_then(parse_day)?;
    let end = range.end.as_deref().and_then(parse_day)?;
    Some((end - start).num_days())
}

/// Overall statistics of the unfiltered dataset
///
/// **Public** - local equivalent of `/api/statistics`
pub fn statistics(accidents: &[Accident]) -> Statistics {
    let gender = count_by(accidents.iter().map(|a| a.gender.clone()))
        .into_iter()
        .map(|(gender, count)| GenderCount { gender, count })
        .collect();

    let countries = ranked(count_by(accidents.iter().map(|a| a.country.clone())))
        .into_iter()
        .map(|(country, count)| CountryCount { country, count })
        .collect();

    let sectors = count_by(accidents.iter().map(|a| a.sector.clone()))
        .into_iter()
        .map(|(sector, count)| SectorCount { sector, count })
        .collect();

    let months = count_by(accidents.iter().filter_map(month_key))
        .into_iter()
        .map(|(month, count)| MonthCount { month, count })
        .collect();

    let locations = ranked(count_by(accidents.iter().map(|a| (a.local.clone(), a.country.clone()))))
        .into_iter()
        .take(STATISTICS_LOCATION_LIMIT)
        .map(|((local, country), count)| LocationCount { local, country, count })
        .collect();

    let body_parts = ranked(count_by(accidents.iter().map(|a| a.body_part.clone())))
        .into_iter()
        .map(|(body_part, count)| BodyPartStat { body_part, count })
        .collect();

    Statistics {
        gender,
        countries,
        sectors,
        months,
        locations,
        body_parts,
    }
}

/// Body-part aggregate for the heatmap, most frequent first
///
/// Accidents without a body part, or with the "unspecified" label, are left out.
pub fn body_part_counts<'a>(accidents: impl IntoIterator<Item = &'a Accident>) -> Vec<BodyPartCount> {
    let by_part = count_by(
        accidents
            .into_iter()
            .filter_map(|a| a.body_part.as_deref())
            .filter(|part| *part != UNSPECIFIED_BODY_PART),
    );

    ranked(by_part)
        .into_iter()
        .map(|(part, count)| BodyPartCount::new(part, count))
        .collect()
}

/// One page of the incident listing, newest first
///
/// Pages are 1-based; page 0 is treated as page 1.
pub fn paginate(accidents: &[Accident], filters: &Filters, page: usize, per_page: usize) -> Vec<Accident> {
    let mut matching: Vec<&Accident> = accidents
        .iter()
        .filter(|a| filters.matches_with_search(a))
        .collect();

    // undated incidents sort last
    matching.sort_by_key(|a| Reverse(a.day()));

    let offset = page.max(1).saturating_sub(1).saturating_mul(per_page);
    matching
        .into_iter()
        .skip(offset)
        .take(per_page)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn accident(id: i64, date: &str, gender: &str, body_part: &str) -> Accident {
        Accident {
            id,
            date: Some(date.to_string()),
            gender: Some(gender.to_string()),
            country: Some("Brasil".to_string()),
            local: Some("Local 01".to_string()),
            body_part: Some(body_part.to_string()),
            ..Default::default()
        }
    }

    fn sample() -> Vec<Accident> {
        vec![
            accident(1, "2016-01-01", "Homem", "Mão"),
            accident(2, "2016-02-15", "Homem", "Mão"),
            accident(3, "2016-03-01", "Mulher", "Pé"),
            accident(4, "2016-04-10", "Homem", UNSPECIFIED_BODY_PART),
        ]
    }

    #[test]
    fn test_dashboard_stats() {
        let filters = Filters::new().with_country("Brasil");
        let stats = dashboard_stats(&sample(), &filters);

        assert_eq!(stats.total, 4);
        assert_eq!(stats.men.count, 3);
        assert_eq!(stats.men.percent, 75.0);
        assert_eq!(stats.women.percent, 25.0);
        assert_eq!(stats.countries_count, 1);
        assert_eq!(stats.date_range.start.as_deref(), Some("2016-01-01T00:00:00"));
        assert_eq!(stats.date_range.end.as_deref(), Some("2016-04-10T00:00:00"));
        assert_eq!(period_days(&stats.date_range), Some(100));
    }

    #[test]
    fn test_dashboard_stats_empty() {
        let stats = dashboard_stats(&[], &Filters::new());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.women.percent, 0.0);
        assert_eq!(stats.date_range, DateRange::default());
    }

    #[test]
    fn test_share_rounds_to_one_decimal() {
        assert_eq!(share(1, 3), 33.3);
        assert_eq!(share(2, 3), 66.7);
    }

    #[test]
    fn test_body_part_counts_excludes_unspecified() {
        let counts = body_part_counts(&sample());
        assert_eq!(counts, vec![BodyPartCount::new("Mão", 2), BodyPartCount::new("Pé", 1)]);
    }

    #[test]
    fn test_statistics() {
        let stats = statistics(&sample());
        assert_eq!(stats.months.len(), 4);
        assert_eq!(stats.months[0].month, "2016-01");
        assert_eq!(stats.countries[0].count, 4);
        assert_eq!(stats.body_parts[0].body_part.as_deref(), Some("Mão"));
        assert_eq!(stats.locations.len(), 1);
    }

    #[test]
    fn test_paginate_newest_first() {
        let accidents = sample();
        let first = paginate(&accidents, &Filters::new(), 1, 3);
        let second = paginate(&accidents, &Filters::new(), 2, 3);

        assert_eq!(first.iter().map(|a| a.id).collect::<Vec<_>>(), vec![4, 3, 2]);
        assert_eq!(second.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            paginate(&accidents, &Filters::new(), 0, 1)[0].day(),
            NaiveDate::from_ymd_opt(2016, 4, 10)
        );
    }
}
