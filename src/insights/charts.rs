//! Chart series: monthly trend, sector split, and top locations.

use super::{count_by, ranked};
use crate::api::types::{Accident, ChartSeries};
use crate::utils::config::{LOCATION_CHART_LIMIT, OTHER_SECTOR, SECTOR_BUCKETS};
use std::str::FromStr;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// How many months the monthly chart shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthRange {
    #[default]
    All,
    /// First `n` months of the filtered data
    Limit(usize),
}

impl MonthRange {
    /// Value of the `range` query parameter
    pub fn as_query(&self) -> String {
        match self {
            MonthRange::All => "all".to_string(),
            MonthRange::Limit(n) => n.to_string(),
        }
    }
}

impl FromStr for MonthRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" | "" => Ok(MonthRange::All),
            other => other
                .parse::<usize>()
                .map(MonthRange::Limit)
                .map_err(|_| format!("invalid month range '{}', expected 'all' or a number", other)),
        }
    }
}

/// Chart label for a `YYYY-MM` key
///
/// # Example
/// `"2016-01"` becomes `"Jan/2016"`. Unknown month numbers are kept as-is.
pub fn month_label(month: &str) -> String {
    match month.split_once('-') {
        Some((year, number)) => {
            let name = number
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| MONTH_NAMES.get(i))
                .copied()
                .unwrap_or(number);
            format!("{}/{}", name, year)
        }
        None => month.to_string(),
    }
}

/// `YYYY-MM` key of an accident, if its date parses
pub fn month_key(accident: &Accident) -> Option<String> {
    accident.day().map(|d| d.format("%Y-%m").to_string())
}

/// Accidents per month, oldest first
pub fn monthly_series<'a>(accidents: impl IntoIterator<Item = &'a Accident>, range: MonthRange) -> ChartSeries {
    let by_month = count_by(accidents.into_iter().filter_map(month_key));

    let take = match range {
        MonthRange::All => usize::MAX,
        MonthRange::Limit(n) => n,
    };

    let (labels, data) = by_month
        .into_iter()
        .take(take)
        .map(|(month, count)| (month_label(&month), count))
        .unzip();

    ChartSeries { labels, data }
}

/// Accidents per sector bucket (mining, metallurgy, everything else)
pub fn sector_series<'a>(accidents: impl IntoIterator<Item = &'a Accident>) -> ChartSeries {
    let mut data = vec![0u64; SECTOR_BUCKETS.len() + 1];

    for accident in accidents {
        let bucket = accident
            .sector
            .as_deref()
            .and_then(|s| SECTOR_BUCKETS.iter().position(|b| *b == s))
            .unwrap_or(SECTOR_BUCKETS.len());
        data[bucket] += 1;
    }

    let labels = SECTOR_BUCKETS
        .iter()
        .chain(std::iter::once(&OTHER_SECTOR))
        .map(|s| s.to_string())
        .collect();

    ChartSeries { labels, data }
}

/// Locations with the most accidents, optionally within one country
///
/// `country` of `None` or `"all"` means every country.
pub fn location_series<'a>(accidents: impl IntoIterator<Item = &'a Accident>, country: Option<&str>) -> ChartSeries {
    let country = country.filter(|c| *c != "all");

    let by_local = count_by(
        accidents
            .into_iter()
            .filter(|a| country.map_or(true, |c| a.country.as_deref() == Some(c)))
            .filter_map(|a| a.local.clone()),
    );

    let (labels, data) = ranked(by_local).into_iter().take(LOCATION_CHART_LIMIT).unzip();

    ChartSeries { labels, data }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accident(date: &str, sector: Option<&str>, local: &str, country: &str) -> Accident {
        Accident {
            date: Some(date.to_string()),
            sector: sector.map(String::from),
            local: Some(local.to_string()),
            country: Some(country.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label("2016-01"), "Jan/2016");
        assert_eq!(month_label("2017-09"), "Set/2017");
        assert_eq!(month_label("2017-13"), "13/2017");
        assert_eq!(month_label("garbage"), "garbage");
    }

    #[test]
    fn test_monthly_series_keeps_first_months() {
        let accidents = vec![
            accident("2016-03-02", None, "A", "Brasil"),
            accident("2016-01-10", None, "A", "Brasil"),
            accident("2016-01-20", None, "A", "Brasil"),
            accident("2016-02-01", None, "A", "Brasil"),
        ];

        let all = monthly_series(&accidents, MonthRange::All);
        assert_eq!(all.labels, vec!["Jan/2016", "Fev/2016", "Mar/2016"]);
        assert_eq!(all.data, vec![2, 1, 1]);

        let limited = monthly_series(&accidents, MonthRange::Limit(2));
        assert_eq!(limited.labels, vec!["Jan/2016", "Fev/2016"]);
    }

    #[test]
    fn test_sector_series_buckets() {
        let accidents = vec![
            accident("2016-01-01", Some("Mineração"), "A", "Brasil"),
            accident("2016-01-01", Some("Mineração"), "A", "Brasil"),
            accident("2016-01-01", Some("Metalurgia"), "A", "Brasil"),
            accident("2016-01-01", Some("Agricultura"), "A", "Brasil"),
            accident("2016-01-01", None, "A", "Brasil"),
        ];

        let series = sector_series(&accidents);
        assert_eq!(series.labels, vec!["Mineração", "Metalurgia", "Outros"]);
        assert_eq!(series.data, vec![2, 1, 2]);
    }

    #[test]
    fn test_location_series_country_filter() {
        let accidents = vec![
            accident("2016-01-01", None, "Local 01", "Brasil"),
            accident("2016-01-01", None, "Local 01", "Brasil"),
            accident("2016-01-01", None, "Local 02", "EUA"),
            accident("2016-01-01", None, "Local 02", "EUA"),
            accident("2016-01-01", None, "Local 02", "EUA"),
        ];

        let all = location_series(&accidents, Some("all"));
        assert_eq!(all.labels, vec!["Local 02", "Local 01"]);

        let brazil = location_series(&accidents, Some("Brasil"));
        assert_eq!(brazil.labels, vec!["Local 01"]);
        assert_eq!(brazil.data, vec![2]);
    }

    #[test]
    fn test_month_range_parse() {
        assert_eq!("all".parse::<MonthRange>(), Ok(MonthRange::All));
        assert_eq!("6".parse::<MonthRange>(), Ok(MonthRange::Limit(6)));
        assert!("six".parse::<MonthRange>().is_err());
    }
}
