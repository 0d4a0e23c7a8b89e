//! Safety record: longest streak without a severe accident.

use crate::api::types::{format_timestamp, Accident, SafetyRecord};
use crate::utils::config::SEVERE_LEVELS;
use chrono::NaiveDate;
use log::debug;
use std::collections::BTreeSet;

/// Whether the actual or potential level of an accident is severe
pub fn is_severe(accident: &Accident) -> bool {
    let severe = |level: &Option<String>| level.as_deref().is_some_and(|l| SEVERE_LEVELS.iter().any(|s| *s == l));
    severe(&accident.accident_level) || severe(&accident.potential_level)
}

/// Compute the safety record of a dataset
///
/// **Public** - local equivalent of `/api/safety-record`
///
/// The record is the longest gap between two consecutive days with a
/// severe accident; the earliest such gap wins ties. With fewer than two
/// severe days every field is zero or empty.
pub fn safety_record(accidents: &[Accident]) -> SafetyRecord {
    let severe_days: BTreeSet<NaiveDate> = accidents
        .iter()
        .filter(|a| is_severe(a))
        .filter_map(Accident::day)
        .collect();

    debug!("{} distinct days with severe accidents", severe_days.len());

    if severe_days.len() < 2 {
        return SafetyRecord::default();
    }

    let days: Vec<NaiveDate> = severe_days.into_iter().collect();

    let mut record_days = 0;
    let mut record = None;
    for pair in days.windows(2) {
        let gap = (pair[1] - pair[0]).num_days();
        if gap > record_days {
            record_days = gap;
            record = Some((pair[0], pair[1]));
        }
    }

    let last_severe = days[days.len() - 1];
    let latest = accidents.iter().filter_map(Accident::day).max().unwrap_or(last_severe);

    SafetyRecord {
        record_days,
        record_start_date: record.map(|(start, _)| format_timestamp(start)),
        record_end_date: record.map(|(_, end)| format_timestamp(end)),
        current_days_since_last: (latest - last_severe).num_days(),
        last_severe_accident_date: Some(format_timestamp(last_severe)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accident(date: &str, level: &str, potential: &str) -> Accident {
        Accident {
            date: Some(date.to_string()),
            accident_level: Some(level.to_string()),
            potential_level: Some(potential.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_severe_by_potential_level() {
        assert!(is_severe(&accident("2016-01-01", "I - Baixo", "IV - Alto")));
        assert!(!is_severe(&accident("2016-01-01", "I - Baixo", "II - Moderado")));
    }

    #[test]
    fn test_record_needs_two_severe_days() {
        let accidents = vec![
            accident("2016-01-01", "V - Muito Alto", "V - Muito Alto"),
            accident("2016-01-01", "IV - Alto", "IV - Alto"),
            accident("2016-05-01", "I - Baixo", "I - Baixo"),
        ];
        assert_eq!(safety_record(&accidents), SafetyRecord::default());
    }

    #[test]
    fn test_longest_gap_first_wins() {
        let accidents = vec![
            accident("2016-01-01", "IV - Alto", "IV - Alto"),
            accident("2016-01-11", "I - Baixo", "VI - Crítico"),
            accident("2016-01-21", "IV - Alto", "IV - Alto"),
            accident("2016-02-05", "I - Baixo", "I - Baixo"),
        ];

        let record = safety_record(&accidents);
        assert_eq!(record.record_days, 10);
        assert_eq!(record.record_start_date.as_deref(), Some("2016-01-01T00:00:00"));
        assert_eq!(record.record_end_date.as_deref(), Some("2016-01-11T00:00:00"));
        assert_eq!(record.current_days_since_last, 15);
        assert_eq!(record.last_severe_accident_date.as_deref(), Some("2016-01-21T00:00:00"));
    }
}
