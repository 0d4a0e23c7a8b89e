//! Summary command: the dashboard cards, charts, safety record and
//! recommended actions in one report.

use super::SourceArgs;
use crate::api::types::{ChartSeries, DashboardStats, NextAction, SafetyRecord};
use crate::insights::{period_days, MonthRange};
use crate::output::write_json;
use crate::state::Filters;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Arguments for the summary command
#[derive(Debug, Clone, Default)]
pub struct SummaryArgs {
    pub source: SourceArgs,

    /// Unrestricted filters are replaced by the dashboard's initial ones
    pub filters: Filters,

    pub months: MonthRange,

    /// Country for the locations chart (`None` = all)
    pub location_country: Option<String>,

    /// Also write the summary as JSON
    pub output: Option<PathBuf>,
}

/// Everything the dashboard shows besides the heatmap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub filters: Filters,
    pub stats: DashboardStats,
    pub period_days: Option<i64>,
    pub monthly: ChartSeries,
    pub sectors: ChartSeries,
    pub locations: ChartSeries,
    pub safety_record: SafetyRecord,
    pub next_actions: Vec<NextAction>,
}

/// Execute the summary command
///
/// **Public** - main entry point called from main.rs
pub fn execute_summary(args: SummaryArgs) -> Result<DashboardSummary> {
    info!("Step 1/4: Opening data source...");
    let source = args.source.open()?;

    info!("Step 2/4: Resolving filters...");
    let filters = if args.filters == Filters::new() {
        let statistics = source.statistics().context("Failed to fetch statistics")?;
        let initial = Filters::initial(&statistics);
        debug!(
            "Initial filters: {} countries, {:?} to {:?}",
            initial.countries.len(),
            initial.start_date,
            initial.end_date
        );
        initial
    } else {
        args.filters.clone()
    };

    info!("Step 3/4: Fetching dashboard data...");
    let stats = source.dashboard_stats(&filters).context("Failed to fetch dashboard stats")?;
    let monthly = source
        .monthly(&filters, args.months)
        .context("Failed to fetch monthly chart")?;
    let sectors = source.sectors(&filters).context("Failed to fetch sector chart")?;
    let locations = source
        .locations(&filters, args.location_country.as_deref())
        .context("Failed to fetch location chart")?;
    let safety_record = source.safety_record().context("Failed to fetch safety record")?;
    let next_actions = source.next_actions().context("Failed to fetch next actions")?;

    let summary = DashboardSummary {
        period_days: period_days(&stats.date_range),
        filters,
        stats,
        monthly,
        sectors,
        locations,
        safety_record,
        next_actions,
    };

    info!("Step 4/4: Writing output...");
    print_summary(&summary);

    if let Some(path) = &args.output {
        write_json(&summary, path).context("Failed to write summary JSON")?;
        info!("✓ Summary written to: {}", path.display());
    }

    Ok(summary)
}

fn print_summary(summary: &DashboardSummary) {
    let stats = &summary.stats;

    println!("\n{}", "=".repeat(64));
    println!("DASHBOARD SUMMARY");
    println!("{}", "=".repeat(64));
    println!("Accidents:  {}", stats.total);
    println!("Women:      {} ({:.1}%)", stats.women.count, stats.women.percent);
    println!("Men:        {} ({:.1}%)", stats.men.count, stats.men.percent);
    println!("Countries:  {}", stats.countries_count);
    if let Some(days) = summary.period_days {
        println!("Period:     {} days", days);
    }

    print_series("Monthly", &summary.monthly);
    print_series("Sectors", &summary.sectors);
    print_series("Locations", &summary.locations);

    let record = &summary.safety_record;
    println!("\nSafety record");
    println!("  Longest run without severe accidents: {} days", record.record_days);
    if let (Some(start), Some(end)) = (&record.record_start_date, &record.record_end_date) {
        println!("    from {} to {}", start, end);
    }
    println!("  Days since last severe accident: {}", record.current_days_since_last);

    println!("\nNext actions");
    for (i, action) in summary.next_actions.iter().enumerate() {
        println!(
            "  {}. [{:?}] {} - {} (due {})",
            i + 1,
            action.priority,
            action.title,
            action.location,
            action.deadline
        );
    }
    println!("{}", "=".repeat(64));
}

fn print_series(title: &str, series: &ChartSeries) {
    println!("\n{} (total {})", title, series.total());
    let max = series.data.iter().copied().max().unwrap_or(0);
    for (label, value) in series.labels.iter().zip(&series.data) {
        let width = if max == 0 { 0 } else { (*value * 30 / max) as usize };
        println!("  {:<24} {:>6} {}", label, value, "█".repeat(width));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Accident;
    use crate::dataset::parse_accidents;
    use tempfile::NamedTempFile;

    #[test]
    fn test_summary_from_dataset() {
        let accidents: Vec<Accident> = parse_accidents(
            r#"[
                {"id": 1, "date": "2016-01-01", "country": "Brasil", "local": "Local 01",
                 "gender": "Homem", "sector": "Mineração", "accidentLevel": "I"},
                {"id": 2, "date": "2016-02-10", "country": "Brasil", "local": "Local 02",
                 "gender": "Mulher", "sector": "Metalurgia", "accidentLevel": "I"}
            ]"#,
        )
        .unwrap();
        let file = NamedTempFile::new().unwrap();
        std::fs::write(file.path(), serde_json::to_string(&accidents).unwrap()).unwrap();

        let summary = execute_summary(SummaryArgs {
            source: SourceArgs::file(file.path()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(summary.stats.total, 2);
        assert_eq!(summary.stats.countries_count, 1);
        assert_eq!(summary.monthly.labels, vec!["Jan/2016", "Fev/2016"]);
        assert_eq!(summary.sectors.data, vec![1, 1, 0]);
        assert_eq!(summary.next_actions.len(), 3);
    }
}
