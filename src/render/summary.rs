//! Terminal summary of a heatmap.

use crate::heat::{HeatBand, HeatResult, MAX_HEAT_LEVEL};

const RESET: &str = "\x1b[0m";
const MIN_REGION_WIDTH: usize = 12;

fn ansi_color(band: Option<HeatBand>) -> &'static str {
    match band {
        Some(HeatBand::Minimal) => "\x1b[33m",       // Yellow
        Some(HeatBand::Low) => "\x1b[38;5;208m",     // Orange
        Some(HeatBand::Medium) => "\x1b[91m",        // Light red
        Some(HeatBand::High) => "\x1b[31;1m",        // Strong red
        None => "\x1b[90m",                          // Gray
    }
}

/// Table of regions, hottest first, with a level bar
///
/// `color` toggles ANSI escapes.
pub fn render_text_summary(results: &[HeatResult], color: bool) -> String {
    let mut sorted: Vec<&HeatResult> = results.iter().collect();
    sorted.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region_id.cmp(&b.region_id)));

    // Region column grows with the longest id
    let region_width = sorted
        .iter()
        .map(|r| r.region_id.chars().count())
        .max()
        .unwrap_or(0)
        .max(MIN_REGION_WIDTH);
    let rule = |left: &str, mid: &str, right: &str| {
        let cells = [region_width + 2, 10, 9, 7, 12];
        let segments: Vec<String> = cells.iter().map(|w| "━".repeat(*w)).collect();
        format!("  {}{}{}", left, segments.join(mid), right)
    };

    let mut lines = Vec::new();
    lines.push("  BODY MAP HEAT".to_string());
    lines.push(rule("┏", "┳", "┓"));
    lines.push(format!(
        "  ┃ {:<rw$} ┃ {:^8} ┃ {:^7} ┃ {:^5} ┃ {:<10} ┃",
        "Region",
        "Count",
        "% max",
        "Level",
        "Band",
        rw = region_width
    ));
    lines.push(rule("┣", "╋", "┫"));

    for result in &sorted {
        let (start, end) = if color { (ansi_color(result.band), RESET) } else { ("", "") };
        let band = result.band.map(|b| b.as_str()).unwrap_or("-");
        lines.push(format!(
            "  ┃ {}{:<rw$}{} ┃ {:>8} ┃ {:>6.1}% ┃ {:>5} ┃ {:<10} ┃",
            start,
            result.region_id,
            end,
            result.count,
            result.percentage,
            result.level,
            band,
            rw = region_width
        ));
    }

    lines.push(rule("┗", "┻", "┛"));
    lines.push(String::new());

    for result in &sorted {
        let (start, end) = if color { (ansi_color(result.band), RESET) } else { ("", "") };
        let bar = "█".repeat(result.level as usize);
        lines.push(format!(
            "  {:<rw$} {}{:width$}{} {:>2}/{}",
            result.region_id,
            start,
            bar,
            end,
            result.level,
            MAX_HEAT_LEVEL,
            rw = region_width,
            width = MAX_HEAT_LEVEL as usize
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_hottest_first_without_color() {
        let results = vec![
            HeatResult {
                region_id: "feet".into(),
                count: 1,
                level: 3,
                percentage: 25.0,
                band: Some(HeatBand::Minimal),
            },
            HeatResult {
                region_id: "hands".into(),
                count: 4,
                level: 10,
                percentage: 100.0,
                band: Some(HeatBand::High),
            },
        ];

        let summary = render_text_summary(&results, false);
        let hands = summary.find("hands").unwrap();
        let feet = summary.find("feet").unwrap();

        assert!(hands < feet);
        assert!(!summary.contains('\x1b'));
        assert!(summary.contains("██████████ 10/10"));
    }

    #[test]
    fn test_long_region_ids_keep_columns_aligned() {
        let results = vec![
            HeatResult {
                region_id: "lower-back-and-hips".into(),
                count: 2,
                level: 10,
                percentage: 100.0,
                band: Some(HeatBand::High),
            },
            HeatResult {
                region_id: "eyes".into(),
                count: 0,
                level: 0,
                percentage: 0.0,
                band: None,
            },
        ];

        let summary = render_text_summary(&results, false);
        let table: Vec<&str> = summary.lines().skip(1).take_while(|l| !l.is_empty()).collect();
        let widths: Vec<usize> = table.iter().map(|l| l.chars().count()).collect();

        assert_eq!(table.len(), 6);
        assert!(widths.iter().all(|w| *w == widths[0]), "ragged table: {:?}", widths);
        assert!(summary.contains("┃ lower-back-and-hips ┃"));
    }
}
