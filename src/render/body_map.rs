//! SVG body heatmap generation.
//!
//! Draws a simple body silhouette where each region is filled with the
//! color of its heat band and an opacity that grows with its level.
//! Region ids the silhouette does not know are listed beside it.

use crate::heat::{HeatBand, HeatResult, MAX_HEAT_LEVEL};
use crate::utils::error::RenderError;
use log::{debug, info};

/// Body map configuration
#[derive(Debug, Clone)]
pub struct BodyMapConfig {
    pub title: String,
    pub width: usize,
}

impl Default for BodyMapConfig {
    fn default() -> Self {
        Self {
            title: "Incident Body Map".to_string(),
            width: 480,
        }
    }
}

impl BodyMapConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

const FIGURE_HEIGHT: usize = 390;
const TITLE_HEIGHT: usize = 40;
const LEGEND_HEIGHT: usize = 70;
const MIN_WIDTH: usize = 240;
// Silhouette spans x 20..200 once translated
const SILHOUETTE_WIDTH: usize = 220;
const EXTRA_COLUMN_WIDTH: usize = 180;
const EXTRA_ROW_HEIGHT: usize = 22;
const NEUTRAL_FILL: &str = "rgb(229, 231, 235)";

// Draw order matters: eyes sit on top of the head
const SILHOUETTE: &[(&str, &str)] = &[
    ("head", r#"<circle cx="100" cy="40" r="28"/>"#),
    (
        "eyes",
        r#"<ellipse cx="90" cy="36" rx="5" ry="3"/><ellipse cx="110" cy="36" rx="5" ry="3"/>"#,
    ),
    ("trunk", r#"<rect x="68" y="74" width="64" height="130" rx="10"/>"#),
    ("arms-left", r#"<rect x="40" y="80" width="22" height="110" rx="8"/>"#),
    ("arms-right", r#"<rect x="138" y="80" width="22" height="110" rx="8"/>"#),
    (
        "hands",
        r#"<circle cx="51" cy="204" r="12"/><circle cx="149" cy="204" r="12"/>"#,
    ),
    (
        "legs",
        r#"<rect x="70" y="210" width="26" height="140" rx="8"/><rect x="104" y="210" width="26" height="140" rx="8"/>"#,
    ),
    (
        "feet",
        r#"<ellipse cx="80" cy="362" rx="18" ry="9"/><ellipse cx="120" cy="362" rx="18" ry="9"/>"#,
    ),
];

/// Fill color of a band
pub fn band_color(band: HeatBand) -> &'static str {
    match band {
        HeatBand::Minimal => "rgb(250, 204, 21)", // Yellow
        HeatBand::Low => "rgb(249, 115, 22)",     // Orange
        HeatBand::Medium => "rgb(248, 113, 113)", // Light red
        HeatBand::High => "rgb(220, 38, 38)",     // Strong red
    }
}

/// Fill color and opacity for a heat level
pub fn level_style(level: u8) -> (&'static str, f64) {
    match HeatBand::from_level(level) {
        None => (NEUTRAL_FILL, 1.0),
        Some(band) => {
            let level = level.min(MAX_HEAT_LEVEL) as f64;
            (band_color(band), 0.35 + 0.065 * level)
        }
    }
}

/// Generate the SVG body map for a set of heat results
pub fn render_body_svg(results: &[HeatResult], config: Option<&BodyMapConfig>) -> Result<String, RenderError> {
    if results.is_empty() {
        return Err(RenderError::EmptyRegions);
    }

    let config = config.cloned().unwrap_or_default();

    let extra: Vec<&HeatResult> = results
        .iter()
        .filter(|r| !SILHOUETTE.iter().any(|(id, _)| *id == r.region_id))
        .collect();

    let mut width = config.width.max(MIN_WIDTH);
    let extra_x = (width / 2).max(SILHOUETTE_WIDTH);
    if !extra.is_empty() {
        width = width.max(extra_x + EXTRA_COLUMN_WIDTH);
    }
    let figure_height = FIGURE_HEIGHT.max(20 + extra.len() * EXTRA_ROW_HEIGHT);
    let height = TITLE_HEIGHT + figure_height + LEGEND_HEIGHT;

    info!("Rendering body map with {} regions", results.len());

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, height, width, height
    ));
    svg.push_str(
        r#"<style>.body-part { stroke: rgb(75, 85, 99); stroke-width: 1; } .body-part:hover { stroke-width: 2; cursor: pointer; } text { font-family: sans-serif; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="24" font-size="16" text-anchor="middle" font-weight="bold">{}</text>"#,
        width / 2,
        escape_xml(&config.title)
    ));

    svg.push_str(&format!(r#"<g transform="translate(20,{})">"#, TITLE_HEIGHT));
    for (region_id, shapes) in SILHOUETTE {
        match results.iter().find(|r| r.region_id == *region_id) {
            Some(result) => render_region(&mut svg, result, shapes),
            None => debug!("No data for silhouette region {}", region_id),
        }
    }
    svg.push_str("</g>");

    render_extra_regions(&mut svg, &extra, extra_x);

    render_legend(&mut svg, TITLE_HEIGHT + figure_height);

    svg.push_str("</svg>");

    info!("Body map rendered ({} bytes)", svg.len());
    Ok(svg)
}

fn render_region(out: &mut String, result: &HeatResult, shapes: &str) {
    let (fill, opacity) = level_style(result.level);
    let id = escape_xml(&result.region_id);

    out.push_str(&format!(
        r#"<g id="{}" class="body-part" data-level="{}" data-count="{}" data-name="{}" fill="{}" fill-opacity="{:.3}"><title>{}: {} acidentes (nível {})</title>{}</g>"#,
        id, result.level, result.count, id, fill, opacity, id, result.count, result.level, shapes
    ));
}

/// Regions outside the silhouette, as a swatch list on the right
fn render_extra_regions(out: &mut String, extra: &[&HeatResult], x: usize) {
    for (i, result) in extra.iter().enumerate() {
        let y = TITLE_HEIGHT + 20 + i * EXTRA_ROW_HEIGHT;
        let (fill, opacity) = level_style(result.level);
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="15" height="15" rx="2" fill="{}" fill-opacity="{:.3}" data-level="{}"/>"#,
            x, y, fill, opacity, result.level
        ));
        out.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12">{} ({})</text>"#,
            x + 20,
            y + 12,
            escape_xml(&result.region_id),
            result.count
        ));
    }
}

fn render_legend(out: &mut String, top: usize) {
    let legend_y = top + 30;

    out.push_str(&format!(
        r#"<text x="10" y="{}" font-size="14" font-weight="bold">Legend:</text>"#,
        legend_y
    ));

    for (i, band) in HeatBand::ALL.iter().enumerate() {
        let x = 10 + (i % 2) * 150;
        let y = legend_y + 10 + (i / 2) * 20;
        let (low, high) = band.levels();
        out.push_str(&format!(
            r#"<rect x="{}" y="{}" width="15" height="15" fill="{}" rx="2"/>"#,
            x,
            y,
            band_color(*band)
        ));
        out.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12">{} ({}-{})</text>"#,
            x + 20,
            y + 12,
            band,
            low,
            high
        ));
    }
}

/// Escape text for use in SVG content and attributes
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
