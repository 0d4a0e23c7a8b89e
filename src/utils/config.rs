//! Configuration and constants for the CLI.

use std::time::Duration;

/// Default dashboard API endpoint
pub const DEFAULT_API_URL: &str = "http://localhost:5001";

/// Environment variable that overrides the API endpoint
pub const API_URL_ENV: &str = "INCIDENT_ATLAS_API";

/// Default timeout for API requests
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Current heatmap report schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Incidents per page in the incident feed
pub const DEFAULT_PER_PAGE: usize = 20;

/// Body-part label the dataset uses for "unknown"
pub const UNSPECIFIED_BODY_PART: &str = "Não especificado";

// Gender labels as stored in the dataset
pub const GENDER_MALE: &str = "Homem";
pub const GENDER_FEMALE: &str = "Mulher";

/// Accident levels (actual or potential) considered severe
pub const SEVERE_LEVELS: &[&str] = &["IV - Alto", "V - Muito Alto", "VI - Crítico"];

/// Fixed sector buckets for the sector chart; anything else goes to the last one
pub const SECTOR_BUCKETS: &[&str] = &["Mineração", "Metalurgia"];
pub const OTHER_SECTOR: &str = "Outros";

/// Number of locations in the location chart
pub const LOCATION_CHART_LIMIT: usize = 6;

/// Number of (local, country) pairs in the overall statistics
pub const STATISTICS_LOCATION_LIMIT: usize = 10;

// Recommended actions are dated relative to the end of the dataset
pub const ACTIONS_REFERENCE_DATE: (i32, u32, u32) = (2017, 7, 15);
pub const ACTIONS_WINDOW_START: (i32, u32, u32) = (2017, 1, 1);
pub const ACTIONS_COUNT: usize = 3;

/// Fallback filter start when the dataset has no months
pub const FALLBACK_START_DATE: (i32, u32, u32) = (2016, 1, 1);
