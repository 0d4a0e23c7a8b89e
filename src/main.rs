//! Incident Atlas CLI
//!
//! Body-map heatmaps and dashboard summaries for workplace accident data,
//! from the dashboard API or a local dataset export.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use chrono::NaiveDate;
use incident_atlas::commands::{
    display_schema, display_version, execute_heatmap, execute_incidents, execute_levels, execute_summary,
    parse_gender, validate_args, validate_report_file, HeatmapArgs, IncidentsArgs, LevelsArgs, SourceArgs,
    SummaryArgs,
};
use incident_atlas::insights::MonthRange;
use incident_atlas::render::BodyMapConfig;
use incident_atlas::state::{Filters, Gender};
use incident_atlas::utils::config::{API_URL_ENV, DEFAULT_PER_PAGE};

/// Incident Atlas - accident body-map heatmaps
#[derive(Parser, Debug)]
#[command(name = "incident-atlas")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Data source options shared by every data command
#[derive(Args, Debug)]
struct SourceOpts {
    /// Dashboard API base URL
    #[arg(long, env = API_URL_ENV)]
    api: Option<String>,

    /// Local dataset (JSON array of accidents); takes precedence over --api
    #[arg(short, long)]
    input: Option<PathBuf>,
}

impl From<SourceOpts> for SourceArgs {
    fn from(opts: SourceOpts) -> Self {
        SourceArgs {
            api_url: opts.api,
            input: opts.input,
        }
    }
}

/// Dashboard filters
#[derive(Args, Debug)]
struct FilterOpts {
    /// Gender to include (Homem / Mulher), repeatable
    #[arg(long, value_parser = parse_gender)]
    gender: Vec<Gender>,

    /// Country to include, repeatable
    #[arg(long)]
    country: Vec<String>,

    /// First day to include (YYYY-MM-DD)
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD)
    #[arg(long)]
    end_date: Option<NaiveDate>,
}

impl From<FilterOpts> for Filters {
    fn from(opts: FilterOpts) -> Self {
        Filters {
            genders: opts.gender.into_iter().collect(),
            countries: opts.country,
            start_date: opts.start_date,
            end_date: opts.end_date,
            search: None,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Heat levels for region counts given as region=count
    Levels {
        /// region=count pairs
        #[arg(required = true)]
        pairs: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Build a body-map heatmap report
    Heatmap {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        filters: FilterOpts,

        /// Region table JSON replacing the built-in one
        #[arg(long)]
        regions: Option<PathBuf>,

        /// Output path for JSON report
        #[arg(short, long, default_value = "heatmap.json")]
        output: PathBuf,

        /// Output path for SVG body map (optional)
        #[arg(long)]
        svg: Option<PathBuf>,

        /// Body map title
        #[arg(long)]
        title: Option<String>,

        /// Body map width in pixels
        #[arg(long, default_value = "480")]
        width: usize,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Dashboard cards, charts, safety record and next actions
    Summary {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        filters: FilterOpts,

        /// Months in the monthly chart ("all" or a number)
        #[arg(long, default_value = "all")]
        months: MonthRange,

        /// Country for the locations chart
        #[arg(long)]
        location_country: Option<String>,

        /// Also write the summary as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List incidents, newest first
    Incidents {
        #[command(flatten)]
        source: SourceOpts,

        #[command(flatten)]
        filters: FilterOpts,

        /// Free-text search
        #[arg(long)]
        search: Option<String>,

        /// Incidents per page
        #[arg(long, default_value_t = DEFAULT_PER_PAGE)]
        per_page: usize,

        /// Stop after this many pages
        #[arg(long)]
        pages: Option<usize>,

        /// Also write the incidents as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a heatmap report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Levels { pairs, json } => {
            execute_levels(LevelsArgs { pairs, json })?;
        }

        Commands::Heatmap {
            source,
            filters,
            regions,
            output,
            svg,
            title,
            width,
            summary,
        } => {
            // Body map config only matters when an SVG is written
            let body_map_config = svg.as_ref().map(|_| {
                let mut config = BodyMapConfig::new();
                if let Some(title) = title {
                    config = config.with_title(title);
                }
                config.width = width;
                config
            });

            let args = HeatmapArgs {
                source: source.into(),
                filters: filters.into(),
                regions_file: regions,
                output_json: output,
                output_svg: svg,
                body_map_config,
                print_summary: summary,
            };

            validate_args(&args)?;
            execute_heatmap(args)?;
        }

        Commands::Summary {
            source,
            filters,
            months,
            location_country,
            output,
        } => {
            execute_summary(SummaryArgs {
                source: source.into(),
                filters: filters.into(),
                months,
                location_country,
                output,
            })?;
        }

        Commands::Incidents {
            source,
            filters,
            search,
            per_page,
            pages,
            output,
        } => {
            execute_incidents(IncidentsArgs {
                source: source.into(),
                filters: filters.into(),
                search,
                per_page,
                max_pages: pages,
                output,
            })?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
