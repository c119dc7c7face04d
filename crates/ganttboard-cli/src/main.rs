//! ganttboard CLI - Project Timeline Dashboard
//!
//! Command-line shell for loading a project spreadsheet, resolving its
//! columns against the canonical schema, and presenting the filtered
//! timeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ganttboard_core::filter::{sort_by_start, FilterSelection, Summary};
use ganttboard_core::normalize::{normalize, Normalized};
use ganttboard_core::schema::ColumnMapping;
use ganttboard_ingest::load_table;
use ganttboard_render::{Renderer, TableRenderer, TimelineRenderer};

#[derive(Parser)]
#[command(name = "ganttboard")]
#[command(author, version, about = "Project timeline dashboard", long_about = None)]
struct Cli {
    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Accepted-value filters over the three categorical dimensions.
///
/// Omitted dimensions keep their default selection (every observed value),
/// so no flag means no filtering.
#[derive(Args, Default)]
struct FilterArgs {
    /// Accept only these phases (repeatable)
    #[arg(long = "phase", value_name = "VALUE")]
    phases: Vec<String>,

    /// Accept only these owners (repeatable)
    #[arg(long = "owner", value_name = "VALUE")]
    owners: Vec<String>,

    /// Accept only these statuses (repeatable)
    #[arg(long = "status", value_name = "VALUE")]
    statuses: Vec<String>,
}

impl FilterArgs {
    fn selection(&self, records: &[ganttboard_core::Record]) -> FilterSelection {
        let mut selection = FilterSelection::from_records(records);
        if !self.phases.is_empty() {
            selection = selection.with_phases(self.phases.iter().cloned());
        }
        if !self.owners.is_empty() {
            selection = selection.with_owners(self.owners.iter().cloned());
        }
        if !self.statuses.is_empty() {
            selection = selection.with_statuses(self.statuses.iter().cloned());
        }
        selection
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard: summary metrics, timeline, and table
    Show {
        /// Input spreadsheet (.xlsx or .csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Skip the timeline chart
        #[arg(long)]
        no_chart: bool,

        /// Print the detected columns and mapping before the dashboard
        #[arg(long)]
        debug_columns: bool,

        /// Chart width in character cells
        #[arg(long, default_value_t = 60)]
        width: usize,
    },

    /// Inspect column detection: normalized headers and the resolved mapping
    Check {
        /// Input spreadsheet (.xlsx or .csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Print summary metrics for the filtered record set
    Summary {
        /// Input spreadsheet (.xlsx or .csv)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::from_default_env(),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Show {
            file,
            filters,
            no_chart,
            debug_columns,
            width,
        } => show(&file, &filters, no_chart, debug_columns, width),
        Commands::Check { file, format } => check(&file, &format),
        Commands::Summary {
            file,
            filters,
            format,
        } => summary(&file, &filters, &format),
    }
}

/// Load, resolve, and normalize; the two terminal failure modes (missing
/// file, unresolved columns) surface here and halt the run.
fn load(file: &PathBuf) -> Result<(ColumnMapping, Normalized)> {
    let table = load_table(file)?;
    let mapping = ColumnMapping::resolve(table.columns());
    mapping.require_complete()?;
    let normalized = normalize(&table, &mapping)?;
    Ok((mapping, normalized))
}

fn print_mapping(mapping: &ColumnMapping) {
    let diag = mapping.diagnostics();
    println!("Detected columns (normalized):");
    for column in &diag.normalized_columns {
        println!("  {column}");
    }
    println!("Mapping:");
    for entry in &diag.mapping {
        match &entry.column {
            Some(column) => println!("  {:<12} -> {}", entry.field, column),
            None => println!("  {:<12} -> (unresolved)", entry.field),
        }
    }
}

fn print_metrics(summary: &Summary, excluded_total: usize) {
    println!(
        "Actividades: {}   Fases: {}   Responsables: {}",
        summary.activities, summary.phases, summary.owners
    );
    if excluded_total > 0 {
        println!("({excluded_total} rows excluded: unreadable or inconsistent dates)");
    }
}

fn show(
    file: &PathBuf,
    filters: &FilterArgs,
    no_chart: bool,
    debug_columns: bool,
    width: usize,
) -> Result<()> {
    let (mapping, normalized) = load(file)?;

    if debug_columns {
        print_mapping(&mapping);
        println!();
    }

    let selection = filters.selection(&normalized.records);
    let mut filtered = selection.apply(&normalized.records);
    sort_by_start(&mut filtered);

    print_metrics(&Summary::of(&filtered), normalized.excluded.total());

    // An empty filtered set is not an error, but there is nothing to draw.
    if filtered.is_empty() {
        println!("warning: no records match the active filters; chart suppressed");
        return Ok(());
    }

    if !no_chart {
        println!();
        print!("{}", TimelineRenderer::new().width(width).render(&filtered)?);
    }
    println!();
    print!("{}", TableRenderer::new().render(&filtered)?);
    Ok(())
}

fn check(file: &PathBuf, format: &str) -> Result<()> {
    let table = load_table(file)?;
    let mapping = ColumnMapping::resolve(table.columns());

    match format {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&mapping.diagnostics())?
        ),
        _ => print_mapping(&mapping),
    }

    // Unresolved fields make the diagnostic run fail after reporting.
    mapping.require_complete()?;
    Ok(())
}

fn summary(file: &PathBuf, filters: &FilterArgs, format: &str) -> Result<()> {
    let (_, normalized) = load(file)?;
    let selection = filters.selection(&normalized.records);
    let filtered = selection.apply(&normalized.records);
    let summary = Summary::of(&filtered);

    match format {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "activities": summary.activities,
                "phases": summary.phases,
                "owners": summary.owners,
                "excluded": normalized.excluded,
            }))?
        ),
        _ => print_metrics(&summary, normalized.excluded.total()),
    }
    Ok(())
}
