//! EventGrid filter commands.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use azrm_sdk::eventgrid::{
    validate_advanced_filter_limit, AdvancedFilter, EventSubscriptionFilter,
    MAX_ADVANCED_FILTER_VALUES,
};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::output::{print_info, print_output, print_single, print_warning, OutputFormat};

use super::CommandContext;

/// EventGrid filter commands.
#[derive(Debug, Args)]
pub struct FiltersCommand {
    #[command(subcommand)]
    command: FiltersSubcommand,
}

#[derive(Debug, Subcommand)]
enum FiltersSubcommand {
    /// Decode a subscription filter JSON file and check its limits.
    Check(CheckArgs),
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Path to a JSON file holding an event subscription filter.
    file: PathBuf,
}

#[derive(Debug, Serialize, Tabled)]
#[serde(rename_all = "camelCase")]
struct FilterRow {
    #[tabled(rename = "Operator")]
    operator_type: String,

    #[tabled(rename = "Block")]
    config_name: String,

    #[tabled(rename = "Key")]
    key: String,

    #[tabled(rename = "Values")]
    values: usize,

    #[tabled(skip)]
    raw: bool,
}

impl FilterRow {
    fn from_filter(filter: &AdvancedFilter) -> Self {
        Self {
            operator_type: filter.operator_type().unwrap_or("-").to_string(),
            config_name: filter.config_name().unwrap_or("(raw)").to_string(),
            key: filter.key().unwrap_or("-").to_string(),
            values: filter.value_count(),
            raw: filter.is_raw(),
        }
    }
}

impl FiltersCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            FiltersSubcommand::Check(args) => check_filters(ctx, args),
        }
    }
}

fn load_filter(path: &Path) -> Result<EventSubscriptionFilter> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read filter file {:?}", path))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to decode event subscription filter from {:?}", path))
}

fn check_filters(ctx: CommandContext, args: CheckArgs) -> Result<()> {
    let filter = load_filter(&args.file)?;
    debug!(
        filters = filter.advanced_filters.len(),
        "Loaded event subscription filter"
    );

    let rows: Vec<FilterRow> = filter
        .advanced_filters
        .iter()
        .map(FilterRow::from_filter)
        .collect();
    let raw_count = rows.iter().filter(|row| row.raw).count();

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "filters": rows,
            "rawFilters": raw_count,
            "valueCount": filter.value_count(),
            "maxValues": MAX_ADVANCED_FILTER_VALUES,
        })),
        OutputFormat::Table => {
            print_output(&rows, ctx.format);
            for row in rows.iter().filter(|row| row.raw) {
                print_warning(&format!(
                    "operator {} is not recognised; the filter is kept as-is",
                    row.operator_type.yellow()
                ));
            }
            print_info(&format!(
                "{} of {} advanced filter values used",
                filter.value_count(),
                MAX_ADVANCED_FILTER_VALUES
            ));
        }
    }

    validate_advanced_filter_limit(&filter)?;
    Ok(())
}
