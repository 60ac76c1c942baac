//! DataBox Edge SKU commands.

use anyhow::Result;
use azrm_sdk::databoxedge::{parse_device_sku_name, SkuName, SkuTier};
use azrm_validate::data_box_edge_sku_name;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::output::{print_output, print_single, print_warning, OutputFormat};

use super::CommandContext;

/// DataBox Edge SKU commands.
#[derive(Debug, Args)]
pub struct SkuCommand {
    #[command(subcommand)]
    command: SkuSubcommand,
}

#[derive(Debug, Subcommand)]
enum SkuSubcommand {
    /// Split a SKU such as `EdgeP_Base-Standard` into name and tier.
    Parse(ParseSkuArgs),

    /// List known SKU names and tiers.
    List,
}

#[derive(Debug, Args)]
struct ParseSkuArgs {
    /// SKU string.
    sku: String,
}

#[derive(Debug, Serialize, Tabled)]
struct SkuRow {
    #[tabled(rename = "Name")]
    name: String,

    #[tabled(rename = "Tier")]
    tier: String,

    #[tabled(rename = "Known")]
    known: bool,
}

impl SkuCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            SkuSubcommand::Parse(args) => parse_sku(ctx, args),
            SkuSubcommand::List => list_skus(ctx),
        }
    }
}

fn parse_sku(ctx: CommandContext, args: ParseSkuArgs) -> Result<()> {
    let sku = parse_device_sku_name(&args.sku)?;
    let (warnings, _) = data_box_edge_sku_name(&serde_json::Value::String(args.sku), "sku");

    let row = SkuRow {
        name: sku.name.to_string(),
        tier: sku.tier.to_string(),
        known: sku.name.is_known(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "sku": row,
            "warnings": warnings,
        })),
        OutputFormat::Table => {
            for warning in &warnings {
                print_warning(warning);
            }
            print_output(&[row], ctx.format);
        }
    }

    Ok(())
}

fn list_skus(ctx: CommandContext) -> Result<()> {
    let rows: Vec<SkuRow> = SkuName::possible_values()
        .iter()
        .flat_map(|name| {
            SkuTier::possible_values().iter().map(move |tier| SkuRow {
                name: name.to_string(),
                tier: tier.to_string(),
                known: true,
            })
        })
        .collect();

    print_output(&rows, ctx.format);
    Ok(())
}
