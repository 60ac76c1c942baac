//! Config commands (persisted defaults).

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::config_path;
use crate::output::{print_single, print_success, OutputFormat};

use super::CommandContext;

/// Show or change persisted defaults.
#[derive(Debug, Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand)]
enum ConfigSubcommand {
    /// Show the saved defaults.
    Show,

    /// Change saved defaults.
    Set(SetArgs),
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Default output format.
    #[arg(long = "default-format", value_enum)]
    default_format: Option<OutputFormat>,

    /// Parse IDs case-insensitively by default.
    #[arg(long = "default-insensitive")]
    default_insensitive: Option<bool>,
}

#[derive(Debug, Serialize)]
struct ConfigView {
    path: String,
    format: OutputFormat,
    insensitive: bool,
}

impl ConfigCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            ConfigSubcommand::Show => show(ctx),
            ConfigSubcommand::Set(args) => set(ctx, args),
        }
    }
}

fn show(ctx: CommandContext) -> Result<()> {
    let view = ConfigView {
        path: config_path()?.display().to_string(),
        format: ctx.config.format(),
        insensitive: ctx.config.insensitive(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            println!("path: {}", view.path);
            println!("format: {}", view.format);
            println!("insensitive: {}", view.insensitive);
        }
    }

    Ok(())
}

fn set(mut ctx: CommandContext, args: SetArgs) -> Result<()> {
    if let Some(format) = args.default_format {
        ctx.config.format = Some(format);
    }
    if let Some(insensitive) = args.default_insensitive {
        ctx.config.insensitive = Some(insensitive);
    }
    let path = ctx.config.save()?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "ok": true,
            "path": path.display().to_string(),
        })),
        OutputFormat::Table => print_success(&format!("Saved defaults to {}", path.display())),
    }

    Ok(())
}
