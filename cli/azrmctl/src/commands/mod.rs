//! CLI commands.

mod config;
mod filters;
mod ids;
mod sku;

use anyhow::Result;
use azrm_id::{ParseMode, ResourceIdRegistry, ResourceIdSpec};
use clap::builder::BoolishValueParser;
use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::CliError;
use crate::output::OutputFormat;

/// azrm - Parse, validate and recase Azure Resource Manager IDs.
#[derive(Debug, Parser)]
#[command(name = "azrm")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format (table or json).
    #[arg(long, global = true, value_enum, env = "AZRM_FORMAT")]
    format: Option<OutputFormat>,

    /// Match literal segments such as `resourceGroups` regardless of case.
    #[arg(
        long,
        global = true,
        env = "AZRM_INSENSITIVE",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    insensitive: Option<bool>,

    /// Match literal segments exactly. Takes precedence over `--insensitive`.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Parse, format, validate and recase resource IDs.
    Ids(ids::IdsCommand),

    /// Inspect DataBox Edge SKUs.
    Sku(sku::SkuCommand),

    /// Check EventGrid event subscription filters.
    Filters(filters::FiltersCommand),

    /// Show or change persisted defaults.
    Config(config::ConfigCommand),

    /// Show CLI version.
    Version,
}

impl Cli {
    /// Run the CLI command.
    pub fn run(self) -> Result<()> {
        let config = Config::load()?;

        let format = self.format.unwrap_or_else(|| config.format());
        let mode = resolve_mode(self.strict, self.insensitive, &config);

        let ctx = CommandContext {
            config,
            registry: ResourceIdRegistry::builtin(),
            format,
            mode,
        };

        match self.command {
            Commands::Ids(cmd) => cmd.run(ctx),
            Commands::Sku(cmd) => cmd.run(ctx),
            Commands::Filters(cmd) => cmd.run(ctx),
            Commands::Config(cmd) => cmd.run(ctx),
            Commands::Version => {
                println!("azrm {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

/// Picks the parse mode: `--strict`, then `--insensitive` or its env var, then config.
fn resolve_mode(strict: bool, insensitive: Option<bool>, config: &Config) -> ParseMode {
    if strict {
        return ParseMode::Strict;
    }
    if insensitive.unwrap_or_else(|| config.insensitive()) {
        ParseMode::Insensitive
    } else {
        ParseMode::Strict
    }
}

/// Shared command context.
pub struct CommandContext {
    pub config: Config,
    pub registry: ResourceIdRegistry,
    pub format: OutputFormat,
    pub mode: ParseMode,
}

impl CommandContext {
    /// Look up a registered ID type by name.
    pub fn require_spec(&self, type_name: &str) -> Result<&'static ResourceIdSpec> {
        self.registry
            .get(type_name)
            .ok_or_else(|| CliError::UnknownType(type_name.to_string()).into())
    }
}
