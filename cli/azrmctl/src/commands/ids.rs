//! Resource ID commands.

use std::collections::BTreeMap;

use anyhow::Result;
use azrm_id::*;
use azrm_validate::{resource_id, resource_id_insensitively, ValidateFunc};
use clap::{Args, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;
use tracing::debug;

use crate::error::CliError;
use crate::output::{
    print_info, print_output, print_single, print_success, print_warning, OutputFormat,
};

use super::CommandContext;

/// Resource ID commands.
#[derive(Debug, Args)]
pub struct IdsCommand {
    #[command(subcommand)]
    command: IdsSubcommand,
}

#[derive(Debug, Subcommand)]
enum IdsSubcommand {
    /// List known resource ID types with an example of each.
    List,

    /// Parse an ID and show its segments.
    Parse(ParseArgs),

    /// Build an ID from segment values.
    Format(FormatArgs),

    /// Validate an ID against a type.
    Validate(ValidateArgs),

    /// Rewrite an ID with canonical casing.
    Recase(RecaseArgs),
}

#[derive(Debug, Args)]
struct ParseArgs {
    /// Resource ID.
    id: String,

    /// Type to parse as. Detected from the ID when omitted.
    #[arg(long = "type", short = 't')]
    id_type: Option<String>,
}

#[derive(Debug, Args)]
struct FormatArgs {
    /// Type to build.
    #[arg(long = "type", short = 't')]
    id_type: String,

    /// Segment values as NAME=VALUE, e.g. resourceGroupName=group1.
    #[arg(required = true)]
    values: Vec<String>,
}

#[derive(Debug, Args)]
struct ValidateArgs {
    /// Resource ID.
    id: String,

    /// Type the ID must be.
    #[arg(long = "type", short = 't')]
    id_type: String,
}

#[derive(Debug, Args)]
struct RecaseArgs {
    /// Resource ID.
    id: String,
}

impl IdsCommand {
    pub fn run(self, ctx: CommandContext) -> Result<()> {
        match self.command {
            IdsSubcommand::List => list_types(ctx),
            IdsSubcommand::Parse(args) => parse_id(ctx, args),
            IdsSubcommand::Format(args) => format_id(ctx, args),
            IdsSubcommand::Validate(args) => validate_id(ctx, args),
            IdsSubcommand::Recase(args) => recase_id(ctx, args),
        }
    }
}

#[derive(Debug, Serialize, Tabled)]
struct IdTypeRow {
    #[tabled(rename = "Type")]
    #[serde(rename = "type")]
    id_type: &'static str,

    #[tabled(rename = "Segments")]
    segments: String,

    #[tabled(rename = "Example")]
    example: String,
}

#[derive(Debug, Serialize, Tabled)]
struct SegmentRow {
    #[tabled(rename = "Segment")]
    segment: &'static str,

    #[tabled(rename = "Label")]
    label: String,

    #[tabled(rename = "Value")]
    value: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ParsedIdView {
    #[serde(rename = "type")]
    id_type: &'static str,
    id: String,
    segments: BTreeMap<&'static str, String>,
}

fn list_types(ctx: CommandContext) -> Result<()> {
    let rows: Vec<IdTypeRow> = ctx
        .registry
        .specs()
        .map(|spec| IdTypeRow {
            id_type: spec.type_name(),
            segments: spec
                .named_segments()
                .map(Segment::name)
                .collect::<Vec<_>>()
                .join(", "),
            example: spec.example_id(),
        })
        .collect();

    print_output(&rows, ctx.format);
    Ok(())
}

fn parse_id(ctx: CommandContext, args: ParseArgs) -> Result<()> {
    let spec = match &args.id_type {
        Some(id_type) => ctx.require_spec(id_type)?,
        None => {
            let (spec, _) = ctx
                .registry
                .identify(&args.id)
                .ok_or_else(|| CliError::Unidentified(args.id.clone()))?;
            spec
        }
    };

    // Detection always ignores case, so re-parse to apply the selected mode.
    let parsed = spec.parse_with(&args.id, ctx.mode)?;
    debug!(id_type = spec.type_name(), "Parsed resource ID");

    let rows: Vec<SegmentRow> = spec
        .named_segments()
        .zip(parsed.iter())
        .map(|(segment, (name, value))| SegmentRow {
            segment: name,
            label: segment.label(),
            value: value.to_string(),
        })
        .collect();

    let view = ParsedIdView {
        id_type: spec.type_name(),
        id: spec.format(&parsed.clone().into_values()),
        segments: parsed.iter().map(|(name, value)| (name, value.to_string())).collect(),
    };

    match ctx.format {
        OutputFormat::Json => print_single(&view),
        OutputFormat::Table => {
            print_info(&format!("{} {}", view.id_type.bold(), view.id));
            print_output(&rows, ctx.format);
        }
    }

    Ok(())
}

fn format_id(ctx: CommandContext, args: FormatArgs) -> Result<()> {
    let spec = ctx.require_spec(&args.id_type)?;
    let id = build_id(spec, &args.values)?;

    // Formatting never fails, so parse the result to check each value.
    spec.parse(&id)?;

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "type": spec.type_name(),
            "id": id,
        })),
        OutputFormat::Table => println!("{}", id),
    }

    Ok(())
}

fn validate_id(ctx: CommandContext, args: ValidateArgs) -> Result<()> {
    let spec = ctx.require_spec(&args.id_type)?;
    let check = validator_for(spec, ctx.mode)
        .ok_or_else(|| CliError::UnknownType(args.id_type.clone()))?;

    let (warnings, errors) = check(&serde_json::Value::String(args.id.clone()), "id");

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "type": spec.type_name(),
            "valid": errors.is_empty(),
            "warnings": warnings,
            "errors": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
        })),
        OutputFormat::Table => {
            for warning in &warnings {
                print_warning(warning);
            }
            for error in &errors {
                eprintln!("{} {}", "✗".red().bold(), error);
            }
            if errors.is_empty() {
                print_success(&format!("valid {} ID", spec.type_name()));
            }
        }
    }

    if !errors.is_empty() {
        return Err(CliError::ValidationFailed(errors.len()).into());
    }
    Ok(())
}

fn recase_id(ctx: CommandContext, args: RecaseArgs) -> Result<()> {
    let id_type = ctx
        .registry
        .identify(&args.id)
        .map(|(spec, _)| spec.type_name());
    let recased = ctx.registry.recase(&args.id);

    match ctx.format {
        OutputFormat::Json => print_single(&serde_json::json!({
            "type": id_type,
            "input": args.id,
            "id": recased,
        })),
        OutputFormat::Table => {
            if id_type.is_none() {
                print_warning("unrecognised ID type; only common segments were recased");
            }
            println!("{}", recased);
        }
    }

    Ok(())
}

/// Orders `NAME=VALUE` assignments by the spec's named segments.
fn build_id(spec: &ResourceIdSpec, assignments: &[String]) -> Result<String, CliError> {
    let mut given: BTreeMap<String, String> = BTreeMap::new();
    for assignment in assignments {
        let (name, value) = assignment
            .split_once('=')
            .ok_or_else(|| CliError::InvalidAssignment(assignment.clone()))?;
        given.insert(name.to_ascii_lowercase(), value.to_string());
    }

    let mut values = Vec::with_capacity(spec.named_count());
    for segment in spec.named_segments() {
        let value = given
            .remove(&segment.name().to_ascii_lowercase())
            .ok_or_else(|| CliError::MissingSegment {
                id_type: spec.type_name().to_string(),
                segment: segment.name().to_string(),
            })?;
        values.push(value);
    }

    if let Some(extra) = given.into_keys().next() {
        return Err(CliError::UnknownSegment {
            id_type: spec.type_name().to_string(),
            segment: extra,
        });
    }

    Ok(spec.format(&values))
}

/// Returns the validate function for a built-in ID type.
fn validator_for(spec: &ResourceIdSpec, mode: ParseMode) -> Option<ValidateFunc> {
    macro_rules! validators {
        ($($ty:ty),+ $(,)?) => {
            $(
                if spec.type_name() == <$ty>::SPEC.type_name() {
                    let check: ValidateFunc = match mode {
                        ParseMode::Strict => resource_id::<$ty>,
                        ParseMode::Insensitive => resource_id_insensitively::<$ty>,
                    };
                    return Some(check);
                }
            )+
        };
    }

    validators!(
        SubscriptionId,
        ResourceGroupId,
        DataBoxEdgeDeviceId,
        OrderId,
        LogAnalyticsWorkspaceId,
        LogAnalyticsSavedSearchId,
        LogAnalyticsLinkedServiceId,
        SpacecraftId,
        ContactProfileId,
        SpatialAnchorsAccountId,
        EventSubscriptionId,
    );
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn build_id_orders_segments() {
        let id = build_id(
            &ResourceGroupId::SPEC,
            &strings(&[
                "resourcegroupname=group1",
                format!("subscriptionId={EXAMPLE_SUBSCRIPTION_ID}").as_str(),
            ]),
        )
        .unwrap();
        assert_eq!(
            id,
            ResourceGroupId::new(EXAMPLE_SUBSCRIPTION_ID, "group1").id()
        );
    }

    #[test]
    fn build_id_reports_missing_and_unknown_segments() {
        let err =
            build_id(&ResourceGroupId::SPEC, &strings(&["resourceGroupName=g"])).unwrap_err();
        assert!(matches!(
            err,
            CliError::MissingSegment { ref segment, .. } if segment == "subscriptionId"
        ));

        let err = build_id(
            &SubscriptionId::SPEC,
            &strings(&["subscriptionId=s", "colour=blue"]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CliError::UnknownSegment { ref segment, .. } if segment == "colour"
        ));

        let err = build_id(&SubscriptionId::SPEC, &strings(&["subscriptionId"])).unwrap_err();
        assert!(matches!(err, CliError::InvalidAssignment(_)));
    }

    #[test]
    fn every_builtin_type_has_a_validator() {
        for spec in BUILTIN_SPECS {
            assert!(
                validator_for(spec, ParseMode::Strict).is_some(),
                "{}",
                spec.type_name()
            );
        }
    }

    #[test]
    fn validator_follows_parse_mode() {
        let id = OrderId::new(EXAMPLE_SUBSCRIPTION_ID, "group1", "device1", "default")
            .id()
            .replace("/orders/", "/ORDERS/");
        let value = serde_json::Value::String(id);

        let strict = validator_for(&OrderId::SPEC, ParseMode::Strict).unwrap();
        assert_eq!(strict(&value, "id").1.len(), 1);

        let lenient = validator_for(&OrderId::SPEC, ParseMode::Insensitive).unwrap();
        assert!(lenient(&value, "id").1.is_empty());
    }
}
