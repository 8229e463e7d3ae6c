//! Command implementations.

use anyhow::Context;

use dsd_ingest::{SheetLayout, read_extract_path};
use dsd_model::FootingReport;
use dsd_rules::RuleSet;
use dsd_validate::check_footing;

use crate::cli::{CheckArgs, RulesArgs};

/// Resolve the active rule set: a verified JSON file when given, otherwise
/// the built-in D210000 taxonomy.
pub fn load_rule_set(path: Option<&std::path::Path>) -> anyhow::Result<RuleSet> {
    match path {
        Some(path) => RuleSet::from_json_file(path)
            .with_context(|| format!("failed to load rule set from {}", path.display())),
        None => Ok(RuleSet::consolidated_balance_sheet()),
    }
}

fn layout_from_args(args: &CheckArgs) -> SheetLayout {
    let mut layout = SheetLayout::default();
    if let Some(row) = args.year_header_row {
        layout.year_header_row = row;
    }
    if let Some(row) = args.data_start_row {
        layout.data_start_row = row;
    }
    if let Some(row) = args.data_end_row {
        layout.data_end_row = row;
    }
    layout
}

/// Run the footing check for one extract file.
pub fn run_check(args: &CheckArgs) -> anyhow::Result<FootingReport> {
    let rule_set = load_rule_set(args.rules.as_deref())?;
    let layout = layout_from_args(args);

    let extract = read_extract_path(&args.extract, &layout)
        .with_context(|| format!("failed to read extract {}", args.extract.display()))?;
    let report = check_footing(&extract, &rule_set)?;

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
    }
    Ok(report)
}

/// Resolve the rule set for the `rules` subcommand.
pub fn run_rules(args: &RulesArgs) -> anyhow::Result<RuleSet> {
    load_rule_set(args.rules.as_deref())
}
