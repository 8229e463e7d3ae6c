//! Terminal rendering of reports and rule tables.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dsd_model::{FootingItem, FootingReport};
use dsd_rules::{RuleSet, Sign};

pub fn print_report(report: &FootingReport) {
    for sheet in &report.results {
        println!("Sheet: {} ({})", sheet.sheet, sheet.title);
        for (year, items) in &sheet.results_by_year {
            println!("\nYear {year}");
            let mut table = Table::new();
            apply_table_style(&mut table);
            table.set_header(vec![
                header_cell("Item"),
                header_cell("Expected"),
                header_cell("Actual"),
                header_cell("Status"),
            ]);
            align_column(&mut table, 1, CellAlignment::Right);
            align_column(&mut table, 2, CellAlignment::Right);
            align_column(&mut table, 3, CellAlignment::Center);
            for item in items {
                add_item_rows(&mut table, item, 0);
            }
            println!("{table}");
        }
    }
    let mismatches = report.mismatch_count;
    if mismatches == 0 {
        println!("\nAll footings match.");
    } else {
        println!("\n{mismatches} mismatch(es) found.");
    }
}

fn add_item_rows(table: &mut Table, item: &FootingItem, depth: usize) {
    let indent = "  ".repeat(depth);
    table.add_row(vec![
        Cell::new(format!("{indent}{}", item.item)),
        amount_cell(item.expected),
        amount_cell(item.actual),
        status_cell(item),
    ]);
    for child in &item.children {
        add_item_rows(table, child, depth + 1);
    }
}

pub fn print_rules(rule_set: &RuleSet) {
    println!("Sheet: {} ({})", rule_set.sheet_code, rule_set.title);
    println!("Top level: {}", rule_set.top_level.join(", "));

    let mut table = Table::new();
    apply_table_style(&mut table);
    table.set_header(vec![header_cell("Parent"), header_cell("Children")]);
    for (parent, children) in &rule_set.rules {
        let rendered: Vec<String> = children
            .iter()
            .map(|child| match child.sign {
                Sign::Plus => child.reference.clone(),
                Sign::Minus => format!("-{}", child.reference),
            })
            .collect();
        table.add_row(vec![Cell::new(parent), Cell::new(rendered.join("\n"))]);
    }
    println!("{table}");

    if !rule_set.special.is_empty() {
        let mut table = Table::new();
        apply_table_style(&mut table);
        table.set_header(vec![header_cell("Special rule"), header_cell("Identity")]);
        for rule in &rule_set.special {
            table.add_row(vec![
                Cell::new(&rule.name),
                Cell::new(format!("{} = {}", rule.lhs, rule.rhs.join(" + "))),
            ]);
        }
        println!("{table}");
    }
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn amount_cell(amount: Option<f64>) -> Cell {
    match amount {
        Some(value) => Cell::new(format_amount(value)),
        None => Cell::new("-").fg(Color::DarkGrey),
    }
}

fn status_cell(item: &FootingItem) -> Cell {
    if item.is_match {
        Cell::new("OK").fg(Color::Green)
    } else {
        Cell::new("MISMATCH")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

/// Thousands-separated rendering; two decimals only when the value carries a
/// fractional part.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    let text = if (value - rounded).abs() < f64::EPSILON {
        format!("{rounded:.0}")
    } else {
        format!("{value:.2}")
    };
    group_thousands(&text)
}

fn group_thousands(text: &str) -> String {
    let (sign, rest) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (integer, fraction) = match rest.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (idx, ch) in integer.chars().enumerate() {
        if idx > 0 && (integer.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(fraction) => format!("{sign}{grouped}.{fraction}"),
        None => format!("{sign}{grouped}"),
    }
}
