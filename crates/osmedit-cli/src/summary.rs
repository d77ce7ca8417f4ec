use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use osmedit_model::EntityId;
use osmedit_validate::{Severity, ValidationReport};

use osmedit_cli::commands::SplitOutcome;

pub fn print_report(report: &ValidationReport) {
    if report.is_empty() {
        println!("No issues found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Type"),
        header_cell("Way"),
        header_cell("Node"),
        header_cell("Message"),
        header_cell("Fixes"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);

    for issue in &report.issues {
        let slot = |index: usize| {
            issue
                .entity_ids
                .get(index)
                .map_or_else(|| dim_cell("-"), |id| id_cell(*id))
        };
        let fixes: Vec<&str> = issue.fixes.iter().map(|fix| fix.title.as_str()).collect();
        table.add_row(vec![
            severity_cell(issue.severity),
            Cell::new(format!("{}/{}", issue.kind, issue.subtype)),
            slot(0),
            slot(1),
            Cell::new(&issue.message),
            if fixes.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(fixes.join("\n"))
            },
        ]);
    }
    println!("{table}");
    println!(
        "{} issue(s): {} error(s), {} warning(s)",
        report.len(),
        report.error_count(),
        report.warning_count()
    );
}

pub fn print_split(outcome: &SplitOutcome) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Way"), header_cell("Nodes")]);
    apply_table_style(&mut table);
    for id in &outcome.selected {
        let nodes = outcome
            .graph
            .way(*id)
            .map(|way| {
                way.nodes
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        table.add_row(vec![id_cell(*id), Cell::new(nodes)]);
    }
    println!("{}", outcome.annotation);
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn severity_cell(severity: Severity) -> Cell {
    let cell = Cell::new(severity.label());
    match severity {
        Severity::Error => cell.fg(Color::Red).add_attribute(Attribute::Bold),
        Severity::Warning => cell.fg(Color::Yellow),
    }
}

fn id_cell(id: EntityId) -> Cell {
    let cell = Cell::new(id);
    if id.is_new() {
        cell.fg(Color::Green)
    } else {
        cell.fg(Color::Blue)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
