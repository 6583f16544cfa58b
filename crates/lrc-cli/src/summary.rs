use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use lrc_cli::types::RunResult;
use lrc_model::output_columns;

pub fn print_summary(result: &RunResult) {
    let report = &result.report;
    println!("Input: {}", report.input.display());
    if report.dry_run {
        println!("Output: {} (dry run, nothing written)", report.output_dir.display());
    } else {
        println!("Output: {}", report.output_dir.display());
    }
    if let Some(path) = &report.manifest_path {
        println!("Manifest: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![header_cell("#"), header_cell("File"), header_cell("Rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    for partition in &report.partitions {
        table.add_row(vec![
            Cell::new(partition.index),
            Cell::new(&partition.file_name).fg(Color::Blue),
            Cell::new(partition.rows),
        ]);
    }
    table.add_row(vec![
        dim_cell("-"),
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_rows).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");

    print_counts_table(result);
    print_preview(&result.preview);
}

fn print_counts_table(result: &RunResult) {
    let report = &result.report;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Count"), header_cell("Rows")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Input rows"), Cell::new(report.input_rows)]);
    table.add_row(vec![
        Cell::new("Dropped: invalid collection date"),
        count_cell(report.dropped.invalid_collect_date, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Dropped: missing patient"),
        count_cell(report.dropped.missing_patient, Color::Yellow),
    ]);
    table.add_row(vec![
        Cell::new("Groups with conflicting values"),
        count_cell(report.conflicts.groups, Color::Yellow),
    ]);
    for (column, groups) in &report.conflicts.by_column {
        table.add_row(vec![
            Cell::new(format!("  -> {column}")).fg(Color::DarkGrey),
            count_cell(*groups, Color::Yellow),
        ]);
    }
    table.add_row(vec![
        Cell::new("Consolidated rows")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(report.total_rows).add_attribute(Attribute::Bold),
    ]);
    println!();
    println!("{table}");
}

fn print_preview(rows: &[Vec<String>]) {
    if rows.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(output_columns().into_iter().map(header_cell));
    apply_table_style(&mut table);
    for row in rows {
        table.add_row(row.iter().map(|value| {
            if value.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(value)
            }
        }));
    }
    println!();
    println!("Preview:");
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
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
