//! Terminal rendering.
//!
//! Response bodies and command results go to stdout; status lines and
//! headers go to stderr so that `courier send ... | courier query` works.

use std::fmt::Write as _;

use courier_domain::{history::HistoryItem, response::ExecutionOutcome};
use courier_infrastructure::table::{Row, cell_text};

const ELLIPSIS: char = '…';

/// Status line for a completed or failed call.
pub fn status_line(outcome: &ExecutionOutcome) -> String {
    match &outcome.error {
        Some(failure) => format!(
            "{} ({} ms): {}",
            failure.kind.title(),
            outcome.duration_ms(),
            failure.message
        ),
        None => format!(
            "{} {} ({} ms, {})",
            outcome.status,
            outcome.status_text,
            outcome.duration_ms(),
            format_size(outcome.size)
        ),
    }
}

/// Prints a call result in text form.
pub fn print_outcome(outcome: &ExecutionOutcome, include_headers: bool) {
    eprintln!("{}", status_line(outcome));

    if let Some(failure) = &outcome.error {
        for suggestion in failure.kind.suggestions() {
            eprintln!("  - {suggestion}");
        }
        return;
    }

    if include_headers {
        for (name, value) in &outcome.headers {
            eprintln!("{name}: {value}");
        }
        eprintln!();
    }

    if outcome.transformed {
        eprintln!("(transformed)");
    }
    println!("{}", outcome.body.to_display_string());
}

pub fn format_size(bytes: usize) -> String {
    #[allow(clippy::cast_precision_loss)]
    let size = bytes as f64;
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", size / 1024.0)
    } else {
        format!("{:.1} MB", size / (1024.0 * 1024.0))
    }
}

/// One line per history entry, newest first.
pub fn history_lines(entries: &[&HistoryItem]) -> String {
    let mut out = String::new();
    for item in entries {
        let status = if item.is_failure() {
            "ERR".to_string()
        } else {
            item.response_status.to_string()
        };
        let _ = writeln!(
            out,
            "{id}  {status:>3}  {method:<7} {url}  ({duration}, {ago})",
            id = item.id,
            method = item.request.method,
            url = item.request.url,
            duration = item.duration_display(),
            ago = item.time_ago()
        );
    }
    out
}

/// Renders rows as an aligned text table. Cells longer than `max_width`
/// characters are cut with an ellipsis.
pub fn render_table(columns: &[String], rows: &[&Row], max_width: usize) -> String {
    let max_width = max_width.max(1);
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|column| truncate(&cell_text(row, column), max_width))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(truncate(column, max_width).chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let header: Vec<String> = columns.iter().map(|c| truncate(c, max_width)).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in &cells {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| {
            let pad = width.saturating_sub(cell.chars().count());
            format!("{cell}{}", " ".repeat(pad))
        })
        .collect();
    out.push_str(line.join(" | ").trim_end());
    out.push('\n');
}

fn truncate(text: &str, max_width: usize) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= max_width {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(max_width - 1).collect();
    cut.push(ELLIPSIS);
    cut
}
