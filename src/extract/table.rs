//! Pipe tables: a header row, a divider row, then contiguous data rows.

use crate::extract::{lines_with_offsets, Excerpt};
use crate::position::Position;
use regex::Regex;
use std::sync::LazyLock;

static DIVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*\|?[ \t]*:?-+:?[ \t]*(?:\|[ \t]*:?-+:?[ \t]*)*\|?[ \t]*$").unwrap()
});

#[derive(Clone, Debug, PartialEq, Eq)]
/// A pipe table.
pub struct Table {
    /// Cells of the header row.
    pub header: Vec<String>,
    /// Cells of the divider row, alignment colons kept.
    pub divider: Vec<String>,
    /// Cells of each data row.
    pub rows: Vec<Vec<String>>,
    /// Location from the header row to the last data row.
    pub position: Position,
}

#[must_use]
/// Find tables.
pub fn extract(excerpt: &Excerpt<'_>) -> Vec<Table> {
    let lines: Vec<(usize, &str)> = lines_with_offsets(excerpt.text()).collect();
    let mut tables = Vec::new();
    let mut i = 0;

    while i + 1 < lines.len() {
        let (start, header) = lines[i];
        let (_, divider) = lines[i + 1];
        if !is_row(header) || DIVIDER.is_match(header) || !is_divider(divider) {
            i += 1;
            continue;
        }

        let mut end = lines[i + 1].0 + divider.len();
        let mut rows = Vec::new();
        let mut next = i + 2;
        while let Some(&(row_start, row)) = lines.get(next) {
            if !is_row(row) {
                break;
            }
            rows.push(split_row(row));
            end = row_start + row.len();
            next += 1;
        }

        tables.push(Table {
            header: split_row(header),
            divider: split_row(divider),
            rows,
            position: excerpt.position(start..end),
        });
        i = next;
    }
    tables
}

fn is_divider(line: &str) -> bool {
    line.contains('|') && DIVIDER.is_match(line)
}

fn is_row(line: &str) -> bool {
    !line.trim().is_empty() && !pipe_offsets(line).is_empty()
}

/// Byte offsets of every `|` not escaped by a backslash.
fn pipe_offsets(line: &str) -> Vec<usize> {
    let mut escaped = false;
    let mut offsets = Vec::new();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '|' => offsets.push(i),
            _ => {}
        }
    }
    offsets
}

#[must_use]
/// Split a row into trimmed cells on unescaped pipes.
///
/// Leading and trailing pipes are optional, and `\|` stays in its cell as
/// written.
pub fn split_row(line: &str) -> Vec<String> {
    let line = line.trim();
    let mut pipes = pipe_offsets(line);
    let mut start = 0;
    let mut end = line.len();

    if pipes.first() == Some(&0) {
        pipes.remove(0);
        start = 1;
    }
    if pipes.last().is_some_and(|&last| last + 1 == line.len() && last >= start) {
        pipes.pop();
        end = line.len() - 1;
    }

    let mut cells = Vec::with_capacity(pipes.len() + 1);
    let mut cell_start = start;
    for pipe in pipes {
        cells.push(line[cell_start..pipe].trim().to_string());
        cell_start = pipe + 1;
    }
    cells.push(line[cell_start..end.max(cell_start)].trim().to_string());
    cells
}

#[cfg(test)]
#[path = "../tests/table.rs"]
mod tests;
