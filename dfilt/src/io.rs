//! Whitespace separated numeric text tables.
//!
//! One row per line, `#` starts a comment, blank lines separate blocks (arcs).

use std::fs;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use dfilt_core::{Error, Result};
use ndarray::Array2;

fn parse_rows(text: &str, first_line: usize) -> Result<Vec<Vec<f64>>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .trim(Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| Error::InvalidArg {
            arg: format!("block starting at line {first_line}"),
            reason: e.to_string(),
        })?;
        let offset = record
            .position()
            .map_or(0, |p| (p.line() as usize).saturating_sub(1));
        let number = first_line + offset;
        // repeated separators give empty fields; tabs stay inside one field
        let row = record
            .iter()
            .flat_map(str::split_whitespace)
            .take_while(|field| !field.starts_with('#'))
            .map(|field| {
                field.parse::<f64>().map_err(|_| Error::InvalidArg {
                    arg: format!("line {number}"),
                    reason: format!("`{field}` is not a number"),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        if !row.is_empty() {
            rows.push(row);
        }
    }
    Ok(rows)
}

/// All numeric rows of `text`, ignoring comments and blank lines.
pub fn parse_table(text: &str) -> Result<Vec<Vec<f64>>> {
    parse_rows(text, 1)
}

/// Read [parse_table] rows from `path`, reporting failures as [Error::Io].
pub fn read_table(path: &Path) -> Result<Vec<Vec<f64>>> {
    let io_error = |reason: String| Error::Io {
        path: path.display().to_string(),
        reason,
    };
    let text = fs::read_to_string(path).map_err(|e| io_error(e.to_string()))?;
    parse_table(&text).map_err(|e| io_error(e.to_string()))
}

/// Every number of the file at `path`, row by row.
pub fn read_values(path: &Path) -> Result<Vec<f64>> {
    Ok(read_table(path)?.into_iter().flatten().collect())
}

fn to_matrix(rows: Vec<Vec<f64>>, first_line: usize) -> Result<Array2<f64>> {
    let cols = rows.first().map_or(0, Vec::len);
    if let Some(bad) = rows.iter().position(|r| r.len() != cols) {
        return Err(Error::InvalidArg {
            arg: format!("block starting at line {first_line}"),
            reason: format!(
                "row {} has {} columns, expected {cols}",
                bad + 1,
                rows[bad].len()
            ),
        });
    }
    let n = rows.len();
    Array2::from_shape_vec((n, cols), rows.into_iter().flatten().collect()).map_err(|e| {
        Error::InvalidArg {
            arg: format!("block starting at line {first_line}"),
            reason: e.to_string(),
        }
    })
}

/// Split `text` into matrices at blank lines. Comment-only lines do not split.
pub fn parse_arcs(text: &str) -> Result<Vec<Array2<f64>>> {
    let mut arcs = Vec::new();
    let mut block: Vec<&str> = Vec::new();
    let mut first_line = 1;
    for (number, line) in text.lines().chain(std::iter::once("")).enumerate() {
        if !line.trim().is_empty() {
            if block.is_empty() {
                first_line = number + 1;
            }
            block.push(line);
            continue;
        }
        if block.is_empty() {
            continue;
        }
        let rows = parse_rows(&block.join("\n"), first_line)?;
        block.clear();
        if !rows.is_empty() {
            arcs.push(to_matrix(rows, first_line)?);
        }
    }
    Ok(arcs)
}

/// Render `matrix` one row per line with full precision.
pub fn format_matrix(matrix: &Array2<f64>) -> String {
    let mut out = String::new();
    for row in matrix.rows() {
        let line: Vec<String> = row.iter().map(|v| format!("{v:.16e}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}
