// Readers from text and JSON into an AdjMatrix.
//
// Text: one row per line; cells are 0/1 or true/false, separated by
// whitespace or commas. Brackets are skipped, so a pasted `[0, 1, 1],` works.
// `#` starts a comment.
//
// JSON: an array of rows, cells are 0/1 or booleans.
use crate::error::{GraphError, GraphResult};
use crate::graph::adj_matrix::AdjMatrix;
use serde::Deserialize;
use std::io::Read;
use std::str::FromStr;
use tracing::debug;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Text,
    Json,
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "txt" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            _ => Err(format!("unknown matrix format {s:?}, expected text or json")),
        }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, ',' | '[' | ']')
}

fn parse_cell(token: &str) -> Option<bool> {
    match token {
        "0" | "false" => Some(false),
        "1" | "true" => Some(true),
        _ => None,
    }
}

pub fn parse_text(input: &str) -> GraphResult<AdjMatrix> {
    let mut rows: Vec<Vec<bool>> = vec![];
    for line in input.lines() {
        let line = line.split('#').next().unwrap_or_default();
        let mut tokens = line.split(is_separator).filter(|t| !t.is_empty()).peekable();
        if tokens.peek().is_none() {
            continue;
        }

        let row = rows.len();
        let cells = tokens
            .enumerate()
            .map(|(col, t)| parse_cell(t).ok_or_else(|| GraphError::invalid_entry(row, col, t)))
            .collect::<GraphResult<Vec<_>>>()?;
        rows.push(cells);
    }
    debug!(rows = rows.len(), "parsed text matrix");
    AdjMatrix::from_rows(&rows)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Flag(bool),
    Int(i64),
    Other(serde_json::Value),
}

pub fn parse_json(input: &str) -> GraphResult<AdjMatrix> {
    let raw: Vec<Vec<Cell>> = serde_json::from_str(input)?;
    let rows = raw
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            row.into_iter()
                .enumerate()
                .map(|(j, cell)| match cell {
                    Cell::Flag(b) => Ok(b),
                    Cell::Int(0) => Ok(false),
                    Cell::Int(1) => Ok(true),
                    Cell::Int(x) => Err(GraphError::invalid_entry(i, j, x.to_string())),
                    Cell::Other(v) => Err(GraphError::invalid_entry(i, j, v.to_string())),
                })
                .collect::<GraphResult<Vec<_>>>()
        })
        .collect::<GraphResult<Vec<_>>>()?;
    debug!(rows = rows.len(), "parsed json matrix");
    AdjMatrix::from_rows(&rows)
}

pub fn parse(input: &str, format: Format) -> GraphResult<AdjMatrix> {
    match format {
        Format::Text => parse_text(input),
        Format::Json => parse_json(input),
    }
}

pub fn read(mut reader: impl Read, format: Format) -> GraphResult<AdjMatrix> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    parse(&buf, format)
}
