//! Loader for network definitions.
//!
//! The `.bn` text format is line oriented:
//!
//! ```text
//! 2
//! a
//! 0.5
//! b|a
//! 0.8
//! 0.1
//! ```
//!
//! The first line is the variable count. Each variable is either a bare name
//! followed by its prior P(true), or `child|p1,p2,...` followed by `2^k`
//! rows of P(child = true) in enumeration order. Names are case-folded.
//! Blank lines are ignored.

use std::path::Path;

use tracing::debug;

use crate::types::{NetworkDef, VariableDef};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {reason}")]
    MalformedInput { line: usize, reason: String },

    #[error("unexpected end of input: {reason}")]
    UnexpectedEof { reason: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn parse_network(text: &str) -> Result<NetworkDef, ParseError> {
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty());

    let (count_line, count_text) = lines.next().ok_or_else(|| ParseError::UnexpectedEof {
        reason: "missing variable count".to_string(),
    })?;
    let declared: usize = count_text.parse().map_err(|_| ParseError::MalformedInput {
        line: count_line,
        reason: format!("expected a variable count, found '{count_text}'"),
    })?;

    let mut variables = Vec::new();
    while let Some((line, header)) = lines.next() {
        let variable = parse_variable(line, header, &mut lines)?;
        debug!(
            name = %variable.name,
            parents = variable.parents.len(),
            "parsed variable"
        );
        variables.push(variable);
    }

    if variables.len() != declared {
        return Err(ParseError::MalformedInput {
            line: count_line,
            reason: format!(
                "declared {declared} variables but the file defines {}",
                variables.len()
            ),
        });
    }

    Ok(NetworkDef { variables })
}

pub fn parse_network_json(json: &str) -> Result<NetworkDef, ParseError> {
    let mut def: NetworkDef = serde_json::from_str(json)?;
    for variable in &mut def.variables {
        variable.name = fold_name(&variable.name);
        for parent in &mut variable.parents {
            *parent = fold_name(parent);
        }
    }
    Ok(def)
}

/// Read a network definition from disk. Files ending in `.json` use the JSON
/// encoding; anything else is read as `.bn` text.
pub fn load_network(path: &Path) -> Result<NetworkDef, ParseError> {
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = text.len(), "loading network");
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => parse_network_json(&text),
        _ => parse_network(&text),
    }
}

fn parse_variable<'a, I>(
    line: usize,
    header: &str,
    lines: &mut I,
) -> Result<VariableDef, ParseError>
where
    I: Iterator<Item = (usize, &'a str)>,
{
    let header = header.to_lowercase();
    let (name, parents) = match header.split_once('|') {
        None => (header.trim().to_string(), Vec::new()),
        Some((child, rest)) => {
            if rest.contains('|') {
                return Err(ParseError::MalformedInput {
                    line,
                    reason: format!("expected 'child|parents', found '{header}'"),
                });
            }
            let parents: Vec<String> = rest.split(',').map(|p| p.trim().to_string()).collect();
            if parents.iter().any(|p| p.is_empty()) {
                return Err(ParseError::MalformedInput {
                    line,
                    reason: format!("empty parent name in '{header}'"),
                });
            }
            (child.trim().to_string(), parents)
        }
    };
    if name.is_empty() {
        return Err(ParseError::MalformedInput {
            line,
            reason: "empty variable name".to_string(),
        });
    }
    if parents.len() >= u32::BITS as usize {
        return Err(ParseError::MalformedInput {
            line,
            reason: format!("'{name}' has too many parents ({})", parents.len()),
        });
    }

    let rows = 1usize << parents.len();
    let mut probabilities = Vec::with_capacity(rows.min(1 << 10));
    for _ in 0..rows {
        let (row_line, row) = lines.next().ok_or_else(|| ParseError::UnexpectedEof {
            reason: format!(
                "'{name}' needs {rows} probability rows, found {}",
                probabilities.len()
            ),
        })?;
        let p: f64 = row.parse().map_err(|_| ParseError::MalformedInput {
            line: row_line,
            reason: format!("expected a probability for '{name}', found '{row}'"),
        })?;
        probabilities.push(p);
    }

    Ok(VariableDef {
        name,
        parents,
        probabilities,
    })
}

fn fold_name(name: &str) -> String {
    name.trim().to_lowercase()
}
