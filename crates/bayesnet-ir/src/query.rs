//! Query grammar: `p(V1,V2|E1,!E2)`.
//!
//! Names before the `|` are query variables, names after it are evidence.
//! An evidence name prefixed with `!` is observed false, otherwise true.
//! Input is case-folded and whitespace around names is ignored.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query must be of the form p(...)")]
    MissingParenthesis,

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("query must start with 'p('")]
    BadPrefix,

    #[error("'|' must appear inside the parentheses")]
    PipeAfterClose,

    #[error("only one '|' is allowed")]
    MultiplePipes,

    #[error("unexpected input after ')': '{0}'")]
    TrailingInput(String),

    #[error("empty variable name")]
    EmptyName,

    #[error("query variable '{0}' cannot be negated")]
    NegatedQueryVariable(String),

    #[error("evidence variable '{0}' is observed both true and false")]
    ConflictingEvidence(String),
}

/// A request for the joint distribution of some variables, optionally
/// conditioned on observed values of others.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub query_variables: BTreeSet<String>,
    #[serde(default)]
    pub evidence: BTreeMap<String, bool>,
}

impl Query {
    pub fn new<S: AsRef<str>>(variables: &[S]) -> Self {
        Self {
            query_variables: variables.iter().map(|v| v.as_ref().to_string()).collect(),
            evidence: BTreeMap::new(),
        }
    }

    pub fn with_evidence(mut self, name: &str, value: bool) -> Self {
        self.evidence.insert(name.to_string(), value);
        self
    }

    pub fn has_evidence(&self) -> bool {
        !self.evidence.is_empty()
    }

    pub fn is_query_variable(&self, name: &str) -> bool {
        self.query_variables.contains(name)
    }

    pub fn evidence_value(&self, name: &str) -> Option<bool> {
        self.evidence.get(name).copied()
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let vars: Vec<&str> = self.query_variables.iter().map(String::as_str).collect();
        write!(f, "p({}", vars.join(","))?;
        if self.has_evidence() {
            let evidence: Vec<String> = self
                .evidence
                .iter()
                .map(|(name, value)| {
                    if *value {
                        name.clone()
                    } else {
                        format!("!{name}")
                    }
                })
                .collect();
            write!(f, "|{}", evidence.join(","))?;
        }
        f.write_str(")")
    }
}

pub fn parse_query(input: &str) -> Result<Query, QueryError> {
    let input = input.trim().to_lowercase();

    let open = input.find('(');
    let close = input.find(')');
    let (open, close) = match (open, close) {
        (Some(open), Some(close)) => (open, close),
        _ => return Err(QueryError::MissingParenthesis),
    };
    if open > close || input.matches('(').count() != 1 || input.matches(')').count() != 1 {
        return Err(QueryError::UnbalancedParentheses);
    }
    if input[..open].trim() != "p" {
        return Err(QueryError::BadPrefix);
    }
    if let Some(pipe) = input.find('|') {
        if pipe > close {
            return Err(QueryError::PipeAfterClose);
        }
    }
    let trailing = input[close + 1..].trim();
    if !trailing.is_empty() {
        return Err(QueryError::TrailingInput(trailing.to_string()));
    }

    let body = &input[open + 1..close];
    let mut sections = body.split('|');
    let variables = sections.next().unwrap_or_default();
    let evidence = sections.next();
    if sections.next().is_some() {
        return Err(QueryError::MultiplePipes);
    }

    let mut query = Query::default();
    for name in split_names(variables)? {
        if name.starts_with('!') {
            return Err(QueryError::NegatedQueryVariable(name.to_string()));
        }
        query.query_variables.insert(name.to_string());
    }

    if let Some(evidence) = evidence {
        for name in split_names(evidence)? {
            let (name, value) = match name.strip_prefix('!') {
                Some(rest) => (rest.trim(), false),
                None => (name, true),
            };
            if name.is_empty() {
                return Err(QueryError::EmptyName);
            }
            match query.evidence.insert(name.to_string(), value) {
                Some(previous) if previous != value => {
                    return Err(QueryError::ConflictingEvidence(name.to_string()));
                }
                _ => {}
            }
        }
    }

    Ok(query)
}

fn split_names(section: &str) -> Result<Vec<&str>, QueryError> {
    section
        .split(',')
        .map(|name| {
            let name = name.trim();
            if name.is_empty() {
                Err(QueryError::EmptyName)
            } else {
                Ok(name)
            }
        })
        .collect()
}
