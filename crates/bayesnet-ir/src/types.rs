use serde::{Deserialize, Serialize};

/// A Bayesian network definition as loaded from disk, before validation.
///
/// Variables are listed in the order they were declared, which must be a
/// topological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkDef {
    pub variables: Vec<VariableDef>,
}

/// One variable: its name, its parents in key order, and P(true) for each
/// parent configuration in enumeration order (all parents true first, all
/// parents false last). A variable without parents has exactly one row, its
/// prior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDef {
    pub name: String,
    #[serde(default)]
    pub parents: Vec<String>,
    pub probabilities: Vec<f64>,
}

impl VariableDef {
    pub fn root(name: impl Into<String>, prior: f64) -> Self {
        Self {
            name: name.into(),
            parents: Vec::new(),
            probabilities: vec![prior],
        }
    }

    pub fn conditional(
        name: impl Into<String>,
        parents: &[&str],
        probabilities: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            probabilities,
        }
    }

    /// Number of probability rows the parent list calls for.
    pub fn expected_rows(&self) -> usize {
        1usize.checked_shl(self.parents.len() as u32).unwrap_or(usize::MAX)
    }
}
