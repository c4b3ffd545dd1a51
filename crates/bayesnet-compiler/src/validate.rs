use std::collections::HashSet;

use bayesnet_ir::types::{NetworkDef, VariableDef};
use bayesnet_model::assignment::MAX_ENUMERATION_SIZE;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Duplicate variable '{name}'")]
    DuplicateVariable { name: String },

    #[error("Unresolved parent: '{variable}' references '{parent}' which is not declared before it")]
    UnresolvedParent { variable: String, parent: String },

    #[error("Variable '{variable}' lists itself as a parent")]
    SelfParent { variable: String },

    #[error("Variable '{variable}' lists parent '{parent}' more than once")]
    RepeatedParent { variable: String, parent: String },

    #[error("Too many parents: '{variable}' has {count}, at most {} are supported", MAX_ENUMERATION_SIZE - 1)]
    TooManyParents { variable: String, count: usize },

    #[error("Wrong row count for '{variable}': expected {expected}, found {found}")]
    WrongRowCount {
        variable: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid probability {value} in row {row} of '{variable}'")]
    InvalidProbability {
        variable: String,
        row: usize,
        value: f64,
    },
}

/// Check a network definition before it is built.
///
/// All problems are collected rather than stopping at the first one. A
/// parent counts as resolved only if it is declared earlier in the file,
/// which is what guarantees the built network is in topological order.
pub fn validate_network(def: &NetworkDef) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut declared: HashSet<&str> = HashSet::new();

    for variable in &def.variables {
        validate_parents(variable, &declared, &mut errors);
        validate_rows(variable, &mut errors);
        if !declared.insert(variable.name.as_str()) {
            errors.push(ValidationError::DuplicateVariable {
                name: variable.name.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Check that every parent is declared earlier, listed once, and that the
/// parent count can be enumerated.
fn validate_parents(
    variable: &VariableDef,
    declared: &HashSet<&str>,
    errors: &mut Vec<ValidationError>,
) {
    if variable.parents.len() >= MAX_ENUMERATION_SIZE {
        errors.push(ValidationError::TooManyParents {
            variable: variable.name.clone(),
            count: variable.parents.len(),
        });
    }

    let mut seen = HashSet::new();
    for parent in &variable.parents {
        if parent == &variable.name {
            errors.push(ValidationError::SelfParent {
                variable: variable.name.clone(),
            });
        } else if !declared.contains(parent.as_str()) {
            errors.push(ValidationError::UnresolvedParent {
                variable: variable.name.clone(),
                parent: parent.clone(),
            });
        }
        if !seen.insert(parent.as_str()) {
            errors.push(ValidationError::RepeatedParent {
                variable: variable.name.clone(),
                parent: parent.clone(),
            });
        }
    }
}

/// Check row count and that each row is a probability.
fn validate_rows(variable: &VariableDef, errors: &mut Vec<ValidationError>) {
    let expected = variable.expected_rows();
    if variable.probabilities.len() != expected {
        errors.push(ValidationError::WrongRowCount {
            variable: variable.name.clone(),
            expected,
            found: variable.probabilities.len(),
        });
    }
    for (row, &value) in variable.probabilities.iter().enumerate() {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::InvalidProbability {
                variable: variable.name.clone(),
                row,
                value,
            });
        }
    }
}
