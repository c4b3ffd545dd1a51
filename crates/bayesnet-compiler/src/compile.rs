use std::collections::HashMap;

use bayesnet_ir::types::{NetworkDef, VariableDef};
use bayesnet_model::{
    Assignment, AssignmentEnumerator, ConditionalProbabilityTable, ModelError, Network,
    RandomVariable, VariableId,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::validate::{validate_network, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Validation(Vec<ValidationError>),

    #[error("Table construction error: {0}")]
    Model(#[from] ModelError),
}

/// How a parentless variable's one-variable CPT is filled in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootPriors {
    /// Only the all-true key receives the prior; the false key stays at 0.
    /// Sampling only ever reads the true key.
    #[default]
    TrueOnly,
    /// The false key also receives `1 - prior`.
    Complement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompileOptions {
    #[serde(default)]
    pub root_priors: RootPriors,
}

/// Validate a network definition and build the sampling network from it.
pub fn compile(def: &NetworkDef, options: &CompileOptions) -> Result<Network, CompileError> {
    validate_network(def).map_err(CompileError::Validation)?;

    let mut ids: HashMap<&str, VariableId> = HashMap::new();
    let mut variables = Vec::with_capacity(def.variables.len());

    for (id, variable) in def.variables.iter().enumerate() {
        let parents: Vec<VariableId> = variable
            .parents
            .iter()
            .filter_map(|p| ids.get(p.as_str()).copied())
            .collect();
        let cpt = if parents.is_empty() {
            root_table(variable, options.root_priors)?
        } else {
            conditional_table(variable)?
        };
        debug!(name = %variable.name, id, parents = parents.len(), "compiled variable");
        variables.push(RandomVariable::new(variable.name.clone(), parents, cpt));
        ids.insert(variable.name.as_str(), id);
    }

    Ok(Network::new(variables))
}

fn root_table(
    variable: &VariableDef,
    root_priors: RootPriors,
) -> Result<ConditionalProbabilityTable, ModelError> {
    let prior = variable.probabilities.first().copied().unwrap_or(0.0);
    let mut cpt = ConditionalProbabilityTable::new(1)?;
    cpt.add_event(&Assignment::sentinel(), prior)?;
    if root_priors == RootPriors::Complement {
        cpt.add_event(&Assignment::from_bits(vec![false]), 1.0 - prior)?;
    }
    Ok(cpt)
}

/// Rows are assigned to parent configurations in enumeration order.
fn conditional_table(variable: &VariableDef) -> Result<ConditionalProbabilityTable, ModelError> {
    let mut cpt = ConditionalProbabilityTable::new(variable.parents.len())?;
    let configurations = AssignmentEnumerator::new(variable.parents.len())?;
    for (configuration, &p) in configurations.zip(&variable.probabilities) {
        cpt.add_event(&configuration, p)?;
    }
    Ok(cpt)
}
