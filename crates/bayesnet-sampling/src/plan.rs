use bayesnet_ir::query::Query;
use bayesnet_model::{Assignment, ModelError, Network, VariableId};

use crate::error::SamplingError;

/// What a single network variable contributes to a query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Role {
    /// Position in the output assignment, if the variable is queried.
    pub query_position: Option<usize>,
    /// Observed value, if the variable is evidence.
    pub evidence: Option<bool>,
}

/// A query resolved against a specific network.
///
/// Query variables get output positions in the order they appear in the
/// network, not the order they were written in the query.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    roles: Vec<Role>,
    query_variables: Vec<String>,
    evidence_count: usize,
}

impl QueryPlan {
    pub fn resolve(network: &Network, query: &Query) -> Result<Self, SamplingError> {
        for name in query.query_variables.iter().chain(query.evidence.keys()) {
            if network.find(name).is_none() {
                return Err(SamplingError::UnknownVariable { name: name.clone() });
            }
        }
        if let Some(name) = query
            .query_variables
            .iter()
            .find(|name| query.evidence.contains_key(*name))
        {
            return Err(SamplingError::ObservedQueryVariable { name: name.clone() });
        }

        let mut roles = Vec::with_capacity(network.len());
        let mut query_variables = Vec::new();
        for name in network.names() {
            let query_position = if query.is_query_variable(name) {
                query_variables.push(name.to_string());
                Some(query_variables.len() - 1)
            } else {
                None
            };
            roles.push(Role {
                query_position,
                evidence: query.evidence_value(name),
            });
        }

        Ok(Self {
            roles,
            query_variables,
            evidence_count: query.evidence.len(),
        })
    }

    pub fn role(&self, id: VariableId) -> Role {
        self.roles.get(id).copied().unwrap_or_default()
    }

    /// Query variable names in output position order.
    pub fn query_variables(&self) -> &[String] {
        &self.query_variables
    }

    pub fn query_len(&self) -> usize {
        self.query_variables.len()
    }

    pub fn has_evidence(&self) -> bool {
        self.evidence_count > 0
    }

    /// Start an empty output assignment for one sample.
    pub fn new_sample(&self) -> Assignment {
        Assignment::new(self.query_len())
    }

    /// Record `value` for variable `id` in `sample` if it is queried.
    pub fn record(
        &self,
        sample: &mut Assignment,
        id: VariableId,
        value: bool,
    ) -> Result<(), ModelError> {
        match self.role(id).query_position {
            Some(position) => sample.set(position, value),
            None => Ok(()),
        }
    }
}
