use bayesnet_model::{Assignment, ConditionalProbabilityTable, ModelError};

use crate::error::SamplingError;

/// Estimated joint distribution over a query's variables.
///
/// Position `i` of every event is the variable `variables()[i]`, in network
/// order. Weights sum to 1.
#[derive(Debug, Clone)]
pub struct Distribution {
    variables: Vec<String>,
    table: ConditionalProbabilityTable,
    attempts: usize,
    accepted: usize,
}

impl Distribution {
    /// Normalize an accumulator into a distribution. A zero total is
    /// reported as [`SamplingError::UndefinedResult`].
    pub(crate) fn from_accumulator(
        variables: Vec<String>,
        mut table: ConditionalProbabilityTable,
        attempts: usize,
        accepted: usize,
    ) -> Result<Self, SamplingError> {
        table.normalize().map_err(|e| match e {
            ModelError::UndefinedResult { .. } => {
                SamplingError::UndefinedResult { attempts, accepted }
            }
            other => SamplingError::Model(other),
        })?;
        Ok(Self {
            variables,
            table,
            attempts,
            accepted,
        })
    }

    /// Every configuration of the query variables, in canonical order.
    pub fn events(&self) -> &[Assignment] {
        self.table.events()
    }

    pub fn weight(&self, event: &Assignment) -> Result<f64, ModelError> {
        self.table.weight(event)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Assignment, f64)> + '_ {
        self.table.iter()
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn table(&self) -> &ConditionalProbabilityTable {
        &self.table
    }

    /// Samples drawn (attempts, for rejection sampling).
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Samples that contributed weight.
    pub fn accepted(&self) -> usize {
        self.accepted
    }

    /// Estimated P(name = true), summed over the other query variables.
    pub fn marginal(&self, name: &str) -> Option<f64> {
        let position = self.variables.iter().position(|v| v == name)?;
        Some(
            self.iter()
                .filter(|(event, _)| event.get(position).unwrap_or(false))
                .map(|(_, w)| w)
                .sum(),
        )
    }
}
