use rand::Rng;

use crate::error::ModelError;
use crate::variable::{RandomVariable, VariableId};

/// An ordered collection of random variables.
///
/// Variables must be in topological order: every parent precedes its
/// children. This is not checked here. A variable listed before one of its
/// parents reads that parent's value from the previous pass and produces
/// wrong estimates rather than an error.
#[derive(Debug, Clone)]
pub struct Network {
    variables: Vec<RandomVariable>,
}

impl Network {
    pub fn new(variables: Vec<RandomVariable>) -> Self {
        Self { variables }
    }

    pub fn variables(&self) -> &[RandomVariable] {
        &self.variables
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn variable(&self, id: VariableId) -> Option<&RandomVariable> {
        self.variables.get(id)
    }

    pub fn variable_mut(&mut self, id: VariableId) -> Option<&mut RandomVariable> {
        self.variables.get_mut(id)
    }

    /// Look a variable up by name.
    pub fn find(&self, name: &str) -> Option<VariableId> {
        self.variables.iter().position(|v| v.name() == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.variables.iter().map(|v| v.name())
    }

    /// P(variable = true | current parent values).
    pub fn probability(&self, id: VariableId) -> Result<f64, ModelError> {
        let variable = self.get(id)?;
        let parent_values = self.parent_values(variable)?;
        variable.probability(&parent_values)
    }

    /// Sample a variable given its parents' current values and store the
    /// result on the variable.
    pub fn sample_and_set<R: Rng + ?Sized>(
        &mut self,
        id: VariableId,
        rng: &mut R,
    ) -> Result<bool, ModelError> {
        let parent_values = self.parent_values(self.get(id)?)?;
        self.get_mut(id)?.sample(&parent_values, rng)
    }

    /// Clamp a variable to `value`.
    pub fn set_value(&mut self, id: VariableId, value: bool) -> Result<(), ModelError> {
        self.get_mut(id)?.set_value(value);
        Ok(())
    }

    /// Current values of `variable`'s parents, in parent order. A parent id
    /// outside the network is an error.
    fn parent_values(&self, variable: &RandomVariable) -> Result<Vec<bool>, ModelError> {
        variable
            .parents()
            .iter()
            .map(|&p| self.get(p).map(|v| v.value()))
            .collect()
    }

    fn get(&self, id: VariableId) -> Result<&RandomVariable, ModelError> {
        let len = self.variables.len();
        self.variables
            .get(id)
            .ok_or(ModelError::IndexOutOfRange { index: id, len })
    }

    fn get_mut(&mut self, id: VariableId) -> Result<&mut RandomVariable, ModelError> {
        let len = self.variables.len();
        self.variables
            .get_mut(id)
            .ok_or(ModelError::IndexOutOfRange { index: id, len })
    }
}
