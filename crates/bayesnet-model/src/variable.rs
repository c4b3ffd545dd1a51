use rand::Rng;

use crate::assignment::Assignment;
use crate::cpt::ConditionalProbabilityTable;
use crate::error::ModelError;

/// Index of a variable within its [`Network`](crate::network::Network).
pub type VariableId = usize;

/// Build the CPT key for the current parent values.
///
/// With no parents this is the single-position all-true sentinel. Otherwise
/// the key starts all-true and position `i` is cleared exactly when parent
/// `i` is currently false, matching the row order the loader writes.
pub fn parent_key(parent_values: &[bool]) -> Assignment {
    if parent_values.is_empty() {
        return Assignment::sentinel();
    }
    Assignment::from_bits(parent_values.to_vec())
}

/// A named boolean random variable in a Bayesian network.
///
/// Root and conditional variables share this type; a root simply has an
/// empty parent list and a one-variable CPT whose all-true key holds its
/// prior P(true).
#[derive(Debug, Clone)]
pub struct RandomVariable {
    name: String,
    parents: Vec<VariableId>,
    cpt: ConditionalProbabilityTable,
    value: bool,
}

impl RandomVariable {
    /// The CPT must range over `parents.len()` variables, or over one
    /// variable when there are no parents. The value starts out `false`.
    pub fn new(
        name: impl Into<String>,
        parents: Vec<VariableId>,
        cpt: ConditionalProbabilityTable,
    ) -> Self {
        Self {
            name: name.into(),
            parents,
            cpt,
            value: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parents(&self) -> &[VariableId] {
        &self.parents
    }

    pub fn cpt(&self) -> &ConditionalProbabilityTable {
        &self.cpt
    }

    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    /// Value from the most recent sample or clamp. Only meaningful during a
    /// sampling pass.
    pub fn value(&self) -> bool {
        self.value
    }

    /// Clamp the variable to `value`, e.g. to an observed evidence value.
    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }

    /// P(self = true | parents), given the parents' current values in
    /// parent order.
    pub fn probability(&self, parent_values: &[bool]) -> Result<f64, ModelError> {
        self.cpt.weight(&parent_key(parent_values))
    }

    /// Draw a value from P(self | parents) and store it.
    pub fn sample<R: Rng + ?Sized>(
        &mut self,
        parent_values: &[bool],
        rng: &mut R,
    ) -> Result<bool, ModelError> {
        let p = self.probability(parent_values)?;
        let r: f64 = rng.gen();
        self.value = r < p;
        Ok(self.value)
    }
}
