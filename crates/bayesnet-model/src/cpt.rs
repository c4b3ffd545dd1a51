use std::collections::HashMap;

use crate::assignment::{Assignment, AssignmentEnumerator};
use crate::error::ModelError;

/// Weights over every configuration of a fixed number of boolean variables.
///
/// The same table serves three purposes: a conditional probability table
/// (weight = P(variable = true | parent configuration)), a tally of sample
/// counts, and an accumulator of likelihood weights. The domain is fixed at
/// construction: all `2^size` assignments start at weight 0 and are never
/// added or removed afterward.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionalProbabilityTable {
    size: usize,
    /// Domain keys in canonical enumeration order.
    events: Vec<Assignment>,
    weights: HashMap<Assignment, f64>,
}

impl ConditionalProbabilityTable {
    /// Create a table over `size` variables with every weight at 0.
    pub fn new(size: usize) -> Result<Self, ModelError> {
        let events: Vec<Assignment> = AssignmentEnumerator::new(size)?.collect();
        let weights = events.iter().map(|e| (e.clone(), 0.0)).collect();
        Ok(Self {
            size,
            events,
            weights,
        })
    }

    /// Number of variables the table ranges over.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Overwrite the weight of `event`.
    pub fn add_event(&mut self, event: &Assignment, weight: f64) -> Result<(), ModelError> {
        *self.slot(event)? = weight;
        Ok(())
    }

    /// Add `amount` to the weight of `event`.
    pub fn increment(&mut self, event: &Assignment, amount: f64) -> Result<(), ModelError> {
        *self.slot(event)? += amount;
        Ok(())
    }

    pub fn weight(&self, event: &Assignment) -> Result<f64, ModelError> {
        self.weights
            .get(event)
            .copied()
            .ok_or_else(|| self.missing(event))
    }

    /// All domain keys, always the full `2^size` set, in canonical order.
    pub fn events(&self) -> &[Assignment] {
        &self.events
    }

    /// `(event, weight)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&Assignment, f64)> + '_ {
        self.events
            .iter()
            .map(move |e| (e, self.weights.get(e).copied().unwrap_or(0.0)))
    }

    pub fn total(&self) -> f64 {
        self.weights.values().sum()
    }

    /// Scale the weights so that they sum to 1.
    ///
    /// A zero or non-finite total has no meaningful normalization; the table
    /// is left untouched and [`ModelError::UndefinedResult`] is returned.
    pub fn normalize(&mut self) -> Result<(), ModelError> {
        let total = self.total();
        if total == 0.0 || !total.is_finite() {
            return Err(ModelError::UndefinedResult { total });
        }
        for weight in self.weights.values_mut() {
            *weight /= total;
        }
        Ok(())
    }

    /// Add every weight of `other` into this table. Both must range over the
    /// same number of variables.
    pub fn merge(&mut self, other: &ConditionalProbabilityTable) -> Result<(), ModelError> {
        for (event, weight) in other.iter() {
            self.increment(event, weight)?;
        }
        Ok(())
    }

    fn slot(&mut self, event: &Assignment) -> Result<&mut f64, ModelError> {
        let size = self.size;
        self.weights
            .get_mut(event)
            .ok_or_else(|| ModelError::MissingKey {
                assignment: event.clone(),
                size,
            })
    }

    fn missing(&self, event: &Assignment) -> ModelError {
        ModelError::MissingKey {
            assignment: event.clone(),
            size: self.size,
        }
    }
}
