//! Fixed-length boolean configurations and their canonical enumeration.
//!
//! An [`Assignment`] is one configuration of `n` boolean variables. The
//! [`AssignmentEnumerator`] walks all `2^n` of them, starting at all-true and
//! ending at all-false. Probability tables are loaded row by row in this same
//! order, so the order is part of the file format.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// Enumeration is only supported for fewer variables than this.
pub const MAX_ENUMERATION_SIZE: usize = 10;

/// A configuration of `n` boolean variables, addressed by position.
///
/// Every position starts out `true`. Two assignments are the same key when
/// their bits are the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    bits: Vec<bool>,
}

impl Assignment {
    /// Create an assignment of `len` positions, all `true`.
    pub fn new(len: usize) -> Self {
        Self {
            bits: vec![true; len],
        }
    }

    /// The single-position all-true key used by variables with no parents.
    pub fn sentinel() -> Self {
        Self::new(1)
    }

    pub fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    pub fn get(&self, index: usize) -> Result<bool, ModelError> {
        self.bits
            .get(index)
            .copied()
            .ok_or(ModelError::IndexOutOfRange {
                index,
                len: self.bits.len(),
            })
    }

    pub fn set(&mut self, index: usize, value: bool) -> Result<(), ModelError> {
        let len = self.bits.len();
        match self.bits.get_mut(index) {
            Some(bit) => {
                *bit = value;
                Ok(())
            }
            None => Err(ModelError::IndexOutOfRange { index, len }),
        }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Position of this assignment in the canonical enumeration order.
    ///
    /// Inverse of the enumerator: a `false` at position `n - b - 1` is bit
    /// `b` of the counter.
    pub fn canonical_index(&self) -> usize {
        self.bits
            .iter()
            .fold(0usize, |acc, &bit| (acc << 1) | usize::from(!bit))
    }
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Lazily yields every configuration of `size` boolean variables.
///
/// The sequence is finite and cannot be restarted. For a counter `c` running
/// from `0` to `2^size - 1`, position `size - b - 1` is `true` exactly when
/// bit `b` of `c` is clear. For `size = 2` that gives `11, 10, 01, 00`.
#[derive(Debug, Clone)]
pub struct AssignmentEnumerator {
    size: usize,
    total: usize,
    counter: usize,
}

impl AssignmentEnumerator {
    pub fn new(size: usize) -> Result<Self, ModelError> {
        if size >= MAX_ENUMERATION_SIZE {
            return Err(ModelError::EnumerationTooLarge { size });
        }
        Ok(Self {
            size,
            total: 1 << size,
            counter: 0,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Iterator for AssignmentEnumerator {
    type Item = Assignment;

    fn next(&mut self) -> Option<Assignment> {
        if self.counter >= self.total {
            return None;
        }
        let bits = (0..self.size)
            .map(|position| {
                let bit = self.size - position - 1;
                self.counter & (1 << bit) == 0
            })
            .collect();
        self.counter += 1;
        Some(Assignment { bits })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.counter;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for AssignmentEnumerator {}
