use crate::assignment::{Assignment, MAX_ENUMERATION_SIZE};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Position {index} is out of range for an assignment of length {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Cannot enumerate {size} variables: sizes must be below {}", MAX_ENUMERATION_SIZE)]
    EnumerationTooLarge { size: usize },

    #[error("Assignment '{assignment}' is not in the domain of a table over {size} variables")]
    MissingKey { assignment: Assignment, size: usize },

    #[error("Cannot normalize a table whose total weight is {total}")]
    UndefinedResult { total: f64 },
}
