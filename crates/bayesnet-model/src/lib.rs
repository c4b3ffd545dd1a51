pub mod assignment;
pub mod cpt;
pub mod error;
pub mod network;
pub mod variable;

pub use assignment::{Assignment, AssignmentEnumerator};
pub use cpt::ConditionalProbabilityTable;
pub use error::ModelError;
pub use network::Network;
pub use variable::{parent_key, RandomVariable, VariableId};
