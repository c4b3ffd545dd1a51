pub mod compile;
pub mod validate;

pub use compile::{compile, CompileError, CompileOptions, RootPriors};
pub use validate::{validate_network, ValidationError};
