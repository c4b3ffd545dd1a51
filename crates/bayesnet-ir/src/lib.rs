pub mod parse;
pub mod query;
pub mod types;

pub use parse::{load_network, parse_network, parse_network_json, ParseError};
pub use query::{parse_query, Query, QueryError};
pub use types::{NetworkDef, VariableDef};
