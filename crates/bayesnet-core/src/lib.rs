pub mod render;
pub mod repl;
pub mod session;

pub use render::{render_json, render_text};
pub use repl::{handle_line, Reply, Repl};
pub use session::{open_network, Answer, OutputFormat, Session, SessionConfig, SessionError};
