//! The interactive inference engine.
//!
//! Reads a method, a sample count and then queries from any `BufRead`,
//! writing prompts and answers to any `Write`, so the whole dialogue can be
//! driven from a test.

use std::io::{self, BufRead, Write};

use bayesnet_model::Network;
use bayesnet_sampling::InferenceMethod;
use serde_json::json;
use tracing::{debug, warn};

use crate::render::{render_json, render_text};
use crate::session::{OutputFormat, Session, SessionConfig, SessionError};

pub const WELCOME: &str = "===== Welcome to the Inference Engine =====";
pub const GOODBYE: &str = "===== Exiting the Inference Engine =====";
pub const INVALID_INPUT: &str = "Invalid Input";

const METHOD_PROMPT: &str = "Choose an inference method: ";
const SAMPLES_PROMPT: &str = "Enter the number of samples: ";
const QUERY_PROMPT: &str = "Enter a query (or type \"quit\"): ";

/// What to do with one line typed at the query prompt.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Quit,
    Lines(Vec<String>),
}

/// Answer one line of input. Every failure becomes printable lines; only
/// `quit` ends the loop.
pub fn handle_line(session: &mut Session, line: &str, format: OutputFormat) -> Reply {
    let line = line.trim();
    if line.eq_ignore_ascii_case("quit") {
        return Reply::Quit;
    }

    let mut lines = match (session.ask(line), format) {
        (Ok(answer), OutputFormat::Text) => render_text(&answer.query, &answer.distribution),
        (Ok(answer), OutputFormat::Json) => {
            vec![render_json(&answer.query, &answer.distribution).to_string()]
        }
        (Err(e), OutputFormat::Text) => vec![error_message(&e)],
        (Err(e), OutputFormat::Json) => vec![json!({ "error": error_message(&e) }).to_string()],
    };
    lines.push(String::new());
    Reply::Lines(lines)
}

fn error_message(e: &SessionError) -> String {
    match e {
        SessionError::Query(inner) => {
            debug!(error = %inner, "malformed query");
            INVALID_INPUT.to_string()
        }
        SessionError::MissingEvidence | SessionError::UnexpectedEvidence => {
            format!("Error: {e}")
        }
        other => {
            warn!(error = %other, "query failed");
            format!("Error: {other}")
        }
    }
}

pub struct Repl<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the whole dialogue: banner, method and sample count (unless
    /// `config` fixes them), then queries until `quit` or end of input.
    pub fn run(
        &mut self,
        source: &str,
        network: Network,
        config: &SessionConfig,
    ) -> Result<(), SessionError> {
        self.welcome(source, &network)?;

        let method = match config.method {
            Some(method) => method,
            None => match self.choose_method()? {
                Some(method) => method,
                None => {
                    self.goodbye()?;
                    return Ok(());
                }
            },
        };
        let samples = match config.samples {
            Some(samples) => samples,
            None => match self.choose_samples()? {
                Some(samples) => samples,
                None => {
                    self.goodbye()?;
                    return Ok(());
                }
            },
        };
        writeln!(self.output)?;

        let mut session = Session::new(network, method, samples, config.sampler.clone())?;
        self.serve(&mut session, config.output)?;
        self.goodbye()?;
        Ok(())
    }

    pub fn welcome(&mut self, source: &str, network: &Network) -> io::Result<()> {
        writeln!(self.output, "{WELCOME}")?;
        writeln!(self.output, "The Bayesian network being analyzed is: {source}")?;
        writeln!(self.output)?;
        writeln!(self.output, "The nodes in the network are:")?;
        for name in network.names() {
            writeln!(self.output, "{name}")?;
        }
        writeln!(self.output)?;
        writeln!(self.output)
    }

    /// Prompt until a method is chosen. None on end of input.
    pub fn choose_method(&mut self) -> io::Result<Option<InferenceMethod>> {
        writeln!(self.output, "Approximate Inference Methods: ")?;
        writeln!(self.output, "1. Direct sampling (no evidence)")?;
        writeln!(self.output, "2. Rejection sampling (requires evidence)")?;
        writeln!(self.output, "3. Likelihood Weighting")?;
        loop {
            let Some(line) = self.prompt(METHOD_PROMPT)? else {
                return Ok(None);
            };
            if let Ok(method) = line.parse::<InferenceMethod>() {
                return Ok(Some(method));
            }
        }
    }

    /// Prompt until a positive sample count is entered. None on end of
    /// input.
    pub fn choose_samples(&mut self) -> io::Result<Option<usize>> {
        loop {
            let Some(line) = self.prompt(SAMPLES_PROMPT)? else {
                return Ok(None);
            };
            match line.trim().parse::<usize>() {
                Ok(n) if n > 0 => return Ok(Some(n)),
                _ => continue,
            }
        }
    }

    /// Answer queries until `quit` or end of input.
    pub fn serve(&mut self, session: &mut Session, format: OutputFormat) -> io::Result<()> {
        while let Some(line) = self.prompt(QUERY_PROMPT)? {
            match handle_line(session, &line, format) {
                Reply::Quit => break,
                Reply::Lines(lines) => {
                    for line in lines {
                        writeln!(self.output, "{line}")?;
                    }
                }
            }
        }
        Ok(())
    }

    fn goodbye(&mut self) -> io::Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "{GOODBYE}")
    }

    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayesnet_compiler::{compile, CompileOptions};
    use bayesnet_ir::types::{NetworkDef, VariableDef};
    use bayesnet_sampling::SamplerConfig;
    use tracing_test::traced_test;

    fn session(method: InferenceMethod) -> Session {
        let def = NetworkDef {
            variables: vec![
                VariableDef::root("a", 0.5),
                VariableDef::conditional("b", &["a"], vec![0.8, 0.1]),
            ],
        };
        let network = compile(&def, &CompileOptions::default()).unwrap();
        let config = SamplerConfig {
            seed: Some(11),
            ..SamplerConfig::default()
        };
        Session::new(network, method, 500, config).unwrap()
    }

    #[test]
    fn test_quit_is_case_insensitive() {
        let mut s = session(InferenceMethod::Direct);
        assert_eq!(handle_line(&mut s, " QUIT ", OutputFormat::Text), Reply::Quit);
    }

    #[test]
    fn test_malformed_query_is_invalid_input() {
        let mut s = session(InferenceMethod::Direct);
        assert_eq!(
            handle_line(&mut s, "p(a", OutputFormat::Text),
            Reply::Lines(vec![INVALID_INPUT.to_string(), String::new()])
        );
    }

    #[test]
    #[traced_test]
    fn test_unknown_variable_is_logged() {
        let mut s = session(InferenceMethod::Direct);
        let Reply::Lines(lines) = handle_line(&mut s, "p(zebra)", OutputFormat::Text) else {
            panic!("expected lines");
        };
        assert_eq!(lines[0], "Error: Unknown variable 'zebra'");
        assert!(logs_contain("query failed"));
    }

    #[test]
    fn test_json_error() {
        let mut s = session(InferenceMethod::Rejection);
        let Reply::Lines(lines) = handle_line(&mut s, "p(a)", OutputFormat::Json) else {
            panic!("expected lines");
        };
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["error"], "Error: Your query must contain evidence");
    }
}
