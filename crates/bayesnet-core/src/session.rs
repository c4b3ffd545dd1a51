use std::path::Path;

use bayesnet_compiler::compile::{compile, CompileError, CompileOptions};
use bayesnet_ir::parse::{load_network, ParseError};
use bayesnet_ir::query::{parse_query, Query, QueryError};
use bayesnet_model::Network;
use bayesnet_sampling::{Distribution, InferenceMethod, Sampler, SamplerConfig, SamplingError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Network parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Compilation error: {0}")]
    Compile(#[from] CompileError),

    #[error("Invalid query: {0}")]
    Query(#[from] QueryError),

    #[error("{0}")]
    Sampling(#[from] SamplingError),

    #[error("Your query must contain evidence")]
    MissingEvidence,

    #[error("Your query cannot contain evidence")]
    UnexpectedEvidence,

    #[error("Sample count must be at least 1")]
    ZeroSamples,

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// How answers are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// One `p(a=true | e) = w` line per event.
    #[default]
    Text,
    /// One JSON object per query.
    Json,
}

/// Settings for one run of the engine. Loaded from a JSON file, then
/// overridden by command-line flags. A method or sample count left unset is
/// asked for interactively.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub method: Option<InferenceMethod>,
    #[serde(default)]
    pub samples: Option<usize>,
    #[serde(default)]
    pub output: OutputFormat,
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub compile: CompileOptions,
}

impl SessionConfig {
    pub fn from_json(json: &str) -> Result<Self, SessionError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, SessionError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

/// Load and compile a network file.
pub fn open_network(path: &Path, options: &CompileOptions) -> Result<Network, SessionError> {
    let def = load_network(path)?;
    let network = compile(&def, options)?;
    info!(path = %path.display(), variables = network.len(), "network loaded");
    Ok(network)
}

/// A query together with its estimated distribution.
#[derive(Debug, Clone)]
pub struct Answer {
    pub query: Query,
    pub distribution: Distribution,
}

/// The state of one interactive run: the network, the chosen method and
/// sample count, and the sampler with its random source.
pub struct Session {
    network: Network,
    method: InferenceMethod,
    samples: usize,
    sampler: Sampler,
}

impl Session {
    pub fn new(
        network: Network,
        method: InferenceMethod,
        samples: usize,
        config: SamplerConfig,
    ) -> Result<Self, SessionError> {
        if samples == 0 {
            return Err(SessionError::ZeroSamples);
        }
        debug!(%method, samples, ?config, "session created");
        Ok(Self {
            network,
            method,
            samples,
            sampler: Sampler::new(config),
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn method(&self) -> InferenceMethod {
        self.method
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Direct sampling answers only evidence-free queries; the other two
    /// methods only queries with evidence.
    pub fn check(&self, query: &Query) -> Result<(), SessionError> {
        match (self.method.requires_evidence(), query.has_evidence()) {
            (true, false) => Err(SessionError::MissingEvidence),
            (false, true) => Err(SessionError::UnexpectedEvidence),
            _ => Ok(()),
        }
    }

    pub fn run(&mut self, query: &Query) -> Result<Distribution, SessionError> {
        self.check(query)?;
        debug!(%query, method = %self.method, samples = self.samples, "running query");
        let distribution = self
            .sampler
            .run(self.method, &mut self.network, query, self.samples)?;
        Ok(distribution)
    }

    /// Parse `input` as a query and answer it.
    pub fn ask(&mut self, input: &str) -> Result<Answer, SessionError> {
        let query = parse_query(input)?;
        let distribution = self.run(&query)?;
        Ok(Answer {
            query,
            distribution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bayesnet_ir::types::{NetworkDef, VariableDef};

    fn network() -> Network {
        let def = NetworkDef {
            variables: vec![
                VariableDef::root("a", 0.5),
                VariableDef::conditional("b", &["a"], vec![0.8, 0.1]),
            ],
        };
        compile(&def, &CompileOptions::default()).unwrap()
    }

    fn session(method: InferenceMethod) -> Session {
        let config = SamplerConfig {
            seed: Some(3),
            ..SamplerConfig::default()
        };
        Session::new(network(), method, 1_000, config).unwrap()
    }

    #[test]
    fn test_direct_rejects_evidence() {
        let mut s = session(InferenceMethod::Direct);
        assert!(matches!(
            s.ask("p(a|b)"),
            Err(SessionError::UnexpectedEvidence)
        ));
        assert!(s.ask("p(a)").is_ok());
    }

    #[test]
    fn test_conditioning_methods_require_evidence() {
        for method in [
            InferenceMethod::Rejection,
            InferenceMethod::LikelihoodWeighting,
        ] {
            let mut s = session(method);
            assert!(matches!(s.ask("p(a)"), Err(SessionError::MissingEvidence)));
            assert!(s.ask("p(a|b)").is_ok());
        }
    }

    #[test]
    fn test_zero_samples_rejected() {
        let result = Session::new(
            network(),
            InferenceMethod::Direct,
            0,
            SamplerConfig::default(),
        );
        assert!(matches!(result, Err(SessionError::ZeroSamples)));
    }

    #[test]
    fn test_malformed_query_is_query_error() {
        let mut s = session(InferenceMethod::Direct);
        assert!(matches!(s.ask("p(a"), Err(SessionError::Query(_))));
    }

    #[test]
    fn test_config_from_json() {
        let config = SessionConfig::from_json(
            r#"{
                "method": "rejection",
                "samples": 5000,
                "output": "json",
                "sampler": { "seed": 7 },
                "compile": { "root_priors": "complement" }
            }"#,
        )
        .unwrap();
        assert_eq!(config.method, Some(InferenceMethod::Rejection));
        assert_eq!(config.samples, Some(5000));
        assert_eq!(config.output, OutputFormat::Json);
        assert_eq!(config.sampler.seed, Some(7));
        assert_eq!(
            config.compile.root_priors,
            bayesnet_compiler::RootPriors::Complement
        );

        assert_eq!(
            SessionConfig::from_json("{}").unwrap(),
            SessionConfig::default()
        );
    }
}
