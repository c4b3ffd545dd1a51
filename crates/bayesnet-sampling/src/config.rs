use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The three approximate inference algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InferenceMethod {
    /// Ancestral sampling; queries may not carry evidence.
    Direct,
    /// Ancestral sampling that discards evidence-inconsistent samples.
    Rejection,
    /// Evidence clamped, each sample weighted by the evidence likelihood.
    LikelihoodWeighting,
}

impl InferenceMethod {
    /// Menu number used by the interactive engine.
    pub fn from_menu(choice: u32) -> Option<Self> {
        match choice {
            1 => Some(Self::Direct),
            2 => Some(Self::Rejection),
            3 => Some(Self::LikelihoodWeighting),
            _ => None,
        }
    }

    /// Whether queries answered with this method must carry evidence.
    pub fn requires_evidence(self) -> bool {
        !matches!(self, Self::Direct)
    }
}

impl fmt::Display for InferenceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Direct => "direct sampling",
            Self::Rejection => "rejection sampling",
            Self::LikelihoodWeighting => "likelihood weighting",
        })
    }
}

impl FromStr for InferenceMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "direct" => Ok(Self::Direct),
            "2" | "rejection" => Ok(Self::Rejection),
            "3" | "likelihood" | "likelihood-weighting" | "likelihood_weighting" => {
                Ok(Self::LikelihoodWeighting)
            }
            other => Err(format!("unknown inference method '{other}'")),
        }
    }
}

/// What the sample count means for rejection sampling.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RejectionPolicy {
    /// `n` counts attempts; anywhere from 0 to `n` samples are kept.
    #[default]
    Attempts,
    /// Keep drawing until `n` samples are accepted, giving up after
    /// `max_attempts` attempts.
    Acceptances { max_attempts: usize },
}

/// The factor an evidence variable contributes to a likelihood weight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceWeighting {
    /// P(variable = true | parents), whatever value the evidence is clamped
    /// to. Only correct for evidence observed true.
    #[default]
    ProbabilityOfTrue,
    /// P(variable = observed value | parents).
    ObservedValue,
}

impl EvidenceWeighting {
    /// Weight factor for evidence clamped to `observed` when
    /// P(true | parents) is `p_true`.
    pub fn factor(self, p_true: f64, observed: bool) -> f64 {
        match self {
            Self::ProbabilityOfTrue => p_true,
            Self::ObservedValue if observed => p_true,
            Self::ObservedValue => 1.0 - p_true,
        }
    }
}

/// Sampler configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SamplerConfig {
    /// RNG seed. None = seeded from the OS.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub rejection: RejectionPolicy,
    #[serde(default)]
    pub evidence_weighting: EvidenceWeighting,
}
