pub mod algorithms;
pub mod config;
pub mod distribution;
pub mod error;
pub mod plan;
pub mod rng;
pub mod sampler;

pub use config::{EvidenceWeighting, InferenceMethod, RejectionPolicy, SamplerConfig};
pub use distribution::Distribution;
pub use error::SamplingError;
pub use plan::QueryPlan;
pub use sampler::Sampler;
