use bayesnet_ir::query::Query;
use bayesnet_model::Network;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::algorithms::{direct_sample, likelihood_weighting, rejection_sample};
use crate::config::{InferenceMethod, SamplerConfig};
use crate::distribution::Distribution;
use crate::error::SamplingError;
use crate::plan::QueryPlan;
use crate::rng::session_rng;

/// Runs the sampling algorithms with one configuration and one random
/// source.
///
/// Every method takes the network by `&mut`: sampling overwrites the
/// variables' current values, so two calls can never interleave on the same
/// network.
pub struct Sampler<R: Rng = ChaCha8Rng> {
    config: SamplerConfig,
    rng: R,
}

impl Sampler<ChaCha8Rng> {
    pub fn new(config: SamplerConfig) -> Self {
        let rng = session_rng(config.seed);
        Self { config, rng }
    }
}

impl<R: Rng> Sampler<R> {
    pub fn with_rng(config: SamplerConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn direct(
        &mut self,
        network: &mut Network,
        query: &Query,
        samples: usize,
    ) -> Result<Distribution, SamplingError> {
        let plan = QueryPlan::resolve(network, query)?;
        direct_sample(network, &plan, samples, &mut self.rng)
    }

    pub fn rejection(
        &mut self,
        network: &mut Network,
        query: &Query,
        samples: usize,
    ) -> Result<Distribution, SamplingError> {
        let plan = QueryPlan::resolve(network, query)?;
        rejection_sample(network, &plan, samples, self.config.rejection, &mut self.rng)
    }

    pub fn likelihood_weighting(
        &mut self,
        network: &mut Network,
        query: &Query,
        samples: usize,
    ) -> Result<Distribution, SamplingError> {
        let plan = QueryPlan::resolve(network, query)?;
        likelihood_weighting(
            network,
            &plan,
            samples,
            self.config.evidence_weighting,
            &mut self.rng,
        )
    }

    /// Dispatch on `method`.
    pub fn run(
        &mut self,
        method: InferenceMethod,
        network: &mut Network,
        query: &Query,
        samples: usize,
    ) -> Result<Distribution, SamplingError> {
        match method {
            InferenceMethod::Direct => self.direct(network, query, samples),
            InferenceMethod::Rejection => self.rejection(network, query, samples),
            InferenceMethod::LikelihoodWeighting => {
                self.likelihood_weighting(network, query, samples)
            }
        }
    }
}
