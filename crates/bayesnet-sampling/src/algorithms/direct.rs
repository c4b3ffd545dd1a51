use bayesnet_model::{ConditionalProbabilityTable, Network};
use rand::Rng;
use tracing::debug;

use crate::distribution::Distribution;
use crate::error::SamplingError;
use crate::plan::QueryPlan;

/// Ancestral sampling.
///
/// Each pass samples every variable in network order and tallies the
/// resulting query configuration. Evidence is not allowed.
pub fn direct_sample<R: Rng + ?Sized>(
    network: &mut Network,
    plan: &QueryPlan,
    samples: usize,
    rng: &mut R,
) -> Result<Distribution, SamplingError> {
    if plan.has_evidence() {
        return Err(SamplingError::UnexpectedEvidence);
    }
    debug!(samples, query = ?plan.query_variables(), "direct sampling");

    let mut tally = ConditionalProbabilityTable::new(plan.query_len())?;
    for _ in 0..samples {
        let mut sample = plan.new_sample();
        for id in 0..network.len() {
            let value = network.sample_and_set(id, rng)?;
            plan.record(&mut sample, id, value)?;
        }
        tally.increment(&sample, 1.0)?;
    }

    Distribution::from_accumulator(plan.query_variables().to_vec(), tally, samples, samples)
}
