use bayesnet_model::{ConditionalProbabilityTable, Network};
use rand::Rng;
use tracing::debug;

use crate::config::EvidenceWeighting;
use crate::distribution::Distribution;
use crate::error::SamplingError;
use crate::plan::QueryPlan;

/// Likelihood weighting.
///
/// Evidence variables are clamped to their observed values instead of
/// sampled, and each pass is weighted by the product of the evidence
/// factors. Under the default [`EvidenceWeighting::ProbabilityOfTrue`] the
/// factor is P(true | parents) even for evidence observed false.
pub fn likelihood_weighting<R: Rng + ?Sized>(
    network: &mut Network,
    plan: &QueryPlan,
    samples: usize,
    weighting: EvidenceWeighting,
    rng: &mut R,
) -> Result<Distribution, SamplingError> {
    debug!(samples, ?weighting, query = ?plan.query_variables(), "likelihood weighting");

    let mut accumulator = ConditionalProbabilityTable::new(plan.query_len())?;
    let mut weighted = 0;
    for _ in 0..samples {
        let mut weight = 1.0;
        let mut sample = plan.new_sample();
        for id in 0..network.len() {
            match plan.role(id).evidence {
                Some(observed) => {
                    network.set_value(id, observed)?;
                    weight *= weighting.factor(network.probability(id)?, observed);
                }
                None => {
                    let value = network.sample_and_set(id, rng)?;
                    plan.record(&mut sample, id, value)?;
                }
            }
        }
        if weight > 0.0 {
            weighted += 1;
        }
        accumulator.increment(&sample, weight)?;
    }

    debug!(samples, weighted, total = accumulator.total(), "likelihood weighting finished");
    Distribution::from_accumulator(plan.query_variables().to_vec(), accumulator, samples, weighted)
}
