use bayesnet_model::{Assignment, ConditionalProbabilityTable, Network};
use rand::Rng;
use tracing::{debug, trace, warn};

use crate::config::RejectionPolicy;
use crate::distribution::Distribution;
use crate::error::SamplingError;
use crate::plan::QueryPlan;

/// Rejection sampling.
///
/// Like direct sampling, but a pass is abandoned as soon as an evidence
/// variable samples a value other than the observed one. Under
/// [`RejectionPolicy::Attempts`] `samples` counts passes, so anywhere from 0
/// to `samples` are kept. Under [`RejectionPolicy::Acceptances`] passes
/// continue until `samples` are kept or the attempt budget runs out.
pub fn rejection_sample<R: Rng + ?Sized>(
    network: &mut Network,
    plan: &QueryPlan,
    samples: usize,
    policy: RejectionPolicy,
    rng: &mut R,
) -> Result<Distribution, SamplingError> {
    debug!(samples, ?policy, query = ?plan.query_variables(), "rejection sampling");

    let max_attempts = match policy {
        RejectionPolicy::Attempts => samples,
        RejectionPolicy::Acceptances { max_attempts } => max_attempts,
    };

    let mut tally = ConditionalProbabilityTable::new(plan.query_len())?;
    let mut attempts = 0;
    let mut accepted = 0;
    while attempts < max_attempts {
        if matches!(policy, RejectionPolicy::Acceptances { .. }) && accepted >= samples {
            break;
        }
        attempts += 1;
        match attempt(network, plan, rng)? {
            Some(sample) => {
                tally.increment(&sample, 1.0)?;
                accepted += 1;
            }
            None => trace!(attempt = attempts, "sample rejected"),
        }
    }

    debug!(attempts, accepted, "rejection sampling finished");
    if accepted == 0 {
        warn!(attempts, "no samples were consistent with the evidence");
    }
    Distribution::from_accumulator(plan.query_variables().to_vec(), tally, attempts, accepted)
}

/// One pass through the network. Returns None when the evidence is
/// contradicted; the rest of the pass is skipped.
fn attempt<R: Rng + ?Sized>(
    network: &mut Network,
    plan: &QueryPlan,
    rng: &mut R,
) -> Result<Option<Assignment>, SamplingError> {
    let mut sample = plan.new_sample();
    for id in 0..network.len() {
        let value = network.sample_and_set(id, rng)?;
        if let Some(observed) = plan.role(id).evidence {
            if observed != value {
                return Ok(None);
            }
        }
        plan.record(&mut sample, id, value)?;
    }
    Ok(Some(sample))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::stream_rng;
    use bayesnet_compiler::{compile, CompileOptions};
    use bayesnet_ir::query::parse_query;
    use bayesnet_ir::types::{NetworkDef, VariableDef};
    use tracing_test::traced_test;

    fn network(prior: f64) -> Network {
        let def = NetworkDef {
            variables: vec![
                VariableDef::root("e", prior),
                VariableDef::conditional("q", &["e"], vec![0.9, 0.2]),
            ],
        };
        compile(&def, &CompileOptions::default()).unwrap()
    }

    #[test]
    #[traced_test]
    fn test_rejection_warns_when_nothing_accepted() {
        let mut network = network(0.0);
        let plan = QueryPlan::resolve(&network, &parse_query("p(q|e)").unwrap()).unwrap();
        let mut rng = stream_rng(7, 0);
        let result = rejection_sample(&mut network, &plan, 100, RejectionPolicy::Attempts, &mut rng);
        assert!(matches!(
            result,
            Err(SamplingError::UndefinedResult {
                attempts: 100,
                accepted: 0
            })
        ));
        assert!(logs_contain("no samples were consistent with the evidence"));
    }

    #[test]
    fn test_attempt_stops_at_contradiction() {
        let mut network = network(0.0);
        let plan = QueryPlan::resolve(&network, &parse_query("p(q|e)").unwrap()).unwrap();
        let mut rng = stream_rng(7, 1);
        assert_eq!(attempt(&mut network, &plan, &mut rng).unwrap(), None);
    }

    #[test]
    fn test_attempt_records_query_positions() {
        let mut network = network(1.0);
        let plan = QueryPlan::resolve(&network, &parse_query("p(q|e)").unwrap()).unwrap();
        let mut rng = stream_rng(7, 2);
        let sample = attempt(&mut network, &plan, &mut rng).unwrap().unwrap();
        assert_eq!(sample.len(), 1);
        assert_eq!(sample.get(0).unwrap(), network.variable(1).unwrap().value());
    }
}
