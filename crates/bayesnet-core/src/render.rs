use bayesnet_ir::query::Query;
use bayesnet_model::Assignment;
use bayesnet_sampling::Distribution;
use serde_json::{json, Map, Value};

/// `c, !d` for evidence c = true, d = false.
pub fn evidence_string(query: &Query) -> String {
    query
        .evidence
        .iter()
        .map(|(name, value)| {
            if *value {
                name.clone()
            } else {
                format!("!{name}")
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn event_string(variables: &[String], event: &Assignment) -> String {
    variables
        .iter()
        .zip(event.bits())
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// One line per event, in canonical order:
/// `p(a=true, b=false | c, !d) = 0.25`.
pub fn render_text(query: &Query, distribution: &Distribution) -> Vec<String> {
    let evidence = evidence_string(query);
    distribution
        .iter()
        .map(|(event, weight)| {
            let inside = event_string(distribution.variables(), event);
            if evidence.is_empty() {
                format!("p({inside}) = {weight}")
            } else {
                format!("p({inside} | {evidence}) = {weight}")
            }
        })
        .collect()
}

pub fn render_json(query: &Query, distribution: &Distribution) -> Value {
    let events: Vec<Value> = distribution
        .iter()
        .map(|(event, weight)| {
            let assignment: Map<String, Value> = distribution
                .variables()
                .iter()
                .zip(event.bits())
                .map(|(name, value)| (name.clone(), Value::Bool(*value)))
                .collect();
            json!({
                "assignment": assignment,
                "weight": weight,
            })
        })
        .collect();

    json!({
        "query": query.to_string(),
        "variables": distribution.variables(),
        "evidence": query.evidence,
        "attempts": distribution.attempts(),
        "accepted": distribution.accepted(),
        "distribution": events,
    })
}
