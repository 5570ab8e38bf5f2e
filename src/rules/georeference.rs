use super::{RuleInput, RuleOutcome};

/// Federated models need a shared georeference with a named coordinate system.
pub(super) fn check_georeference_present(input: &RuleInput<'_>) -> RuleOutcome {
    let model = input.model;

    if !input.facts.uses_federated_models {
        let observed = match (&model.coordinate_system, model.has_georeference) {
            (Some(crs), true) => format!("model is georeferenced in {}", crs),
            (None, true) => "model is georeferenced".to_string(),
            (_, false) => "model has no georeference".to_string(),
        };
        return RuleOutcome::pass(format!(
            "Not applicable: the BEP does not declare federated models ({}).",
            observed
        ));
    }

    match (model.has_georeference, &model.coordinate_system) {
        (false, _) => RuleOutcome::fail(
            "The BEP declares federated models but the model has no georeference.",
        ),
        (true, None) => RuleOutcome::warning(
            "The model is georeferenced but no coordinate system is stated; federated models cannot be aligned reliably.",
        ),
        (true, Some(crs)) => RuleOutcome::pass(format!(
            "The model is georeferenced in coordinate system {}, as required for federated models.",
            crs
        )),
    }
}
