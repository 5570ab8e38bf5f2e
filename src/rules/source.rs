use crate::models::{CodeDomain, Coded, ModelSource};

use super::{RuleInput, RuleOutcome};

/// The model source must be one of the known authoring/exchange origins.
pub(super) fn check_model_source(input: &RuleInput<'_>) -> RuleOutcome {
    match &input.model.source {
        Coded::Known(ModelSource::Other) => RuleOutcome::pass(
            "Model source declared as other; the authoring tool is not identified.",
        ),
        Coded::Known(source) => {
            RuleOutcome::pass(format!("Model summary taken from a {} model.", source.label()))
        }
        Coded::Unrecognized(raw) => RuleOutcome::warning(format!(
            "Model source is not one of revit, ifc, other; unrecognized value: {}.",
            raw
        )),
    }
}
