use super::{RuleInput, RuleOutcome, join_codes};

/// The model must contain elements in at least one category.
pub(super) fn check_element_categories_present(input: &RuleInput<'_>) -> RuleOutcome {
    let categories = &input.model.categories;
    if categories.is_empty() {
        return RuleOutcome::fail("No element categories were submitted for the model.");
    }

    let empty: Vec<&str> = categories
        .iter()
        .filter(|c| c.element_count == 0)
        .map(|c| c.name.as_str())
        .collect();

    if empty.len() == categories.len() {
        return RuleOutcome::warning(format!(
            "{} categories are listed but all have zero elements: {}.",
            categories.len(),
            join_codes(&empty)
        ));
    }

    let populated = categories.len() - empty.len();
    let mut details = format!(
        "{} of {} categories contain elements ({} elements in total).",
        populated,
        categories.len(),
        input.model.total_elements()
    );
    if !empty.is_empty() {
        details.push_str(&format!(" Empty categories: {}.", join_codes(&empty)));
    }
    RuleOutcome::pass(details)
}
