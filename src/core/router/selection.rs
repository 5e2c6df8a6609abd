//! Use-case model selection

use crate::core::types::ModelSelectionStrategy;

/// Pick the model id to try first for a use case
///
/// An exact key match in `use_case_models` wins, otherwise the strategy's
/// primary model. Keys are not normalized; casing and whitespace must match
/// the strategy document exactly.
pub fn select_model<'a>(strategy: &'a ModelSelectionStrategy, use_case: &str) -> &'a str {
    strategy
        .use_case_models
        .as_ref()
        .and_then(|overrides| overrides.get(use_case))
        .map(String::as_str)
        .unwrap_or(&strategy.primary_model)
}
