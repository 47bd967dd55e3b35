//! "Did you mean" hints for mistyped verbs.

use strsim::jaro_winkler;

use super::command::verbs;

/// Minimum similarity score for a hint (0.0-1.0).
const SUGGEST_THRESHOLD: f64 = 0.8;

/// The grammar verb closest to `input`, if any is similar enough.
pub fn suggest_verb(input: &str) -> Option<&'static str> {
    let input_lower = input.trim().to_lowercase();
    if input_lower.is_empty() {
        return None;
    }

    verbs()
        .map(|verb| (verb, jaro_winkler(&input_lower, verb)))
        .filter(|(_, score)| *score >= SUGGEST_THRESHOLD)
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(verb, _)| verb)
}
