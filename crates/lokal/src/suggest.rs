//! "Did you mean" suggestions for misspelled names.

use strsim::levenshtein;

/// Compute typo suggestions using Levenshtein distance.
///
/// Candidates within distance 1 (names of up to 3 characters) or 2 (longer
/// names) are returned closest first, at most three. Exact matches are not
/// suggestions.
pub fn compute_suggestions(name: &str, available: &[String]) -> Vec<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &String)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            (dist > 0 && dist <= max_distance).then_some((dist, candidate))
        })
        .collect();

    suggestions.sort_by(|(a_dist, a), (b_dist, b)| a_dist.cmp(b_dist).then_with(|| a.cmp(b)));
    suggestions.dedup_by(|(_, a), (_, b)| a == b);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.clone())
        .collect()
}

/// Format suggestions as a message suffix, or nothing if there are none.
pub(crate) fn did_you_mean(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}
