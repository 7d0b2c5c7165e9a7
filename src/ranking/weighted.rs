use std::collections::HashMap;

use super::{sort_descending, ScoredAnswer};

/// Weight of the question-only score when both queries found the answer.
pub const QUESTION_WEIGHT: f64 = 0.65;
/// Weight of the question+answers score when both queries found the answer.
pub const ANSWER_WEIGHT: f64 = 0.35;

/// Combines the question-only and question+answers scores per answer.
///
/// - found by both queries: `question * 0.65 + answer * 0.35`
/// - found only by the question+answers query: its score
/// - otherwise: 0
///
/// Every answer appears in the output, highest first.
pub fn weight<A: AsRef<str>>(
    question_results: &HashMap<&str, f64>,
    answer_results: &HashMap<&str, f64>,
    answers: &[A],
) -> Vec<ScoredAnswer> {
    let mut weighted: Vec<ScoredAnswer> = answers
        .iter()
        .map(|answer| {
            let answer = answer.as_ref();
            let score = match (question_results.get(answer), answer_results.get(answer)) {
                (Some(q), Some(a)) => q * QUESTION_WEIGHT + a * ANSWER_WEIGHT,
                (None, Some(a)) => *a,
                _ => 0.0,
            };
            ScoredAnswer::new(answer, score)
        })
        .collect();

    sort_descending(&mut weighted);
    weighted
}
