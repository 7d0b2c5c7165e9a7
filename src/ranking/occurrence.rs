use std::collections::HashMap;

use super::{sort_descending, ScoredAnswer};

/// Scores each answer by how often it appears among the snippet words.
///
/// Snippet words are lower-cased and counted; the score of an answer is its
/// count as a percentage of the number of *distinct* words. Answers are looked
/// up as given, without lower-casing, so an answer containing capitals never
/// matches. Answers that never occur are dropped.
///
/// Returns the matches sorted highest first, or a single sentinel entry
/// (`""`, 0) when no answer matched.
pub fn score<S, A>(snippets: &[S], answers: &[A]) -> Vec<ScoredAnswer>
where
    S: AsRef<str>,
    A: AsRef<str>,
{
    let mut counts: HashMap<String, u32> = HashMap::new();
    for word in snippets
        .iter()
        .flat_map(|snippet| snippet.as_ref().split_whitespace())
    {
        *counts.entry(word.to_lowercase()).or_insert(0) += 1;
    }
    let distinct_words = counts.len();

    let mut results: Vec<ScoredAnswer> = answers
        .iter()
        .filter_map(|answer| {
            let answer = answer.as_ref();
            counts.get(answer).map(|&count| {
                // A hit means at least one word was counted.
                debug_assert!(distinct_words > 0);
                let pct = (count as f64 / distinct_words as f64) * 100.0;
                ScoredAnswer::new(answer, pct)
            })
        })
        .collect();

    if results.is_empty() {
        return vec![ScoredAnswer::sentinel()];
    }

    sort_descending(&mut results);
    results
}
