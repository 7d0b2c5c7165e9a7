//! Answer ranking: occurrence scoring over search snippets and the
//! two-pass weighted combination.

pub mod occurrence;
pub mod weighted;

pub use occurrence::score;
pub use weighted::weight;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A candidate answer with its score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredAnswer {
    pub answer: String,
    pub score: f64,
}

impl ScoredAnswer {
    pub fn new(answer: impl Into<String>, score: f64) -> Self {
        Self {
            answer: answer.into(),
            score,
        }
    }

    /// The "no answer matched" placeholder returned by the occurrence scorer.
    pub fn sentinel() -> Self {
        Self::new("", 0.0)
    }
}

impl fmt::Display for ScoredAnswer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "('{}', {:.2})", self.answer, self.score)
    }
}

/// Looks up scores by answer. Later entries win for duplicate answers.
pub fn score_map(ranking: &[ScoredAnswer]) -> HashMap<&str, f64> {
    ranking
        .iter()
        .map(|scored| (scored.answer.as_str(), scored.score))
        .collect()
}

/// Stable sort, highest score first. Ties keep their input order.
pub(crate) fn sort_descending(ranking: &mut [ScoredAnswer]) {
    ranking.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Formats a ranking on one line, e.g. `[('Paris', 12.50), ('Lyon', 3.10)]`.
pub fn format_ranking(ranking: &[ScoredAnswer]) -> String {
    let items = ranking
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_map_last_entry_wins() {
        let ranking = vec![ScoredAnswer::new("a", 1.0), ScoredAnswer::new("a", 2.0)];
        let map = score_map(&ranking);
        assert_eq!(map.len(), 1);
        assert_eq!(map["a"], 2.0);
    }

    #[test]
    fn test_sort_descending_is_stable() {
        let mut ranking = vec![
            ScoredAnswer::new("low", 1.0),
            ScoredAnswer::new("tie1", 5.0),
            ScoredAnswer::new("high", 9.0),
            ScoredAnswer::new("tie2", 5.0),
        ];
        sort_descending(&mut ranking);
        let order: Vec<&str> = ranking.iter().map(|s| s.answer.as_str()).collect();
        assert_eq!(order, ["high", "tie1", "tie2", "low"]);
    }

    #[test]
    fn test_format_ranking() {
        let ranking = vec![ScoredAnswer::new("Paris", 12.5), ScoredAnswer::sentinel()];
        assert_eq!(format_ranking(&ranking), "[('Paris', 12.50), ('', 0.00)]");
    }
}
