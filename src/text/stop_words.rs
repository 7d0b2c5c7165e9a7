//! Stop-word set used to clean questions and search snippets.
//!
//! The set is built once at startup and handed to the pipeline. Negations
//! carry meaning for trivia questions ("Which of these is NOT ..."), so
//! "not" and "non" are never treated as stop words, whatever list is used.

use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Words that are always kept even if the base list contains them.
const KEPT_WORDS: [&str; 2] = ["not", "non"];

/// English stop words (NLTK corpus list).
const ENGLISH: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

/// Immutable set of stop words. Membership is exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// Builds a set from any word list, minus the kept negations.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut words: HashSet<String> = words.into_iter().map(Into::into).collect();
        for kept in KEPT_WORDS {
            words.remove(kept);
        }
        Self { words }
    }

    /// The default English list.
    pub fn english() -> Self {
        Self::from_words(ENGLISH.iter().copied())
    }

    /// Loads a list from a file with one word per line.
    ///
    /// Surrounding whitespace is trimmed; blank lines and `#` comments are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stop words from {}", path.display()))?;

        let words = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'));

        Ok(Self::from_words(words))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_english_excludes_negations() {
        let sw = StopWords::english();
        assert!(sw.contains("the"));
        assert!(sw.contains("which"));
        assert!(!sw.contains("not"));
        assert!(!sw.contains("non"));
        assert_eq!(sw.len(), ENGLISH.len() - 1);
    }

    #[test]
    fn test_from_words_strips_negations() {
        let sw = StopWords::from_words(["the", "not", "non", "a"]);
        assert_eq!(sw.len(), 2);
        assert!(!sw.contains("not"));
        assert!(!sw.contains("non"));
    }

    #[test]
    fn test_negations_only_list_is_empty() {
        assert!(StopWords::from_words(["not", "non"]).is_empty());
        assert!(!StopWords::english().is_empty());
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let sw = StopWords::from_words(["the"]);
        assert!(sw.contains("the"));
        assert!(!sw.contains("The"));
    }

    #[test]
    fn test_load_skips_comments_and_blanks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# custom list").unwrap();
        writeln!(file, "the").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  of  ").unwrap();
        writeln!(file, "not").unwrap();

        let sw = StopWords::load(file.path()).unwrap();
        assert_eq!(sw.len(), 2);
        assert!(sw.contains("of"));
        assert!(!sw.contains("not"));
    }

    #[test]
    fn test_load_missing_file_errors() {
        assert!(StopWords::load(Path::new("/nonexistent/stop_words.txt")).is_err());
    }
}
