//! Text normalization shared by question cleanup and snippet cleanup.

pub mod stop_words;

pub use stop_words::StopWords;

/// Drops every token that is a member of `stop_words` and joins the rest
/// with single spaces, preserving order.
///
/// Callers split on single spaces, so consecutive spaces yield empty tokens
/// that survive the filter.
pub fn remove_stop_words<'a, I>(tokens: I, stop_words: &StopWords) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    tokens
        .into_iter()
        .filter(|token| !stop_words.contains(token))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Strips newlines from a raw search snippet, then removes stop words.
pub fn clean_snippet(snippet: &str, stop_words: &StopWords) -> String {
    let joined = snippet.replace('\n', "");
    remove_stop_words(joined.split(' '), stop_words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_stop_words_basic() {
        let sw = StopWords::from_words(["the"]);
        assert_eq!(remove_stop_words(["the", "cat", "sat"], &sw), "cat sat");
    }

    #[test]
    fn test_remove_stop_words_empty_input() {
        let sw = StopWords::english();
        assert_eq!(remove_stop_words(std::iter::empty::<&str>(), &sw), "");
    }

    #[test]
    fn test_remove_stop_words_all_removed() {
        let sw = StopWords::from_words(["a", "the"]);
        assert_eq!(remove_stop_words(["the", "a"], &sw), "");
    }

    #[test]
    fn test_remove_stop_words_keeps_order_and_case() {
        let sw = StopWords::english();
        let question = "Which of these is NOT a The Beatles album?";
        assert_eq!(
            remove_stop_words(question.split(' '), &sw),
            "Which NOT The Beatles album?"
        );
    }

    #[test]
    fn test_remove_stop_words_keeps_negations() {
        let sw = StopWords::english();
        assert_eq!(
            remove_stop_words("which is not a mammal".split(' '), &sw),
            "not mammal"
        );
    }

    #[test]
    fn test_clean_snippet_strips_newlines() {
        let sw = StopWords::from_words(["the"]);
        assert_eq!(
            clean_snippet("the capital of\nFrance is the city", &sw),
            "capital ofFrance is city"
        );
    }
}
