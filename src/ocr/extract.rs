use regex::Regex;

use super::QuestionCard;
use crate::error::{Error, Result};

/// Blocks shorter than this at the top of the text are treated as the
/// round header/timer and skipped.
const MIN_HEADER_LEN: usize = 10;

/// Blank line (possibly with stray whitespace) separating text blocks.
const BLOCK_SEPARATOR: &str = r"\n[ \t\x0C]*\n";

/// Splits raw OCR text into the question and candidate answers.
///
/// The screenshot reads top to bottom as: optional short header, question
/// (one or more lines), then answer cards separated by blank lines. An
/// answer block that spans several lines yields one answer per line.
pub fn parse_question_answers(text: &str) -> Result<QuestionCard> {
    let separator = Regex::new(BLOCK_SEPARATOR)
        .map_err(|e| Error::ExtractionFailed(format!("Failed to compile regex: {e}")))?;

    let mut blocks: Vec<&str> = separator
        .split(text)
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .collect();

    if blocks
        .first()
        .is_some_and(|first| first.chars().count() < MIN_HEADER_LEN)
    {
        blocks.remove(0);
    }

    let Some((question_block, answer_blocks)) = blocks.split_first() else {
        return Err(Error::ExtractionFailed("no question found in OCR text".into()));
    };

    let question = question_block
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let answers: Vec<String> = answer_blocks
        .iter()
        .flat_map(|block| block.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if answers.is_empty() {
        return Err(Error::ExtractionFailed(format!(
            "no answers found after question '{}'",
            question
        )));
    }

    Ok(QuestionCard { question, answers })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_question_and_answers() {
        let text = "Which planet is known as\nthe Red Planet?\n\nVenus\n\nMars\n\nJupiter\n\x0C";
        let card = parse_question_answers(text).unwrap();

        assert_eq!(card.question, "Which planet is known as the Red Planet?");
        assert_eq!(card.answers, vec!["Venus", "Mars", "Jupiter"]);
    }

    #[test]
    fn test_parse_skips_short_header() {
        let text = "0:07\n\nWhat is the capital of France?\n\nParis\n\nLyon\n\nNice";
        let card = parse_question_answers(text).unwrap();

        assert_eq!(card.question, "What is the capital of France?");
        assert_eq!(card.answers, vec!["Paris", "Lyon", "Nice"]);
    }

    #[test]
    fn test_parse_answers_in_single_block() {
        let text = "Who painted the Mona Lisa?\n\nLeonardo da Vinci\nMichelangelo\nRaphael\n";
        let card = parse_question_answers(text).unwrap();

        assert_eq!(
            card.answers,
            vec!["Leonardo da Vinci", "Michelangelo", "Raphael"]
        );
    }

    #[test]
    fn test_parse_keeps_duplicate_answers() {
        let text = "Which word appears twice here?\n\nyes\n\nno\n\nyes";
        let card = parse_question_answers(text).unwrap();
        assert_eq!(card.answers, vec!["yes", "no", "yes"]);
    }

    #[test]
    fn test_parse_tolerates_whitespace_blank_lines() {
        let text = "Which ocean is the largest?\n  \nPacific\n\t\nAtlantic";
        let card = parse_question_answers(text).unwrap();
        assert_eq!(card.answers, vec!["Pacific", "Atlantic"]);
    }

    #[test]
    fn test_parse_empty_text_fails() {
        assert!(matches!(
            parse_question_answers("  \n\x0C"),
            Err(Error::ExtractionFailed(_))
        ));
    }

    #[test]
    fn test_parse_question_without_answers_fails() {
        assert!(matches!(
            parse_question_answers("Which planet is known as the Red Planet?\n"),
            Err(Error::ExtractionFailed(_))
        ));
    }
}
