//! One screenshot in, one ranked report out.
//!
//! Extract question and answers, search the question alone, search the
//! question with every answer appended, score both result sets and weight
//! them into the final ranking.

use chrono::Local;
use std::path::Path;

use crate::error::{Error, Result};
use crate::log;
use crate::ocr::QuestionExtractor;
use crate::ranking::{self, score_map, ScoredAnswer};
use crate::report::Report;
use crate::search::SearchClient;
use crate::text::{clean_snippet, remove_stop_words, StopWords};

pub struct Pipeline<S, E> {
    stop_words: StopWords,
    search: S,
    extractor: E,
}

impl<S: SearchClient, E: QuestionExtractor> Pipeline<S, E> {
    pub fn new(stop_words: StopWords, search: S, extractor: E) -> Self {
        Self {
            stop_words,
            search,
            extractor,
        }
    }

    /// Reads the screenshot and ranks its answers.
    ///
    /// Extraction failures end the run before any search is made.
    pub fn process_screenshot(&self, number: u32, image_path: &Path) -> Result<Report> {
        let card = self.extractor.extract(image_path)?;
        self.run(number, image_path, &card.question, card.answers)
    }

    /// Ranks `answers` for an already extracted question.
    ///
    /// Only the searches are logged; the rankings are printed once by the
    /// caller through the report's `Display`.
    pub fn run(
        &self,
        number: u32,
        source: &Path,
        raw_question: &str,
        answers: Vec<String>,
    ) -> Result<Report> {
        let question = remove_stop_words(raw_question.split(' '), &self.stop_words);

        let question_snippets = self.search_snippets(&question)?;
        let question_only_ranking = ranking::score(&question_snippets, &answers);

        let combined_query = format!("{} {}", question, answers.join(" "));
        let combined_snippets = self.search_snippets(&combined_query)?;
        let combined_ranking = ranking::score(&combined_snippets, &answers);

        let final_ranking: Vec<ScoredAnswer> = ranking::weight(
            &score_map(&question_only_ranking),
            &score_map(&combined_ranking),
            &answers,
        );

        Ok(Report {
            number,
            processed_at: Local::now(),
            source: source.to_path_buf(),
            question,
            answers,
            question_only_ranking,
            combined_ranking,
            final_ranking,
        })
    }

    /// Queries the search client and cleans every snippet.
    ///
    /// A query with no hits is an empty result set, not a failure.
    fn search_snippets(&self, query: &str) -> Result<Vec<String>> {
        log(&format!("Searching: {}", query));
        let raw = match self.search.query(query) {
            Ok(snippets) => snippets,
            Err(Error::NoResults) => {
                log("Search returned no results");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        log(&format!("Received {} snippets", raw.len()));
        Ok(raw
            .iter()
            .map(|snippet| clean_snippet(snippet, &self.stop_words))
            .collect())
    }
}
