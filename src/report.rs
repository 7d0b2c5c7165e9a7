//! Per-screenshot result report.
//!
//! Printed to the console after each run and appended as one JSON object per
//! line to `reports.jsonl` in the processed folder. Appending per run keeps
//! earlier results on disk even if the bot is killed mid-game.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ranking::{format_ranking, ScoredAnswer};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Question number within this session.
    pub number: u32,
    pub processed_at: DateTime<Local>,
    /// Screenshot the question was read from.
    pub source: PathBuf,
    /// Question with stop words removed.
    pub question: String,
    pub answers: Vec<String>,
    /// Occurrence scores from searching the question alone.
    pub question_only_ranking: Vec<ScoredAnswer>,
    /// Occurrence scores from searching the question with all answers.
    pub combined_ranking: Vec<ScoredAnswer>,
    /// Weighted combination of the two rankings.
    pub final_ranking: Vec<ScoredAnswer>,
}

impl Report {
    /// Top-ranked answer, if any answer scored above zero.
    pub fn best_answer(&self) -> Option<&ScoredAnswer> {
        self.final_ranking.first().filter(|top| top.score > 0.0)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Question {}: {}", self.number, self.question)?;
        writeln!(f, "{:?}", self.answers)?;
        writeln!(f)?;
        writeln!(f, "Results with just question")?;
        writeln!(f, "{}", format_ranking(&self.question_only_ranking))?;
        writeln!(f)?;
        writeln!(f, "Results with question + answers")?;
        writeln!(f, "{}", format_ranking(&self.combined_ranking))?;
        writeln!(f)?;
        writeln!(f, "Weighted results")?;
        write!(f, "{}", format_ranking(&self.final_ranking))
    }
}

/// Appends `report` as a single JSON line.
pub fn append_report(path: &Path, report: &Report) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let line = serde_json::to_string(report)?;
    writeln!(file, "{}", line)?;
    Ok(())
}
