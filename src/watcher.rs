//! Screenshot folder polling.
//!
//! Picks up one screenshot at a time from the watched folder, runs the
//! pipeline and moves the file into the processed folder as `<number>.png`,
//! so the next poll sees the next screenshot.

use anyhow::{bail, Context, Result};
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use crate::log;
use crate::ocr::QuestionExtractor;
use crate::pipeline::Pipeline;
use crate::report::{append_report, Report};
use crate::search::SearchClient;

/// Report log file inside the processed folder.
pub const REPORTS_FILE: &str = "reports.jsonl";

/// Result of one poll of the watched folder.
#[derive(Debug)]
pub enum PollOutcome {
    /// No screenshot was waiting.
    Idle,
    /// A screenshot was ranked.
    Answered(Report),
    /// A screenshot was picked up but its run failed.
    Failed { number: u32 },
}

pub struct Watcher<S, E> {
    pipeline: Pipeline<S, E>,
    watch_dir: PathBuf,
    processed_dir: PathBuf,
    poll_interval: Duration,
    next_number: u32,
}

impl<S: SearchClient, E: QuestionExtractor> Watcher<S, E> {
    pub fn new(
        pipeline: Pipeline<S, E>,
        watch_dir: PathBuf,
        processed_dir: PathBuf,
        poll_interval: Duration,
        first_number: u32,
    ) -> Self {
        Self {
            pipeline,
            watch_dir,
            processed_dir,
            poll_interval,
            next_number: first_number,
        }
    }

    /// Number the next screenshot will be processed under.
    pub fn next_number(&self) -> u32 {
        self.next_number
    }

    /// Polls forever. Only filesystem errors on the watched folders stop the loop.
    pub fn run(&mut self) -> Result<()> {
        fs::create_dir_all(&self.processed_dir).with_context(|| {
            format!("Failed to create {}", self.processed_dir.display())
        })?;

        log(&format!(
            "Watching {} for screenshots (processed → {}), starting at question {}",
            self.watch_dir.display(),
            self.processed_dir.display(),
            self.next_number()
        ));

        loop {
            match self.run_once()? {
                PollOutcome::Idle => thread::sleep(self.poll_interval),
                PollOutcome::Answered(report) => match report.best_answer() {
                    Some(best) => log(&format!(
                        "Question {} best answer: {}",
                        report.number, best
                    )),
                    None => log(&format!(
                        "Question {}: no answer found in the search results",
                        report.number
                    )),
                },
                PollOutcome::Failed { number } => {
                    log(&format!("Question {} skipped, waiting for the next screenshot", number))
                }
            }
        }
    }

    /// Processes the next waiting screenshot, if any.
    ///
    /// A failed run still consumes its question number, and the screenshot
    /// is moved out of the watched folder either way. Numbers whose
    /// `<number>.png` is already in the processed folder are skipped, so a
    /// restarted session never replaces earlier screenshots.
    pub fn run_once(&mut self) -> Result<PollOutcome> {
        let Some(screenshot) = find_next_screenshot(&self.watch_dir)? else {
            return Ok(PollOutcome::Idle);
        };

        let number = self.claim_number();
        log(&format!(
            "Processing question {} from {}",
            number,
            screenshot.display()
        ));

        let outcome = match self.pipeline.process_screenshot(number, &screenshot) {
            Ok(report) => {
                println!("{}\n", report);
                if let Err(e) =
                    append_report(&self.processed_dir.join(REPORTS_FILE), &report)
                {
                    log(&format!("Failed to append report {}: {}", number, e));
                }
                PollOutcome::Answered(report)
            }
            Err(e) => {
                log(&format!("Question {} failed: {}", number, e));
                PollOutcome::Failed { number }
            }
        };

        let target = self.processed_path(number);
        move_file(&screenshot, &target)?;
        log(&format!("Moved {} to {}", screenshot.display(), target.display()));

        self.next_number += 1;
        Ok(outcome)
    }

    fn processed_path(&self, number: u32) -> PathBuf {
        self.processed_dir.join(format!("{}.png", number))
    }

    /// Advances past numbers already taken in the processed folder.
    fn claim_number(&mut self) -> u32 {
        while self.processed_path(self.next_number).exists() {
            log(&format!(
                "{} already exists, skipping question number {}",
                self.processed_path(self.next_number).display(),
                self.next_number
            ));
            self.next_number += 1;
        }
        self.next_number
    }
}

/// First `.png` file in `dir` by name, matching the extension case-insensitively.
pub fn find_next_screenshot(dir: &Path) -> Result<Option<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut screenshots: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_png(path))
        .collect();

    screenshots.sort();
    Ok(screenshots.into_iter().next())
}

fn is_png(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// Renames `from` to `to`, falling back to copy + delete across filesystems.
/// Never replaces an existing `to`.
fn move_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        bail!("Refusing to overwrite {}", to.display());
    }
    if fs::rename(from, to).is_ok() {
        return Ok(());
    }

    let mut source =
        File::open(from).with_context(|| format!("Failed to open {}", from.display()))?;
    let mut target = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(to)
        .with_context(|| format!("Failed to create {}", to.display()))?;
    io::copy(&mut source, &mut target)
        .with_context(|| format!("Failed to move {} to {}", from.display(), to.display()))?;
    fs::remove_file(from).with_context(|| format!("Failed to remove {}", from.display()))?;
    Ok(())
}
