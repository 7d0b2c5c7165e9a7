//! HQ Trivia Bot
//!
//! Watches a folder for trivia screenshots, reads the question and answers
//! with Tesseract, searches the web for each question and ranks the answers
//! by how often they appear in the search snippets.

mod config;
mod error;
mod ocr;
mod paths;
mod pipeline;
mod ranking;
mod report;
mod search;
mod text;
mod watcher;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use clap::Parser;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use config::{default_config_path, load_config, BotConfig};
use ocr::TesseractExtractor;
use pipeline::Pipeline;
use search::{GoogleSearchClient, RetryingSearchClient};
use text::StopWords;
use watcher::Watcher;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Google Custom Search API key
    #[arg(long, env = "HQ_BOT_API_KEY")]
    api_key: Option<String>,

    /// Google Custom Search engine ID
    #[arg(long, env = "HQ_BOT_SEARCH_ID")]
    search_id: Option<String>,

    /// Folder to watch for screenshots (defaults to the desktop)
    #[arg(long)]
    watch_dir: Option<PathBuf>,

    /// Path to config.json (defaults to the executable's folder)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rank a single screenshot and exit instead of watching
    #[arg(long)]
    image: Option<PathBuf>,

    /// Number given to the first processed question
    #[arg(long)]
    start_number: Option<u32>,

    /// Extra attempts after a failed search request
    #[arg(long)]
    retries: Option<u32>,
}

impl Args {
    /// Applies command-line overrides on top of the loaded file.
    fn apply(&self, config: &mut BotConfig) {
        if let Some(key) = &self.api_key {
            config.api_key = key.clone();
        }
        if let Some(id) = &self.search_id {
            config.search_engine_id = id.clone();
        }
        if let Some(dir) = &self.watch_dir {
            config.watch_dir = dir.clone();
        }
        if let Some(number) = self.start_number {
            config.first_question_number = number;
        }
        if let Some(retries) = self.retries {
            config.search_retries = retries;
        }
    }
}

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::get_log_file())
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        let log_msg = format!("[PANIC]{} {}\n", location, msg);
        eprintln!("{}", log_msg);
        if let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(paths::get_log_file())
        {
            let _ = file.write_all(log_msg.as_bytes());
        }
    }));

    let args = Args::parse();

    paths::ensure_directories().context("Failed to create logs directory")?;

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let mut config = load_config(&config_path);
    args.apply(&mut config);
    config.validate()?;

    let stop_words = match &config.stop_words_file {
        Some(path) => StopWords::load(path)?,
        None => StopWords::english(),
    };
    if stop_words.is_empty() {
        log("Stop-word list is empty, questions and snippets are used as-is");
    } else {
        log(&format!("Loaded {} stop words", stop_words.len()));
    }

    let google = GoogleSearchClient::new(
        config.search_endpoint.clone(),
        config.api_key.clone(),
        config.search_engine_id.clone(),
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let search = RetryingSearchClient::new(
        google,
        config.search_retries,
        Duration::from_millis(config.retry_backoff_ms),
    );

    let tesseract = ocr::ensure_tesseract(config.tesseract_path.as_deref())?;
    let extractor = TesseractExtractor::new(tesseract, config.enhance, config.tesseract_psm);

    let pipeline = Pipeline::new(stop_words, search, extractor);

    if let Some(image) = &args.image {
        if !image.is_file() {
            return Err(anyhow!("Screenshot not found: {}", image.display()));
        }
        let report = pipeline.process_screenshot(config.first_question_number, image)?;
        println!("{}", report);
        if let Some(best) = report.best_answer() {
            log(&format!("Best answer: {}", best));
        }
        return Ok(());
    }

    let mut watcher = Watcher::new(
        pipeline,
        config.watch_dir.clone(),
        config.processed_dir(),
        Duration::from_millis(config.poll_interval_ms),
        config.first_question_number,
    );
    watcher.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_override_config() {
        let args = Args::parse_from([
            "hq-trivia-bot",
            "--api-key",
            "cli-key",
            "--watch-dir",
            "/tmp/screens",
            "--start-number",
            "4",
            "--retries",
            "2",
        ]);
        let mut config = BotConfig {
            api_key: "file-key".into(),
            search_engine_id: "file-cx".into(),
            ..BotConfig::default()
        };

        args.apply(&mut config);

        assert_eq!(config.api_key, "cli-key");
        assert_eq!(config.search_engine_id, "file-cx");
        assert_eq!(config.watch_dir, PathBuf::from("/tmp/screens"));
        assert_eq!(config.first_question_number, 4);
        assert_eq!(config.search_retries, 2);
    }
}
