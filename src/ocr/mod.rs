//! Screenshot → question and answers.
//!
//! The pipeline depends on the [`QuestionExtractor`] trait only; the
//! Tesseract-backed implementation enhances the image, runs OCR and splits
//! the text into a [`QuestionCard`].

pub mod engine;
pub mod extract;
pub mod preprocess;
pub mod setup;

pub use engine::{recognize_text, DEFAULT_PSM};
pub use extract::parse_question_answers;
pub use preprocess::{enhance, EnhanceSettings};
pub use setup::{ensure_tesseract, TesseractPaths};

use std::path::Path;

use crate::error::{Error, Result};
use crate::log;

/// The raw question and candidate answers read from one screenshot.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionCard {
    /// Question text, stop words not yet removed.
    pub question: String,
    /// Candidate answers in on-screen order.
    pub answers: Vec<String>,
}

pub trait QuestionExtractor {
    /// Reads the question and answers from a screenshot.
    ///
    /// Fails with `ExtractionFailed` when the image cannot be read or no
    /// question/answer structure is found.
    fn extract(&self, image_path: &Path) -> Result<QuestionCard>;
}

/// Extracts questions with a local Tesseract install.
pub struct TesseractExtractor {
    tesseract: TesseractPaths,
    enhance: EnhanceSettings,
    psm: u8,
}

impl TesseractExtractor {
    pub fn new(tesseract: TesseractPaths, enhance: EnhanceSettings, psm: u8) -> Self {
        Self {
            tesseract,
            enhance,
            psm,
        }
    }
}

impl QuestionExtractor for TesseractExtractor {
    fn extract(&self, image_path: &Path) -> Result<QuestionCard> {
        let img = image::open(image_path).map_err(|e| {
            Error::ExtractionFailed(format!("Failed to load {}: {}", image_path.display(), e))
        })?;

        let enhanced = enhance(&img, &self.enhance);
        let text = recognize_text(&enhanced, &self.tesseract, self.psm)
            .map_err(|e| Error::ExtractionFailed(format!("{:#}", e)))?;

        log(&format!(
            "OCR read {} characters from {}",
            text.len(),
            image_path.display()
        ));

        parse_question_answers(&text)
    }
}
