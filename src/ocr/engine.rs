use anyhow::{anyhow, Result};
use image::GrayImage;
use std::process::Command;
use tempfile::NamedTempFile;

use super::setup::TesseractPaths;

/// Tesseract's default page segmentation: fully automatic, no OSD.
pub const DEFAULT_PSM: u8 = 3;

/// Runs Tesseract on an enhanced grayscale image and returns the raw text.
///
/// Blank lines in the output separate text blocks; callers rely on them to
/// tell the question apart from the answers.
pub fn recognize_text(img: &GrayImage, tesseract: &TesseractPaths, psm: u8) -> Result<String> {
    // Save image to temporary file
    let temp_input = NamedTempFile::with_suffix(".png")?;
    img.save(temp_input.path())?;

    let output = Command::new(&tesseract.executable)
        .arg(temp_input.path())
        .arg("stdout")
        .arg("--tessdata-dir")
        .arg(&tesseract.tessdata)
        .arg("-l")
        .arg("eng")
        .arg("--psm")
        .arg(psm.to_string())
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(anyhow!("Tesseract failed: {}", stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}
