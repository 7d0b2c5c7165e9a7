use anyhow::{anyhow, Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tempfile::NamedTempFile;

use crate::log;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";
const TRAINED_DATA: &str = "eng.traineddata";

/// Common install locations checked when `tesseract` is not on PATH.
const COMMON_EXECUTABLES: &[&str] = &[
    "/usr/bin/tesseract",
    "/usr/local/bin/tesseract",
    "/opt/homebrew/bin/tesseract",
    r"C:\Program Files\Tesseract-OCR\tesseract.exe",
    r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
];

/// Common tessdata locations shipped by system packages.
const COMMON_TESSDATA: &[&str] = &[
    "/usr/share/tesseract-ocr/5/tessdata",
    "/usr/share/tesseract-ocr/4.00/tessdata",
    "/usr/share/tessdata",
    "/usr/local/share/tessdata",
    "/opt/homebrew/share/tessdata",
    r"C:\Program Files\Tesseract-OCR\tessdata",
    r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
];

#[derive(Debug, Clone)]
pub struct TesseractPaths {
    pub executable: PathBuf,
    pub tessdata: PathBuf,
}

/// Returns the directory for locally downloaded Tesseract data.
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hq-trivia-bot")
        .join("tesseract")
}

/// Locates the Tesseract executable and English trained data.
///
/// `configured` takes precedence over discovery. If no tessdata directory
/// with `eng.traineddata` exists, the file is downloaded into the local
/// data directory.
pub fn ensure_tesseract(configured: Option<&Path>) -> Result<TesseractPaths> {
    let executable = match configured {
        Some(path) if path.exists() => path.to_path_buf(),
        Some(path) => return Err(anyhow!("Configured Tesseract not found: {}", path.display())),
        None => find_tesseract_executable()?,
    };
    log(&format!("Using Tesseract at: {}", executable.display()));

    let tessdata = match find_tessdata_dir() {
        Some(dir) => dir,
        None => {
            log("eng.traineddata not found locally, downloading...");
            let dir = get_tesseract_dir().join("tessdata");
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
            download_tessdata(&dir)?;
            dir
        }
    };
    log(&format!("Using tessdata at: {}", tessdata.display()));

    Ok(TesseractPaths {
        executable,
        tessdata,
    })
}

/// Finds the Tesseract executable on PATH or in a common install location.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    if let Ok(output) = Command::new("tesseract").arg("--version").output() {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    COMMON_EXECUTABLES
        .iter()
        .map(|p| PathBuf::from(*p))
        .find(|p| p.exists())
        .ok_or_else(|| anyhow!("Tesseract not found. Please install Tesseract-OCR."))
}

/// Finds a directory containing `eng.traineddata`.
pub fn find_tessdata_dir() -> Option<PathBuf> {
    let local = get_tesseract_dir().join("tessdata");
    if has_trained_data(&local) {
        return Some(local);
    }

    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let prefix = PathBuf::from(prefix);
        for candidate in [prefix.clone(), prefix.join("tessdata")] {
            if has_trained_data(&candidate) {
                return Some(candidate);
            }
        }
    }

    COMMON_TESSDATA
        .iter()
        .map(|p| PathBuf::from(*p))
        .find(|p| has_trained_data(p))
}

fn has_trained_data(dir: &Path) -> bool {
    dir.join(TRAINED_DATA).exists()
}

/// Downloads English trained data into `tessdata_dir`.
fn download_tessdata(tessdata_dir: &Path) -> Result<()> {
    let url = format!("{}/{}", TESSDATA_REPO, TRAINED_DATA);

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "hq-trivia-bot")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}: HTTP {}",
            TRAINED_DATA,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    save_trained_data(tessdata_dir, &bytes)?;

    log(&format!("Downloaded {} ({} bytes)", TRAINED_DATA, bytes.len()));

    Ok(())
}

/// Writes `eng.traineddata` through a temp file in the same directory, so an
/// interrupted write never leaves a truncated file under the final name.
fn save_trained_data(tessdata_dir: &Path, bytes: &[u8]) -> Result<PathBuf> {
    let target = tessdata_dir.join(TRAINED_DATA);

    let mut file = NamedTempFile::new_in(tessdata_dir)
        .with_context(|| format!("Failed to create temp file in {}", tessdata_dir.display()))?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(&target)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    Ok(target)
}
