//! Clipboard capture coordination
//!
//! Sits between "the clipboard changed" and "a path string is ready": asks
//! the collaborator for the current image, drops duplicates by content
//! fingerprint, writes the PNG, and resolves the clipboard path string.

use anyhow::{Context, Result};
use chrono::Local;
use image::DynamicImage;
use std::fs;
use std::path::PathBuf;

use crate::fingerprint;
use crate::resolve;
use crate::settings::Settings;

/// Source of the current clipboard image
///
/// Implemented by the clipboard backend (or a fixture in tests). The
/// coordinator only needs "give me the decoded image, if there is one"; how
/// the change notification and the decode happen is the caller's business.
pub trait ImageSource {
    /// Return the image currently on the clipboard, if any
    fn current_image(&mut self) -> Result<Option<DynamicImage>>;
}

/// A capture that reached disk
#[derive(Debug, Clone, PartialEq)]
pub struct SavedCapture {
    /// Where the PNG was written
    pub file_path: PathBuf,
    /// String handed back for clipboard placement
    pub clipboard_path: String,
    /// Whether project mode shaped the clipboard path
    pub project_mode: bool,
}

/// Outcome of one clipboard-update signal
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureOutcome {
    /// A capture was already in flight; this signal was dropped
    Busy,
    /// No image on the clipboard, nothing to do
    NoImage,
    /// Image content matched the previous capture
    Duplicate,
    /// Image written and clipboard path resolved
    Saved(SavedCapture),
    /// Save failed; user-facing message
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaptureState {
    Idle,
    Processing,
}

/// Coordinates capture of clipboard images
///
/// Holds the last-seen fingerprint (empty until the first capture, so the
/// first image is never treated as a duplicate) and a non-blocking
/// re-entrancy guard: at most one capture is in flight, excess signals are
/// dropped rather than queued, and the guard is released on every exit path.
pub struct CaptureCoordinator {
    state: CaptureState,
    last_fingerprint: String,
}

impl CaptureCoordinator {
    pub fn new() -> Self {
        CaptureCoordinator {
            state: CaptureState::Idle,
            last_fingerprint: String::new(),
        }
    }

    /// Handle a clipboard-update signal
    pub fn on_clipboard_update(
        &mut self,
        settings: &Settings,
        source: &mut dyn ImageSource,
    ) -> CaptureOutcome {
        if self.state == CaptureState::Processing {
            log::debug!("Capture already in flight, dropping signal");
            return CaptureOutcome::Busy;
        }

        self.state = CaptureState::Processing;
        let outcome = match self.process(settings, source) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Capture failed: {:#}", e);
                CaptureOutcome::Failed(format!("{:#}", e))
            }
        };
        self.state = CaptureState::Idle;

        outcome
    }

    fn process(
        &mut self,
        settings: &Settings,
        source: &mut dyn ImageSource,
    ) -> Result<CaptureOutcome> {
        let image = match source.current_image() {
            Ok(Some(image)) => image,
            Ok(None) => return Ok(CaptureOutcome::NoImage),
            Err(e) => {
                // Absence of a readable image is a no-op, not an error
                log::debug!("Could not read clipboard image: {:#}", e);
                return Ok(CaptureOutcome::NoImage);
            }
        };

        let png = fingerprint::encode_png(&image)?;
        let digest = fingerprint::digest_hex(&png);
        if digest == self.last_fingerprint {
            log::debug!("Duplicate clipboard image, skipping");
            return Ok(CaptureOutcome::Duplicate);
        }

        log::info!("New clipboard image: {}x{}", image.width(), image.height());
        self.last_fingerprint = digest;

        let dir = resolve::save_directory(settings);
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create save directory {:?}", dir))?;

        let file_name = format!("clipboard_{}.png", Local::now().format("%Y%m%d_%H%M%S"));
        let file_path = dir.join(&file_name);
        fs::write(&file_path, &png)
            .with_context(|| format!("Failed to save image to {:?}", file_path))?;

        let clipboard_path = resolve::clipboard_path(settings, &file_path.to_string_lossy());
        log::info!("Saved {:?}, clipboard path {}", file_path, clipboard_path);

        Ok(CaptureOutcome::Saved(SavedCapture {
            file_path,
            clipboard_path,
            project_mode: resolve::is_project_mode_active(settings),
        }))
    }
}

impl Default for CaptureCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
