pub mod backend;
pub mod watch;
pub mod wayland;

use anyhow::{Context, Result, anyhow};
use image::DynamicImage;
use std::env;

pub use backend::ClipboardBackend;
pub use wayland::WaylandBackend;

use crate::capture::ImageSource;

/// Create a clipboard backend based on the current display server
/// Detects Wayland via WAYLAND_DISPLAY environment variable
/// Returns error if no supported display server is detected
pub fn create_backend() -> Result<Box<dyn ClipboardBackend>> {
    // Check for Wayland
    if env::var("WAYLAND_DISPLAY").is_ok() {
        log::info!("Detected Wayland display server");
        let backend = WaylandBackend::new()?;
        return Ok(Box::new(backend));
    }

    if env::var("DISPLAY").is_ok() {
        return Err(anyhow!(
            "X11 detected but not yet supported. Wayland support only (set WAYLAND_DISPLAY)"
        ));
    }

    Err(anyhow!(
        "No supported display server detected. Set WAYLAND_DISPLAY for Wayland"
    ))
}

/// Adapts a [`ClipboardBackend`] to the coordinator's [`ImageSource`] seam,
/// decoding the backend's PNG bytes
pub struct BackendSource<'a> {
    backend: &'a dyn ClipboardBackend,
}

impl<'a> BackendSource<'a> {
    pub fn new(backend: &'a dyn ClipboardBackend) -> Self {
        BackendSource { backend }
    }
}

impl ImageSource for BackendSource<'_> {
    fn current_image(&mut self) -> Result<Option<DynamicImage>> {
        let Some(bytes) = self.backend.read_image()? else {
            return Ok(None);
        };

        let image = image::load_from_memory(&bytes)
            .context("Failed to decode clipboard image")?;
        Ok(Some(image))
    }
}
