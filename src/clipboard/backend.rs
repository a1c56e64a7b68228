use anyhow::Result;

/// Trait for clipboard backend abstraction
/// Supports different clipboard systems (Wayland, X11)
/// Reads the current clipboard image and writes the resolved path string back
pub trait ClipboardBackend: Send + Sync {
    /// Read the current clipboard image as PNG bytes
    /// Returns None when the clipboard holds no image
    fn read_image(&self) -> Result<Option<Vec<u8>>>;

    /// Write text to clipboard
    fn write_text(&self, text: &str) -> Result<()>;

    /// Get the backend name (for logging/debugging)
    fn name(&self) -> &'static str;
}
