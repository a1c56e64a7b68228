//! Mode-aware path resolution
//!
//! In normal mode saved files are announced with their WSL path. In project
//! mode they are announced relative to the project root, always with forward
//! slashes, so the string can be pasted into project files regardless of how
//! the save path itself was built.
//!
//! All functions are pure over a [`Settings`] snapshot. The mode is derived
//! on every call rather than cached because settings can change between
//! saves.

use std::path::{Path, PathBuf};

use crate::convert;
use crate::settings::Settings;

/// Whether project mode is in effect
///
/// Requires both the flag and a non-empty root path. Enabled-with-empty-root
/// deliberately falls back to normal mode instead of erroring.
pub fn is_project_mode_active(settings: &Settings) -> bool {
    settings.project_mode_enabled && !settings.project_root_path.is_empty()
}

/// Directory newly captured images should be written to
///
/// Project mode: `<root>/<screenshots dir>` joined with the host separator,
/// the screenshots dir's own separators left untouched. Normal mode: the
/// configured save path verbatim.
pub fn save_directory(settings: &Settings) -> PathBuf {
    if is_project_mode_active(settings) {
        Path::new(&settings.project_root_path).join(&settings.project_screenshots_dir)
    } else {
        PathBuf::from(&settings.save_path)
    }
}

/// Path string to place on the clipboard for a written file
///
/// Project mode returns `<screenshots dir>/<file name>` with forward slashes
/// only; this is intentionally not derived from [`save_directory`], so the
/// result is project-relative no matter how `written_path` was constructed.
/// Normal mode returns the WSL translation of `written_path`.
pub fn clipboard_path(settings: &Settings, written_path: &str) -> String {
    if is_project_mode_active(settings) {
        let normalized = written_path.replace('\\', "/");
        let file_name = match normalized.rfind('/') {
            Some(idx) => &normalized[idx + 1..],
            None => normalized.as_str(),
        };
        let dir = settings.project_screenshots_dir.replace('\\', "/");
        format!("{}/{}", dir, file_name)
    } else {
        convert::to_wsl_path(written_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> Settings {
        Settings {
            save_path: r"C:\Clips".to_string(),
            enable_logging: false,
            project_mode_enabled: false,
            project_root_path: String::new(),
            project_screenshots_dir: "screenshots".to_string(),
        }
    }

    #[test]
    fn test_project_mode_requires_flag_and_root() {
        let mut s = settings();
        assert!(!is_project_mode_active(&s));

        s.project_mode_enabled = true;
        assert!(!is_project_mode_active(&s));

        s.project_root_path = r"C:\Proj".to_string();
        assert!(is_project_mode_active(&s));

        s.project_mode_enabled = false;
        assert!(!is_project_mode_active(&s));
    }

    #[test]
    fn test_save_directory_normal_mode() {
        assert_eq!(save_directory(&settings()), PathBuf::from(r"C:\Clips"));
    }

    #[test]
    fn test_save_directory_project_mode() {
        let mut s = settings();
        s.project_mode_enabled = true;
        s.project_root_path = "/home/me/proj".to_string();
        assert_eq!(
            save_directory(&s),
            Path::new("/home/me/proj").join("screenshots")
        );
    }

    #[test]
    fn test_clipboard_path_normal_mode_converts() {
        assert_eq!(
            clipboard_path(&settings(), r"C:\Clips\clipboard_20250111_123456.png"),
            "/mnt/c/Clips/clipboard_20250111_123456.png"
        );
    }

    #[test]
    fn test_clipboard_path_project_mode_is_relative() {
        let mut s = settings();
        s.project_mode_enabled = true;
        s.project_root_path = r"C:\Proj".to_string();
        assert_eq!(
            clipboard_path(&s, r"C:\Proj\screenshots\clipboard_20250111_123456.png"),
            "screenshots/clipboard_20250111_123456.png"
        );
    }

    #[test]
    fn test_clipboard_path_project_mode_ignores_written_layout() {
        // Relative result depends on the screenshots dir, not on where the
        // file actually landed
        let mut s = settings();
        s.project_mode_enabled = true;
        s.project_root_path = "/repo".to_string();
        s.project_screenshots_dir = r"docs\img".to_string();
        assert_eq!(
            clipboard_path(&s, "/somewhere/else/shot.png"),
            "docs/img/shot.png"
        );
    }

    #[test]
    fn test_clipboard_path_without_separator() {
        let mut s = settings();
        s.project_mode_enabled = true;
        s.project_root_path = "/repo".to_string();
        assert_eq!(clipboard_path(&s, "shot.png"), "screenshots/shot.png");
    }

    #[test]
    fn test_enabled_with_empty_root_falls_back() {
        let mut s = settings();
        s.project_mode_enabled = true;
        s.project_root_path = String::new();

        assert!(!is_project_mode_active(&s));
        assert_eq!(save_directory(&s), PathBuf::from(r"C:\Clips"));
        assert_eq!(
            clipboard_path(&s, r"C:\Clips\shot.png"),
            "/mnt/c/Clips/shot.png"
        );
    }
}
