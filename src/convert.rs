//! Windows path to WSL path translation
//!
//! WSL mounts host drives under /mnt, so `C:\Users\me\shot.png` is reachable
//! as `/mnt/c/Users/me/shot.png` from inside the Linux namespace.

/// Convert a Windows path to its WSL equivalent
///
/// Backslashes become forward slashes. A leading `<letter>:` drive prefix is
/// rewritten to `/mnt/<letter>` with the drive letter lowercased. Inputs
/// without a drive prefix (relative paths, already-normalized paths) pass
/// through with only the separator change; all other bytes, including
/// non-ASCII characters and spaces, are preserved.
pub fn to_wsl_path(input: &str) -> String {
    let normalized = input.replace('\\', "/");

    let mut chars = normalized.chars();
    match (chars.next(), chars.next()) {
        (Some(drive), Some(':')) => {
            format!("/mnt/{}{}", drive.to_ascii_lowercase(), chars.as_str())
        }
        _ => normalized,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drive_path_converted() {
        assert_eq!(
            to_wsl_path(r"C:\Users\test\file.png"),
            "/mnt/c/Users/test/file.png"
        );
    }

    #[test]
    fn test_drive_letter_lowercased() {
        assert_eq!(to_wsl_path(r"D:\data"), "/mnt/d/data");
        assert_eq!(to_wsl_path(r"d:\data"), "/mnt/d/data");
    }

    #[test]
    fn test_forward_slash_drive_path() {
        assert_eq!(to_wsl_path("C:/Users/test"), "/mnt/c/Users/test");
    }

    #[test]
    fn test_relative_path_only_normalized() {
        assert_eq!(to_wsl_path(r"screenshots\img.png"), "screenshots/img.png");
        assert_eq!(to_wsl_path("already/normal.png"), "already/normal.png");
    }

    #[test]
    fn test_bare_drive() {
        assert_eq!(to_wsl_path("C:"), "/mnt/c");
        assert_eq!(to_wsl_path(r"C:\"), "/mnt/c/");
    }

    #[test]
    fn test_short_and_empty_inputs() {
        assert_eq!(to_wsl_path(""), "");
        assert_eq!(to_wsl_path("C"), "C");
        assert_eq!(to_wsl_path(r"\"), "/");
    }

    #[test]
    fn test_non_ascii_and_spaces_preserved() {
        assert_eq!(
            to_wsl_path(r"C:\ユーザー\my files\絵.png"),
            "/mnt/c/ユーザー/my files/絵.png"
        );
    }

    #[test]
    fn test_unc_like_path_passes_through() {
        // No drive prefix at position 1, so only separators change
        assert_eq!(to_wsl_path(r"\\server\share"), "//server/share");
    }
}
