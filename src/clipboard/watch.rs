use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};

/// Start watching the clipboard for image changes
/// Spawns detached background process: `wl-paste --type image/png --watch wslclip store-image`
/// Uses process_group(0) to create a new process group, making it independent of the parent
pub fn start_image_watcher() -> Result<()> {
    log::info!("Starting image clipboard watcher");

    // Get the path to the current executable
    let wslclip_path =
        std::env::current_exe().context("Failed to get current executable path")?;

    // Open /dev/null for stdout/stderr
    let dev_null = OpenOptions::new()
        .write(true)
        .open("/dev/null")
        .context("Failed to open /dev/null")?;

    // process_group(0) creates a new process group, detaching it from the parent's session
    Command::new("wl-paste")
        .arg("--type")
        .arg("image/png")
        .arg("--watch")
        .arg(&wslclip_path)
        .arg("store-image")
        .stdin(Stdio::null())
        .stdout(dev_null.try_clone()?)
        .stderr(dev_null)
        .process_group(0)
        .spawn()
        .context("Failed to spawn image clipboard watcher")?;

    log::info!("Image clipboard watcher started in background");
    Ok(())
}
