use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use wslclip::capture::{CaptureCoordinator, CaptureOutcome, ImageSource, SavedCapture};
use wslclip::clipboard::{self, BackendSource, ClipboardBackend, watch};
use wslclip::convert;
use wslclip::logging;
use wslclip::settings::{SettingsStore, ensure_base_dir};

#[derive(Parser)]
#[command(name = "wslclip")]
#[command(about = "Clipboard image to WSL path", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Watch the clipboard and capture new images (foreground)
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value = "1000")]
        interval_ms: u64,
    },

    /// Spawn a detached clipboard watcher (daemon mode)
    Listen,

    /// Capture one image from stdin (called by the watcher)
    StoreImage,

    /// Print the WSL translation of a Windows path
    Convert {
        /// Path to convert, e.g. C:\Users\me\shot.png
        path: String,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print current settings
    Show,

    /// Change settings and save them
    Set {
        /// Save directory for normal mode
        #[arg(long)]
        save_path: Option<String>,

        /// Enable or disable the debug log file
        #[arg(long)]
        logging: Option<bool>,

        /// Enable or disable project mode
        #[arg(long)]
        project_mode: Option<bool>,

        /// Project root directory
        #[arg(long)]
        project_root: Option<String>,

        /// Screenshots directory relative to the project root
        #[arg(long)]
        screenshots_dir: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Watch { interval_ms } => cmd_watch(interval_ms),
        Commands::Listen => cmd_listen(),
        Commands::StoreImage => cmd_store_image(),
        Commands::Convert { path } => cmd_convert(&path),
        Commands::Settings { action } => cmd_settings(action),
    }
}

/// Poll the clipboard and capture new images until interrupted
fn cmd_watch(interval_ms: u64) -> Result<()> {
    let base_dir = ensure_base_dir()?;
    let store = SettingsStore::new(&base_dir);
    let settings = store.load();

    logging::init(settings.enable_logging, &base_dir.join("logs"), "debug")?;
    log::info!("Watching clipboard, poll interval {}ms", interval_ms);

    let backend = clipboard::create_backend()?;
    let mut coordinator = CaptureCoordinator::new();

    loop {
        let outcome = {
            let mut source = BackendSource::new(backend.as_ref());
            coordinator.on_clipboard_update(&settings, &mut source)
        };
        report_outcome(outcome, backend.as_ref());

        thread::sleep(Duration::from_millis(interval_ms));
    }
}

/// Start the clipboard watcher in background
fn cmd_listen() -> Result<()> {
    env_logger::init();

    watch::start_image_watcher().context("Failed to start image watcher")?;

    println!("Clipboard image watcher started successfully.");
    println!("Use 'ps -ef | grep wl-paste' to see the running process.");
    println!("Use 'pkill -f \"wl-paste.*wslclip\"' to stop it.");

    Ok(())
}

/// Capture a single PNG image delivered on stdin
fn cmd_store_image() -> Result<()> {
    let base_dir = ensure_base_dir()?;
    let store = SettingsStore::new(&base_dir);
    let settings = store.load();

    logging::init(settings.enable_logging, &base_dir.join("logs"), "debug")?;

    let mut buffer = Vec::new();
    io::stdin()
        .read_to_end(&mut buffer)
        .context("Failed to read from stdin")?;

    if buffer.is_empty() {
        log::debug!("Empty clipboard content, skipping");
        return Ok(());
    }

    struct StdinSource(Vec<u8>);

    impl ImageSource for StdinSource {
        fn current_image(&mut self) -> Result<Option<image::DynamicImage>> {
            let image = image::load_from_memory(&self.0)
                .context("Failed to decode image from stdin")?;
            Ok(Some(image))
        }
    }

    let backend = clipboard::create_backend()?;
    let mut coordinator = CaptureCoordinator::new();
    let outcome = coordinator.on_clipboard_update(&settings, &mut StdinSource(buffer));
    report_outcome(outcome, backend.as_ref());

    Ok(())
}

/// Print the WSL translation of a path
fn cmd_convert(path: &str) -> Result<()> {
    env_logger::init();
    println!("{}", convert::to_wsl_path(path));
    Ok(())
}

/// Show or change persisted settings
fn cmd_settings(action: SettingsAction) -> Result<()> {
    env_logger::init();

    let base_dir = ensure_base_dir()?;
    let store = SettingsStore::new(&base_dir);

    match action {
        SettingsAction::Show => {
            let settings = store.load();
            println!("Settings file: {:?}", store.path());
            println!("  SavePath:              {}", settings.save_path);
            println!("  EnableLogging:         {}", settings.enable_logging);
            println!("  ProjectModeEnabled:    {}", settings.project_mode_enabled);
            println!("  ProjectRootPath:       {}", settings.project_root_path);
            println!(
                "  ProjectScreenshotsDir: {}",
                settings.project_screenshots_dir
            );
        }
        SettingsAction::Set {
            save_path,
            logging,
            project_mode,
            project_root,
            screenshots_dir,
        } => {
            // Explicit load/mutate/save cycle
            let mut settings = store.load();

            if let Some(save_path) = save_path {
                settings.save_path = save_path;
            }
            if let Some(logging) = logging {
                settings.enable_logging = logging;
            }
            if let Some(project_mode) = project_mode {
                settings.project_mode_enabled = project_mode;
            }
            if let Some(project_root) = project_root {
                settings.project_root_path = project_root;
            }
            if let Some(screenshots_dir) = screenshots_dir {
                settings.project_screenshots_dir = screenshots_dir;
            }

            store.save(&settings);
            println!("Settings saved to {:?}", store.path());
        }
    }

    Ok(())
}

/// Forward a capture outcome to the user: saved paths go back onto the
/// clipboard as text, failures become an error line
fn report_outcome(outcome: CaptureOutcome, backend: &dyn ClipboardBackend) {
    match outcome {
        CaptureOutcome::Saved(saved) => {
            if let Err(e) = backend.write_text(&saved.clipboard_path) {
                log::error!("Failed to copy path to clipboard: {:#}", e);
                eprintln!("Failed to copy path to clipboard: {:#}", e);
            }
            notify_saved(&saved);
        }
        CaptureOutcome::Failed(message) => {
            eprintln!("Failed to save image: {}", message);
        }
        CaptureOutcome::Busy | CaptureOutcome::NoImage | CaptureOutcome::Duplicate => {}
    }
}

fn notify_saved(saved: &SavedCapture) {
    println!("Saved to: {}", saved.file_path.display());
    if saved.project_mode {
        println!("Relative path copied to clipboard: {}", saved.clipboard_path);
    } else {
        println!("WSL path copied to clipboard: {}", saved.clipboard_path);
    }
}
