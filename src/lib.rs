//! wslclip - clipboard image to WSL path
//!
//! Watches the clipboard for newly copied images, saves each new one as a
//! PNG exactly once, and copies back a path string usable from WSL or, in
//! project mode, relative to a project root.

pub mod capture;
pub mod clipboard;
pub mod convert;
pub mod fingerprint;
pub mod logging;
pub mod resolve;
pub mod settings;
