//! voicegen - terminal German voice generator
//!
//! Turns phrases typed into a terminal form into speech audio using a
//! remote text-to-speech service, plays the clips and saves them to disk.

pub mod audio;
pub mod clipboard;
pub mod error;
pub mod input;
pub mod platform;
pub mod speech;
pub mod state;
pub mod terminal;

pub use error::{Result, VoicegenError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "voicegen";

/// Window title shown at the top of the form
pub const APP_TITLE: &str = "German Voice Generator";
