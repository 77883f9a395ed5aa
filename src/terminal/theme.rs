//! Color themes for the form

use log::warn;

/// Reset all attributes
pub const RESET: &str = "\x1b[0m";

/// ANSI styles used when drawing the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: &'static str,
    /// Window title line
    pub title: &'static str,
    /// Labels and section headings
    pub label: &'static str,
    /// Input area background
    pub input: &'static str,
    /// Button hints
    pub button: &'static str,
    /// Table header row
    pub header: &'static str,
    /// Selected table row
    pub selected: &'static str,
    /// Rows whose synthesis failed
    pub error: &'static str,
    /// Status bar
    pub status: &'static str,
    /// Alert and prompt boxes
    pub modal: &'static str,
}

impl Theme {
    /// Teal on dark gray, the default look
    pub fn dark_teal() -> Self {
        Self {
            name: "dark-teal",
            title: "\x1b[1;38;5;80m",
            label: "\x1b[38;5;116m",
            input: "\x1b[38;5;255;48;5;23m",
            button: "\x1b[30;48;5;73m",
            header: "\x1b[1;4;38;5;116m",
            selected: "\x1b[30;48;5;80m",
            error: "\x1b[38;5;210m",
            status: "\x1b[38;5;255;48;5;24m",
            modal: "\x1b[38;5;255;48;5;30m",
        }
    }

    /// Attributes only, for terminals without 256 colors
    pub fn plain() -> Self {
        Self {
            name: "plain",
            title: "\x1b[1m",
            label: "",
            input: "\x1b[4m",
            button: "\x1b[7m",
            header: "\x1b[1m",
            selected: "\x1b[7m",
            error: "\x1b[1m",
            status: "\x1b[7m",
            modal: "\x1b[7m",
        }
    }

    /// Look up a theme by its config name
    pub fn named(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dark-teal" | "darkteal" => Self::dark_teal(),
            "plain" => Self::plain(),
            other => {
                warn!("Unknown theme '{}', using dark-teal", other);
                Self::dark_teal()
            }
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark_teal()
    }
}
