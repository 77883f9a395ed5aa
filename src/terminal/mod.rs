//! Terminal setup, text editing and drawing

pub mod editor;
pub mod render;
pub mod theme;
pub mod util;

pub use editor::TextArea;
pub use render::{render, Frame};
pub use theme::Theme;
pub use util::{enter_screen, get_terminal_size, leave_screen, restore_termios, set_raw_mode};
