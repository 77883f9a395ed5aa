//! Terminal utilities

use crate::{Result, VoicegenError};
use nix::libc;
use std::io::{self, Write};
use std::os::unix::io::RawFd;

/// Switch to the alternate screen and hide the cursor
const ENTER_SCREEN: &str = "\x1b[?1049h\x1b[?25l\x1b[2J";

/// Show the cursor and return to the normal screen
const LEAVE_SCREEN: &str = "\x1b[0m\x1b[?25h\x1b[?1049l";

/// Get the terminal size for the given file descriptor
///
/// Falls back to 80x24 when the size cannot be queried.
pub fn get_terminal_size(fd: RawFd) -> Result<(u16, u16)> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };

    let result = unsafe { libc::ioctl(fd, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Ok((ws.ws_col, ws.ws_row))
    } else {
        Ok((80, 24))
    }
}

/// Set raw mode on a terminal file descriptor
///
/// The form reads every keypress itself, including Ctrl and Alt
/// combinations, so line editing and signals from the tty are disabled.
pub fn set_raw_mode(fd: RawFd) -> Result<libc::termios> {
    let mut original_termios: libc::termios = unsafe { std::mem::zeroed() };
    if unsafe { libc::tcgetattr(fd, &mut original_termios) } != 0 {
        return Err(VoicegenError::Terminal(format!(
            "tcgetattr failed: {}",
            io::Error::last_os_error()
        )));
    }

    let mut raw_termios = original_termios;

    unsafe {
        libc::cfmakeraw(&mut raw_termios);
        if libc::tcsetattr(fd, libc::TCSANOW, &raw_termios) != 0 {
            return Err(VoicegenError::Terminal(format!(
                "tcsetattr failed: {}",
                io::Error::last_os_error()
            )));
        }
    }

    Ok(original_termios)
}

/// Restore terminal attributes
pub fn restore_termios(fd: RawFd, termios: &libc::termios) {
    unsafe {
        libc::tcsetattr(fd, libc::TCSANOW, termios);
    }
}

/// Enter the full-screen drawing area
pub fn enter_screen() -> Result<()> {
    let mut stdout = io::stdout();
    stdout.write_all(ENTER_SCREEN.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Leave the full-screen drawing area
pub fn leave_screen() {
    let mut stdout = io::stdout();
    let _ = stdout.write_all(LEAVE_SCREEN.as_bytes());
    let _ = stdout.flush();
}
