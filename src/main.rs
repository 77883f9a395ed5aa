//! voicegen main entry point
//!
//! The main loop watches three sources:
//! 1. stdin (user keyboard input) - routed to the form
//! 2. background events (synthesis results, finished clips) - applied to state
//! 3. Signals (SIGWINCH for resize, SIGTERM/SIGHUP to quit)

use log::{debug, error, info};
use mio::{Events, Interest, Poll, Token};
use nix::libc;
use nix::sys::signal::{self, SigHandler, Signal};
use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::process;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use voicegen::input::{create_default_keymap, decode_keys, dispatch_key, DefaultKeyHandler};
use voicegen::platform::expose_bundled_ffmpeg;
use voicegen::state::config::Config;
use voicegen::state::{event_channel, App, AppContext};
use voicegen::terminal::{
    enter_screen, get_terminal_size, leave_screen, render, restore_termios, set_raw_mode,
};
use voicegen::{Result, VoicegenError};

/// Token for stdin in mio poll
const STDIN: Token = Token(0);

/// Longest wait for input before background events are checked again
const TICK: Duration = Duration::from_millis(100);

/// Global flag set by SIGWINCH handler
static RESIZE_PENDING: AtomicBool = AtomicBool::new(false);

/// Set by SIGTERM and SIGHUP
static QUIT_PENDING: AtomicBool = AtomicBool::new(false);

extern "C" fn handle_sigwinch(_: libc::c_int) {
    RESIZE_PENDING.store(true, Ordering::Relaxed);
}

extern "C" fn handle_quit(_: libc::c_int) {
    QUIT_PENDING.store(true, Ordering::Relaxed);
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let debug_mode = args.iter().any(|arg| arg == "--debug" || arg == "-d");

    if debug_mode {
        // Debug mode: the form owns the screen, so log to voicegen.log
        use std::fs::OpenOptions;
        match OpenOptions::new()
            .create(true)
            .append(true)
            .open("voicegen.log")
        {
            Ok(log_file) => {
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Debug)
                    .target(env_logger::Target::Pipe(Box::new(log_file)))
                    .init();
            }
            Err(e) => {
                eprintln!("Warning: Failed to open voicegen.log for debug logging: {}", e);
                env_logger::Builder::new()
                    .filter_level(log::LevelFilter::Warn)
                    .init();
            }
        }

        info!(
            "{} version {} starting (debug mode, logging to voicegen.log)",
            voicegen::APP_NAME,
            voicegen::VERSION
        );
    } else {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Error)
            .init();
    }

    if let Err(e) = run() {
        error!("Fatal error: {}", e);
        eprintln!("{}: {}", voicegen::APP_NAME, e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let stdin_fd = io::stdin().as_raw_fd();
    if unsafe { libc::isatty(stdin_fd) } == 0 {
        eprintln!("Error: voicegen requires an interactive terminal (stdin is not a TTY)");
        process::exit(1);
    }

    if let Some(dir) = expose_bundled_ffmpeg() {
        info!("Using bundled ffmpeg from {:?}", dir);
    }

    let config = Config::load()?;
    info!("Configuration loaded from {:?}", config.path());

    let (sender, receiver) = event_channel();
    let ctx = AppContext::with_defaults(config, sender)?;
    let mut app = App::new(ctx, receiver);

    let keymap = create_default_keymap();
    info!("Key handler initialized with {} bindings", keymap.len());
    let mut default_handler = DefaultKeyHandler::new(keymap);

    // Raw mode so Alt and Ctrl combinations reach the form
    let original_termios = set_raw_mode(stdin_fd)?;
    let _guard = TermiosGuard {
        fd: stdin_fd,
        termios: original_termios,
    };
    enter_screen()?;

    install_signal_handlers()?;

    let mut poll = Poll::new()?;
    let mut events = Events::with_capacity(16);
    let mut stdin_source = mio::unix::SourceFd(&stdin_fd);
    poll.registry()
        .register(&mut stdin_source, STDIN, Interest::READABLE)?;

    let (mut cols, mut rows) = get_terminal_size(stdin_fd)?;
    info!("Terminal size: {}x{}", cols, rows);
    let mut last_drawn = String::new();

    info!("Ready - entering event loop");

    loop {
        if QUIT_PENDING.swap(false, Ordering::Relaxed) {
            info!("Termination signal received");
            app.exit();
        }

        if RESIZE_PENDING.swap(false, Ordering::Relaxed) {
            (cols, rows) = get_terminal_size(stdin_fd)?;
            info!("Terminal resized to {}x{}", cols, rows);
            // Force a full redraw
            last_drawn.clear();
            write_screen("\x1b[2J")?;
        }

        app.pump_events();

        if app.should_quit() {
            info!("Exiting");
            return Ok(());
        }

        let frame = render(&app, cols, rows).to_ansi();
        if frame != last_drawn {
            write_screen(&frame)?;
            last_drawn = frame;
        }

        match poll.poll(&mut events, Some(TICK)) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                debug!("poll interrupted by signal");
                continue;
            }
            Err(e) => return Err(e.into()),
        }

        for event in events.iter() {
            if event.token() == STDIN && !handle_stdin(&mut app, &mut default_handler)? {
                info!("stdin closed");
                return Ok(());
            }
        }
    }
}

/// Read pending keys and route them to the form
///
/// Returns false once stdin reaches end of file.
fn handle_stdin(app: &mut App, default_handler: &mut DefaultKeyHandler) -> Result<bool> {
    let mut buf = [0u8; 4096];

    let n = match io::stdin().read(&mut buf) {
        Ok(n) => n,
        Err(e) if e.kind() == io::ErrorKind::Interrupted => return Ok(true),
        Err(e) => return Err(e.into()),
    };
    if n == 0 {
        return Ok(false);
    }

    for key in decode_keys(&buf[..n]) {
        dispatch_key(app, default_handler, key);
        if app.should_quit() {
            break;
        }
    }

    Ok(true)
}

fn write_screen(data: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(data.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn install_signal_handlers() -> Result<()> {
    let handlers: [(Signal, extern "C" fn(libc::c_int)); 3] = [
        (Signal::SIGWINCH, handle_sigwinch),
        (Signal::SIGTERM, handle_quit),
        (Signal::SIGHUP, handle_quit),
    ];

    for (sig, handler) in handlers {
        unsafe {
            signal::signal(sig, SigHandler::Handler(handler)).map_err(|e| {
                VoicegenError::Terminal(format!("Failed to set {} handler: {}", sig, e))
            })?;
        }
    }
    Ok(())
}

/// Leaves the form screen and restores the terminal on drop
struct TermiosGuard {
    fd: RawFd,
    termios: libc::termios,
}

impl Drop for TermiosGuard {
    fn drop(&mut self) {
        leave_screen();
        restore_termios(self.fd, &self.termios);
        debug!("Terminal attributes restored");
    }
}
