//! Input handling and key bindings
//!
//! The input system uses a stack-based handler architecture: alerts and
//! prompts are pushed over the form and take every key until they close.

pub mod alert_handler;
pub mod buffer_handler;
pub mod default_handler;
pub mod handler;
pub mod keymap;
pub mod keys;

pub use alert_handler::AlertHandler;
pub use buffer_handler::BufferHandler;
pub use default_handler::DefaultKeyHandler;
pub use handler::{HandlerAction, HandlerStack, KeyHandler, Overlay};
pub use keymap::{create_default_keymap, Button, KeyAction, BATCH_BUTTONS, SELECTION_BUTTONS};
pub use keys::{decode_keys, Key};

use crate::state::App;
use log::error;

/// Route one key to the top modal handler, or to the form
///
/// Exit bindings always reach the application. Errors from handlers are
/// logged and shown as an alert; they never leave this function.
pub fn dispatch_key(app: &mut App, default_handler: &mut DefaultKeyHandler, key: Key) {
    if default_handler.action_for(&key) == Some(KeyAction::Exit) {
        app.exit();
        return;
    }

    let result = match app.handlers.pop() {
        Some(mut handler) => {
            let depth = app.handlers.len();
            match handler.process(&key, app) {
                Ok(HandlerAction::Remove) => Ok(()),
                Ok(HandlerAction::Handled) => {
                    app.handlers.restore(depth, handler);
                    Ok(())
                }
                Ok(HandlerAction::Passthrough) => {
                    app.handlers.restore(depth, handler);
                    default_handler.process_key(&key, app).map(|_| ())
                }
                Err(e) => {
                    app.handlers.restore(depth, handler);
                    Err(e)
                }
            }
        }
        None => default_handler.process_key(&key, app).map(|_| ()),
    };

    if let Err(e) = result {
        error!("Error handling key {:?}: {}", key, e);
        app.alert("Error", e.to_string());
    }
}
