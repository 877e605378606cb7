//! Keyboard event handling and state management

mod event;
mod state;

pub use event::{
    CoordinateKeyEvent, KeyDownListener, KeyPress, KeyRelease, KeyUpCallback, ListenerId,
};
pub use state::Keyboard;
