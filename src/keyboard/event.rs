//! Key signal and event types

use crate::coordinates::Coordinate;
use serde::{Deserialize, Serialize};

/// Raw press signal from the host's input source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// Opaque key code identifying the physical key
    pub code: String,
    /// Whether this signal is for the Shift (sustain) key itself
    pub is_shift: bool,
    /// Whether a Shift key is held while this key goes down
    pub shift_held: bool,
    /// Auto-repeat signal from holding the key down
    pub repeat: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    /// A press of the Shift key itself.
    pub fn shift(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            is_shift: true,
            ..Self::default()
        }
    }
}

/// Raw release signal from the host's input source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRelease {
    /// Opaque key code identifying the physical key
    pub code: String,
    /// Whether a Shift key is held while this key comes up
    pub shift_held: bool,
}

impl KeyRelease {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            shift_held: false,
        }
    }
}

/// Key event with coordinates attached when the device geometry could be
/// resolved with any confidence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinateKeyEvent {
    pub code: String,
    pub coordinates: Option<Coordinate>,
}

/// Callback invoked exactly once when a dispatched press ends.
pub type KeyUpCallback = Box<dyn FnOnce()>;

/// Listener invoked for every deduplicated press. Returns the callback to
/// run when that press's lifetime ends.
pub type KeyDownListener = Box<dyn FnMut(&CoordinateKeyEvent) -> KeyUpCallback>;

/// Token identifying a registered keydown listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);
