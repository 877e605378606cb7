//! isoqwerty - isomorphic QWERTY mapping for virtual instruments
//!
//! Turns raw key press/release signals into a deduplicated,
//! coordinate-annotated stream of events with Shift-controlled sustain, and
//! places arbitrary note sequences onto the keyboard's column/row geometry
//! so any tuning plays with consistent finger shapes.

pub mod coordinates;
pub mod keyboard;
pub mod piano;

pub use coordinates::{code_for_coordinate, coordinate_for_code, Coordinate, CoordinateMap};
pub use keyboard::{CoordinateKeyEvent, KeyPress, KeyRelease, Keyboard};
pub use piano::{piano_map, piano_map_with_shifts, PianoLayout, PianoMap};
