//! Physical key coordinates
//!
//! Splits the keyboard into xy-planes along a z-coordinate, one plane per
//! contiguous region of keys: the Esc/function row, the alphanumeric block,
//! the Page Up/Down cluster and the numpad. Within a layer `x` is the column
//! (offset by the layer's origin so staggered rows line up physically) and
//! `y` is the row.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Location of a physical key on the input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    /// Column within the layer's row, relative to the layer origin
    pub x: i32,
    /// Row within the layer
    pub y: i32,
    /// Layer (contiguous region of keys)
    pub z: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

/// A grid cell in a layer table: a key code, or `None` where the physical
/// keyboard has no key at that slot.
pub type Cell = Option<&'static str>;

const ORIGIN_LAYER_0: i32 = 0;
/// Key codes for the row consisting of Esc and FN keys.
pub const CODES_LAYER_0: &[&[Cell]] = &[&[
    Some("Escape"),
    Some("F1"),
    Some("F2"),
    Some("F3"),
    Some("F4"),
    Some("F5"),
    Some("F6"),
    Some("F7"),
    Some("F8"),
    Some("F9"),
    Some("F10"),
    Some("F11"),
    Some("F12"),
]];

const ORIGIN_LAYER_1: i32 = -1;
/// Key codes for the rows containing the digits, qwerty, asdf and zxcv.
pub const CODES_LAYER_1: &[&[Cell]] = &[
    &[
        Some("Backquote"),
        Some("Digit1"),
        Some("Digit2"),
        Some("Digit3"),
        Some("Digit4"),
        Some("Digit5"),
        Some("Digit6"),
        Some("Digit7"),
        Some("Digit8"),
        Some("Digit9"),
        Some("Digit0"),
        Some("Minus"),
        Some("Equal"),
    ],
    &[
        None,
        Some("KeyQ"),
        Some("KeyW"),
        Some("KeyE"),
        Some("KeyR"),
        Some("KeyT"),
        Some("KeyY"),
        Some("KeyU"),
        Some("KeyI"),
        Some("KeyO"),
        Some("KeyP"),
        Some("BracketLeft"),
        Some("BracketRight"),
    ],
    &[
        None,
        Some("KeyA"),
        Some("KeyS"),
        Some("KeyD"),
        Some("KeyF"),
        Some("KeyG"),
        Some("KeyH"),
        Some("KeyJ"),
        Some("KeyK"),
        Some("KeyL"),
        Some("Semicolon"),
        Some("Quote"),
        Some("Backslash"),
    ],
    &[
        Some("IntlBackslash"),
        Some("KeyZ"),
        Some("KeyX"),
        Some("KeyC"),
        Some("KeyV"),
        Some("KeyB"),
        Some("KeyN"),
        Some("KeyM"),
        Some("Comma"),
        Some("Period"),
        Some("Slash"),
    ],
];

const ORIGIN_LAYER_2: i32 = 0;
/// Key codes for the cluster of keys with Page Up/Down.
pub const CODES_LAYER_2: &[&[Cell]] = &[
    &[Some("Insert"), Some("Home"), Some("PageUp")],
    &[Some("Delete"), Some("End"), Some("PageDown")],
];

const ORIGIN_LAYER_3: i32 = 0;
/// Key codes for the numpad.
pub const CODES_LAYER_3: &[&[Cell]] = &[
    &[
        Some("NumLock"),
        Some("NumpadDivide"),
        Some("NumpadMultiply"),
        Some("NumpadSubtract"),
    ],
    &[
        Some("Numpad7"),
        Some("Numpad8"),
        Some("Numpad9"),
        Some("NumpadAdd"),
    ],
    &[Some("Numpad4"), Some("Numpad5"), Some("Numpad6")],
    &[
        Some("Numpad1"),
        Some("Numpad2"),
        Some("Numpad3"),
        Some("NumpadEnter"),
    ],
    &[Some("Numpad0"), None, Some("NumpadDecimal")],
];

/// Bidirectional mapping between key codes and device geometry.
///
/// Built once from the layer tables and read-only afterwards.
pub struct CoordinateMap {
    coords_by_code: HashMap<&'static str, Coordinate>,
    code_by_coords: HashMap<Coordinate, &'static str>,
}

impl CoordinateMap {
    fn build() -> Self {
        let layers: [(i32, &[&[Cell]]); 4] = [
            (ORIGIN_LAYER_0, CODES_LAYER_0),
            (ORIGIN_LAYER_1, CODES_LAYER_1),
            (ORIGIN_LAYER_2, CODES_LAYER_2),
            (ORIGIN_LAYER_3, CODES_LAYER_3),
        ];

        let mut coords_by_code = HashMap::new();
        for (z, (origin, rows)) in layers.into_iter().enumerate() {
            for (y, row) in rows.iter().enumerate() {
                for (x, cell) in row.iter().enumerate() {
                    if let Some(code) = cell {
                        let xyz = Coordinate::new(origin + x as i32, y as i32, z as i32);
                        coords_by_code.insert(*code, xyz);
                    }
                }
            }
        }

        let code_by_coords = coords_by_code
            .iter()
            .map(|(&code, &xyz)| (xyz, code))
            .collect();

        Self {
            coords_by_code,
            code_by_coords,
        }
    }

    /// Look up the coordinates of a key code.
    pub fn coordinate_for_code(&self, code: &str) -> Option<Coordinate> {
        self.coords_by_code.get(code).copied()
    }

    /// Look up the key code at the given coordinates, or `None` if there is
    /// no physical key there.
    pub fn code_for_coordinate(&self, xyz: Coordinate) -> Option<&'static str> {
        self.code_by_coords.get(&xyz).copied()
    }

    /// Iterate over all mapped (code, coordinate) pairs.
    pub fn codes(&self) -> impl Iterator<Item = (&'static str, Coordinate)> + '_ {
        self.coords_by_code.iter().map(|(&code, &xyz)| (code, xyz))
    }
}

/// Static coordinate map for the standard layout tables.
pub static COORDINATES: LazyLock<CoordinateMap> = LazyLock::new(CoordinateMap::build);

/// Look up the coordinates of a key code in the static map.
pub fn coordinate_for_code(code: &str) -> Option<Coordinate> {
    COORDINATES.coordinate_for_code(code)
}

/// Look up the key code at the given coordinates in the static map.
pub fn code_for_coordinate(xyz: Coordinate) -> Option<&'static str> {
    COORDINATES.code_for_coordinate(xyz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letter_keys_sit_on_layer_1() {
        assert_eq!(coordinate_for_code("KeyA"), Some(Coordinate::new(0, 2, 1)));
        assert_eq!(coordinate_for_code("KeyQ"), Some(Coordinate::new(0, 1, 1)));
        assert_eq!(
            coordinate_for_code("Backquote"),
            Some(Coordinate::new(-1, 0, 1))
        );
        assert_eq!(
            coordinate_for_code("IntlBackslash"),
            Some(Coordinate::new(-1, 3, 1))
        );
    }

    #[test]
    fn every_layer_is_represented() {
        assert_eq!(coordinate_for_code("F5"), Some(Coordinate::new(5, 0, 0)));
        assert_eq!(coordinate_for_code("End"), Some(Coordinate::new(1, 1, 2)));
        assert_eq!(
            coordinate_for_code("Numpad5"),
            Some(Coordinate::new(1, 2, 3))
        );
    }

    #[test]
    fn unmapped_codes_have_no_coordinates() {
        assert_eq!(coordinate_for_code("Space"), None);
        assert_eq!(coordinate_for_code("ShiftLeft"), None);
        assert_eq!(coordinate_for_code(""), None);
    }

    #[test]
    fn holes_in_the_grid_have_no_code() {
        // The slot left of KeyQ and the slot right of Numpad0 are empty.
        assert_eq!(code_for_coordinate(Coordinate::new(-1, 1, 1)), None);
        assert_eq!(code_for_coordinate(Coordinate::new(1, 4, 3)), None);
        // Way outside the device.
        assert_eq!(code_for_coordinate(Coordinate::new(100, 0, 1)), None);
    }

    #[test]
    fn code_coordinate_roundtrip_is_a_bijection() {
        let mut seen = 0;
        for (code, xyz) in COORDINATES.codes() {
            assert_eq!(code_for_coordinate(xyz), Some(code));
            assert_eq!(coordinate_for_code(code), Some(xyz));
            seen += 1;
        }
        // 13 FN-row + 48 alphanumeric + 6 nav + 17 numpad keys.
        assert_eq!(seen, 84);
    }

    #[test]
    fn coordinate_serde_roundtrip() {
        let xyz = Coordinate::new(-1, 3, 1);
        let json = serde_json::to_string(&xyz).unwrap();
        let back: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, xyz);
    }
}
