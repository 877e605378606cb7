//! Piano-style note layout
//!
//! Assigns a linear sequence of notes onto the alphanumeric block so that
//! identical musical intervals land on identical physical finger shapes,
//! regardless of the tuning the row sequence was derived from.

use crate::coordinates::{code_for_coordinate, Coordinate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of assigning a note sequence onto layer 1 (the QWERTY/ASDF block).
#[derive(Debug, Clone, Default)]
pub struct PianoMap {
    /// Note index for each key code that received a note. Keys whose
    /// computed slot has no physical key are absent.
    pub index_by_code: HashMap<&'static str, usize>,
    /// Location of each note in input order, `None` where the computed slot
    /// has no physical key.
    pub coords_by_index: Vec<Option<Coordinate>>,
}

/// Layout options: per-boundary lag between adjacent rows.
///
/// `shifts[0]` is the boundary between the number and qwerty rows,
/// `shifts[1]` between qwerty and asdf, `shifts[2]` between asdf and zxcv.
/// A lag of 1 lets a row trail one column behind the row below it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PianoLayout {
    #[serde(default)]
    pub shifts: [i32; 3],
}

impl PianoLayout {
    pub const fn new(shifts: [i32; 3]) -> Self {
        Self { shifts }
    }

    /// Compute the layout for the given row sequence with these options.
    pub fn map(&self, ys: &[usize]) -> PianoMap {
        piano_map_with_shifts(ys, self.shifts)
    }
}

/// Convert a linear sequence of note rows into a piano-style layout with
/// zero lag between rows.
///
/// Each element of `ys` picks the row for one note: 0 = number row,
/// 1 = qwerty, 2 = asdf, 3 = zxcv.
pub fn piano_map(ys: &[usize]) -> PianoMap {
    piano_map_with_shifts(ys, [0, 0, 0])
}

/// Convert a linear sequence of note rows into a piano-style layout.
///
/// Columns within a row increase monotonically in note order; after every
/// placement the per-row column counters are resynchronized so adjacent
/// rows stay aligned within their configured lag.
///
/// # Panics
///
/// Panics if any element of `ys` is outside `0..=3`.
pub fn piano_map_with_shifts(ys: &[usize], shifts: [i32; 3]) -> PianoMap {
    // The zxcv row starts one column behind because Backquote isn't
    // connected to KeyQ.
    let mut next_xs: [i32; 4] = [0, 0, 0, -1];
    let mut coords = Vec::with_capacity(ys.len());
    for &y in ys {
        let x = next_xs[y];
        coords.push(Coordinate::new(x, y as i32, 1));
        next_xs[y] += 1;

        // Sync everything vertically.
        // A is before Z, S is after Z.
        next_xs[2] = next_xs[2].max(next_xs[3] - shifts[2]);
        // Q is before A, W is after A.
        next_xs[1] = next_xs[1].max(next_xs[2] - shifts[1]);
        // 1 is before Q, 2 is after Q.
        next_xs[0] = next_xs[0].max(next_xs[1] - shifts[0]);
        // Sync the other way too, but with less force.
        next_xs[1] = next_xs[1].max(next_xs[0] + shifts[0] - 1);
        next_xs[2] = next_xs[2].max(next_xs[1] + shifts[1] - 1);
        next_xs[3] = next_xs[3].max(next_xs[2] + shifts[1] - 1);
    }

    let mut index_by_code = HashMap::new();
    let mut coords_by_index = Vec::with_capacity(coords.len());
    for (i, xyz) in coords.into_iter().enumerate() {
        match code_for_coordinate(xyz) {
            Some(code) => {
                index_by_code.insert(code, i);
                coords_by_index.push(Some(xyz));
            }
            None => coords_by_index.push(None),
        }
    }
    PianoMap {
        index_by_code,
        coords_by_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_within_a_row_increase_monotonically() {
        let ys = [1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 0, 1, 3, 2, 3, 2, 3, 3];
        let map = piano_map(&ys);

        let mut last_x: [Option<i32>; 4] = [None; 4];
        for (i, &y) in ys.iter().enumerate() {
            // Holes still advanced the counter, so read the computed slot
            // back from the raw placement when present.
            if let Some(xyz) = map.coords_by_index[i] {
                assert_eq!(xyz.y, y as i32);
                if let Some(prev) = last_x[y] {
                    assert!(xyz.x > prev, "row {y} went backwards at note {i}");
                }
                last_x[y] = Some(xyz.x);
            }
        }
    }

    #[test]
    fn notes_keep_their_input_positions() {
        let ys = [1, 1, 1];
        let map = piano_map(&ys);
        assert_eq!(map.coords_by_index.len(), 3);
        assert_eq!(map.index_by_code.get("KeyQ"), Some(&0));
        assert_eq!(map.index_by_code.get("KeyW"), Some(&1));
        assert_eq!(map.index_by_code.get("KeyE"), Some(&2));
    }

    #[test]
    fn notes_past_the_device_edge_become_holes() {
        // 13 notes on the qwerty row, which has only 12 keys.
        let ys = [1usize; 13];
        let map = piano_map(&ys);
        assert!(map.coords_by_index[11].is_some());
        assert_eq!(map.coords_by_index[12], None);
        assert_eq!(map.index_by_code.len(), 12);
    }

    #[test]
    fn zxcv_row_starts_one_column_behind() {
        let map = piano_map(&[3]);
        assert_eq!(map.coords_by_index[0], Some(Coordinate::new(-1, 3, 1)));
        assert_eq!(map.index_by_code.get("IntlBackslash"), Some(&0));
    }

    #[test]
    fn empty_sequence_yields_empty_layout() {
        let map = piano_map(&[]);
        assert!(map.index_by_code.is_empty());
        assert!(map.coords_by_index.is_empty());
    }

    #[test]
    fn zxcv_upward_sync_follows_the_qwerty_asdf_lag() {
        // The bottom row's weak upward correction is driven by the
        // qwerty/asdf lag, not the asdf/zxcv one: with shifts [0, 1, 0] a
        // note dropping from the asdf row to the zxcv row is pushed one
        // column ahead.
        let map = piano_map_with_shifts(&[2, 3], [0, 1, 0]);
        assert_eq!(map.coords_by_index[0], Some(Coordinate::new(0, 2, 1)));
        assert_eq!(map.coords_by_index[1], Some(Coordinate::new(1, 3, 1)));
        assert_eq!(map.index_by_code.get("KeyA"), Some(&0));
        assert_eq!(map.index_by_code.get("KeyX"), Some(&1));
    }

    #[test]
    fn layout_options_apply_their_shifts() {
        let ys = [2, 1, 2, 1];
        let with_options = PianoLayout::new([0, 1, 0]).map(&ys);
        let explicit = piano_map_with_shifts(&ys, [0, 1, 0]);
        assert_eq!(with_options.coords_by_index, explicit.coords_by_index);
    }

    #[test]
    fn layout_options_toml_roundtrip() {
        let options = PianoLayout::new([1, 0, 0]);
        let toml_str = toml::to_string(&options).unwrap();
        let back: PianoLayout = toml::from_str(&toml_str).unwrap();
        assert_eq!(back, options);

        // Omitted shifts deserialize to zero lag.
        let defaulted: PianoLayout = toml::from_str("").unwrap();
        assert_eq!(defaulted, PianoLayout::default());
    }
}
