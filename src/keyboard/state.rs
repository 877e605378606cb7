//! Sustain-aware keyboard state machine
//!
//! Consumes raw press/release signals, filters out repeats and modifier
//! chords, attaches device coordinates and dispatches to registered
//! listeners. The Shift keys control sustain: releasing a key while Shift
//! is held keeps it sounding until it is pressed again or the whole
//! keyboard is deactivated.

use super::event::{
    CoordinateKeyEvent, KeyDownListener, KeyPress, KeyRelease, KeyUpCallback, ListenerId,
};
use crate::coordinates::{self, Coordinate};
use log::{debug, warn};
use std::collections::{HashMap, HashSet};

/// Keyboard event state machine.
///
/// Tracks three sets of key codes: `active` (pressed and dispatched),
/// `pending` (sustain resolution deferred because Shift came down after the
/// key) and `sticky` (sustained past physical release). Every dispatched
/// press queues one release callback per listener; the queue is drained in
/// registration order when the press's lifetime ends.
pub struct Keyboard {
    listeners: Vec<(ListenerId, KeyDownListener)>,
    next_listener_id: u64,
    keyup_callbacks: HashMap<String, Vec<KeyUpCallback>>,
    active: HashSet<String>,
    pending: HashSet<String>,
    sticky: HashSet<String>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_listener_id: 0,
            keyup_callbacks: HashMap::new(),
            active: HashSet::new(),
            pending: HashSet::new(),
            sticky: HashSet::new(),
        }
    }

    /// Register a listener for deduplicated, coordinate-annotated presses.
    ///
    /// The listener returns the callback to invoke when that press ends.
    pub fn add_keydown_listener(
        &mut self,
        listener: impl FnMut(&CoordinateKeyEvent) -> KeyUpCallback + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregister a listener by the token returned at registration.
    pub fn remove_keydown_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|(lid, _)| *lid != id);
    }

    /// Whether the code is currently considered pressed.
    pub fn is_active(&self, code: &str) -> bool {
        self.active.contains(code)
    }

    /// Whether the code is sustained past its physical release.
    pub fn is_sustained(&self, code: &str) -> bool {
        self.sticky.contains(code)
    }

    fn fire_keydown(&mut self, code: &str, coordinates: Option<Coordinate>) {
        let event = CoordinateKeyEvent {
            code: code.to_string(),
            coordinates,
        };
        // Callbacks left over from a prior press mean the upstream source
        // dropped a release. Flush them now so the old note doesn't leak.
        let mut callbacks = self.keyup_callbacks.remove(code).unwrap_or_default();
        for callback in callbacks.drain(..) {
            warn!("Unresolved keyup detected for {code}");
            callback();
        }
        debug!(
            "Firing keydown listeners with {} @ {:?}",
            event.code, event.coordinates
        );
        for (_, listener) in &mut self.listeners {
            callbacks.push(listener(&event));
        }
        self.keyup_callbacks.insert(code.to_string(), callbacks);
    }

    fn fire_keyup(&mut self, code: &str) {
        debug!("Firing keyup listeners with {code}");
        for callback in self.keyup_callbacks.remove(code).unwrap_or_default() {
            callback();
        }
    }

    /// Feed a raw press signal into the state machine.
    pub fn key_down(&mut self, event: &KeyPress) {
        debug!("{} keydown received", event.code);
        if event.ctrl || event.alt || event.meta || event.repeat {
            debug!("{} keydown filtered out", event.code);
            return;
        }
        // The pending state isn't strictly necessary as repeats are filtered
        // out, but it's kept in case the repeat flag isn't 100% reliable.
        if event.is_shift {
            for code in &self.active {
                debug!("Adding {code} to pending state due to a Shift press");
            }
            self.pending.extend(self.active.iter().cloned());
            return;
        }

        if self.sticky.contains(&event.code) {
            debug!("Sticky toggle for {}", event.code);
            self.active.remove(&event.code);
            self.sticky.remove(&event.code);
            self.pending.remove(&event.code);
            self.fire_keyup(&event.code);
            return;
        }

        if self.pending.contains(&event.code) {
            debug!("{} is pending", event.code);
            return;
        }

        if self.active.contains(&event.code) {
            debug!("{} is already active", event.code);
            return;
        }

        if let Some(xyz) = coordinates::coordinate_for_code(&event.code) {
            debug!("Adding {} to active state", event.code);
            self.active.insert(event.code.clone());
            if event.shift_held {
                debug!(
                    "Adding {} to pending state due to being pressed with Shift",
                    event.code
                );
                self.pending.insert(event.code.clone());
            }
            self.fire_keydown(&event.code, Some(xyz));
        }
    }

    /// Feed a raw release signal into the state machine.
    pub fn key_up(&mut self, event: &KeyRelease) {
        debug!("{} keyup received", event.code);
        if event.shift_held && self.active.contains(&event.code) {
            debug!(
                "Sticking {} due to being released while Shift is pressed",
                event.code
            );
            self.sticky.insert(event.code.clone());
        }
        if self.pending.remove(&event.code) {
            debug!("Promoting {} from pending to sticky", event.code);
            self.sticky.insert(event.code.clone());
        }
        if self.sticky.contains(&event.code) {
            debug!("Not firing keyup due to {} being sticky", event.code);
            return;
        }

        if self.active.remove(&event.code) {
            self.fire_keyup(&event.code);
            return;
        }
        debug!("{} keyup fell through", event.code);
    }

    /// Release every held and sustained key.
    pub fn deactivate(&mut self) {
        debug!("Releasing all sustained and active keys");
        self.pending.clear();
        self.sticky.clear();
        for code in std::mem::take(&mut self.active) {
            self.fire_keyup(&code);
        }
    }
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}
