//! Per-frame input batching for terminal environments.
//!
//! Key events are mapped as they arrive and queued until the frame loop drains
//! them. Terminals that never emit key-release events would leave a soft drop
//! held forever, so until a release has been seen a held soft drop is released
//! automatically once its key stops pressing/repeating for a while.

use std::time::Instant;

use arrayvec::ArrayVec;
use crossterm::event::{KeyEvent, KeyEventKind};
use log::{debug, trace};

use crate::map::{is_soft_drop_key, map_key_event};
use crate::types::{InputEvent, SOFT_DROP_RELEASE_TIMEOUT_MS};

/// Events queued per frame; extra events in the same frame are dropped.
pub const FRAME_INPUT_CAPACITY: usize = 32;

/// Input events collected during one frame, in arrival order.
pub type FrameInput = ArrayVec<InputEvent, FRAME_INPUT_CAPACITY>;

/// Collects mapped key events between frames.
#[derive(Debug, Clone)]
pub struct InputHandler {
    pending: FrameInput,
    soft_drop_held: bool,
    last_soft_drop_key: Instant,
    /// The terminal reports releases, so no auto-release is needed.
    releases_reported: bool,
    release_timeout_ms: u32,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            pending: FrameInput::new(),
            soft_drop_held: false,
            last_soft_drop_key: Instant::now(),
            releases_reported: false,
            release_timeout_ms: SOFT_DROP_RELEASE_TIMEOUT_MS,
        }
    }

    pub fn with_release_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.release_timeout_ms = timeout_ms;
        self
    }

    pub fn release_timeout_ms(&self) -> u32 {
        self.release_timeout_ms
    }

    pub fn soft_drop_held(&self) -> bool {
        self.soft_drop_held
    }

    /// Map and queue a key event.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release && !self.releases_reported {
            debug!("terminal reports key releases; soft drop auto-release off");
            self.releases_reported = true;
        }

        if is_soft_drop_key(key.code) && key.kind != KeyEventKind::Release {
            self.last_soft_drop_key = Instant::now();
        }

        let Some(event) = map_key_event(key) else {
            return;
        };

        match event {
            InputEvent::SoftDropOn if self.soft_drop_held => {}
            InputEvent::SoftDropOff if !self.soft_drop_held => {}
            InputEvent::SoftDropOn => self.soft_drop_held = self.push(event),
            InputEvent::SoftDropOff => self.soft_drop_held = !self.push(event),
            _ => {
                self.push(event);
            }
        }
    }

    /// Queue an event; returns false if it was dropped.
    ///
    /// The last slot is kept for `SoftDropOff`. A held soft drop always has
    /// its On event queued below that slot, so its release can never be lost.
    fn push(&mut self, event: InputEvent) -> bool {
        let limit = match event {
            InputEvent::SoftDropOff => FRAME_INPUT_CAPACITY,
            _ => FRAME_INPUT_CAPACITY - 1,
        };
        if self.pending.len() >= limit {
            trace!("frame input full, dropped {}", event.as_str());
            return false;
        }
        self.pending.push(event);
        true
    }

    /// Take this frame's events, in arrival order.
    pub fn drain(&mut self) -> FrameInput {
        if self.soft_drop_held && !self.releases_reported {
            let idle_ms = self.last_soft_drop_key.elapsed().as_millis();
            if idle_ms > self.release_timeout_ms as u128 {
                self.soft_drop_held = !self.push(InputEvent::SoftDropOff);
            }
        }

        std::mem::take(&mut self.pending)
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
