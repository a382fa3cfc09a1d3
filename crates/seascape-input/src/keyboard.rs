//! Frame-coherent keyboard state.
//!
//! Physical key codes are tracked so movement keys sit in the same place on
//! every keyboard layout. Events arriving between two frames are folded into
//! the state; [`KeyboardState::end_frame`] drops the per-frame edges.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Platform-independent key event, used by tests and by [`KeyboardState::process_event`].
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    pub key: KeyCode,
    pub state: ElementState,
    /// OS auto-repeat; ignored.
    pub repeat: bool,
}

impl RawKeyEvent {
    pub fn pressed(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    pub fn released(key: KeyCode) -> Self {
        Self {
            key,
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Which keys are held, and which changed since the last [`end_frame`](Self::end_frame).
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    released_this_frame: HashSet<KeyCode>,
}

impl KeyboardState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a winit key event into the state. Keys without a known code are dropped.
    pub fn process_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(key) = event.physical_key {
            self.process_raw(RawKeyEvent {
                key,
                state: event.state,
                repeat: event.repeat,
            });
        }
    }

    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.held.insert(event.key) {
                    self.pressed_this_frame.insert(event.key);
                }
            }
            ElementState::Released => {
                if self.held.remove(&event.key) {
                    self.released_this_frame.insert(event.key);
                }
            }
        }
    }

    /// Release everything, e.g. when the window loses focus and release
    /// events will never arrive.
    pub fn release_all(&mut self) {
        self.released_this_frame.extend(self.held.drain());
    }

    #[must_use]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    #[must_use]
    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed_this_frame.contains(&key)
    }

    #[must_use]
    pub fn was_released(&self, key: KeyCode) -> bool {
        self.released_this_frame.contains(&key)
    }

    /// Number of keys currently held.
    #[must_use]
    pub fn held_count(&self) -> usize {
        self.held.len()
    }

    /// Clear per-frame edges. Call once after each frame.
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.released_this_frame.clear();
    }
}
