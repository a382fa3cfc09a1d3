//! Viewer actions and their key bindings.
//!
//! [`InputMap`] says which physical keys trigger which [`Action`]s.
//! [`ActionResolver`] recomputes an [`ActionState`] from the keyboard once per
//! frame, and [`MovementKeys`] is the six-flag view the camera controller reads.

use crate::keyboard::KeyboardState;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use winit::keyboard::KeyCode;

/// Look up a key by its `KeyCode` debug name. Single letters and digits are
/// accepted as shorthand (`"w"` for `KeyW`, `"3"` for `Digit3`).
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let name = name.trim();
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return match c.to_ascii_uppercase() {
            'A' => Some(KeyCode::KeyA),
            'B' => Some(KeyCode::KeyB),
            'C' => Some(KeyCode::KeyC),
            'D' => Some(KeyCode::KeyD),
            'E' => Some(KeyCode::KeyE),
            'F' => Some(KeyCode::KeyF),
            'G' => Some(KeyCode::KeyG),
            'H' => Some(KeyCode::KeyH),
            'I' => Some(KeyCode::KeyI),
            'J' => Some(KeyCode::KeyJ),
            'K' => Some(KeyCode::KeyK),
            'L' => Some(KeyCode::KeyL),
            'M' => Some(KeyCode::KeyM),
            'N' => Some(KeyCode::KeyN),
            'O' => Some(KeyCode::KeyO),
            'P' => Some(KeyCode::KeyP),
            'Q' => Some(KeyCode::KeyQ),
            'R' => Some(KeyCode::KeyR),
            'S' => Some(KeyCode::KeyS),
            'T' => Some(KeyCode::KeyT),
            'U' => Some(KeyCode::KeyU),
            'V' => Some(KeyCode::KeyV),
            'W' => Some(KeyCode::KeyW),
            'X' => Some(KeyCode::KeyX),
            'Y' => Some(KeyCode::KeyY),
            'Z' => Some(KeyCode::KeyZ),
            '0' => Some(KeyCode::Digit0),
            '1' => Some(KeyCode::Digit1),
            '2' => Some(KeyCode::Digit2),
            '3' => Some(KeyCode::Digit3),
            '4' => Some(KeyCode::Digit4),
            '5' => Some(KeyCode::Digit5),
            '6' => Some(KeyCode::Digit6),
            '7' => Some(KeyCode::Digit7),
            '8' => Some(KeyCode::Digit8),
            '9' => Some(KeyCode::Digit9),
            '[' => Some(KeyCode::BracketLeft),
            ']' => Some(KeyCode::BracketRight),
            '-' => Some(KeyCode::Minus),
            '=' => Some(KeyCode::Equal),
            _ => None,
        };
    }

    if let Some(letter) = name.strip_prefix("Key") {
        return parse_key(letter).filter(|_| letter.chars().all(|c| c.is_ascii_alphabetic()));
    }
    if let Some(digit) = name.strip_prefix("Digit") {
        return parse_key(digit).filter(|_| digit.chars().all(|c| c.is_ascii_digit()));
    }

    Some(match name {
        "Space" => KeyCode::Space,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        "Tab" => KeyCode::Tab,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Backspace" => KeyCode::Backspace,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "BracketLeft" => KeyCode::BracketLeft,
        "BracketRight" => KeyCode::BracketRight,
        "Minus" => KeyCode::Minus,
        "Equal" => KeyCode::Equal,
        "Comma" => KeyCode::Comma,
        "Period" => KeyCode::Period,
        "NumpadAdd" => KeyCode::NumpadAdd,
        "NumpadSubtract" => KeyCode::NumpadSubtract,
        _ => return None,
    })
}

/// Everything the viewer can be told to do from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveForward,
    MoveBack,
    StrafeLeft,
    StrafeRight,
    MoveDown,
    MoveUp,
    /// Slide the sun toward midnight.
    SunEarlier,
    /// Slide the sun toward noon.
    SunLater,
}

const ACTION_COUNT: usize = 8;

impl Action {
    pub const ALL: [Action; ACTION_COUNT] = [
        Action::MoveForward,
        Action::MoveBack,
        Action::StrafeLeft,
        Action::StrafeRight,
        Action::MoveDown,
        Action::MoveUp,
        Action::SunEarlier,
        Action::SunLater,
    ];

    fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Action::MoveForward => "MoveForward",
            Action::MoveBack => "MoveBack",
            Action::StrafeLeft => "StrafeLeft",
            Action::StrafeRight => "StrafeRight",
            Action::MoveDown => "MoveDown",
            Action::MoveUp => "MoveUp",
            Action::SunEarlier => "SunEarlier",
            Action::SunLater => "SunLater",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a config string names no known action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAction(pub String);

impl fmt::Display for UnknownAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown action: {}", self.0)
    }
}

impl std::error::Error for UnknownAction {}

impl FromStr for Action {
    type Err = UnknownAction;

    /// Case-insensitive; underscores are ignored so `move_up` matches `MoveUp`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Action::ALL
            .into_iter()
            .find(|action| action.name().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownAction(s.to_string()))
    }
}

/// One physical key bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding(pub KeyCode);

/// Action to key table. Any bound key activates its action.
#[derive(Debug, Clone)]
pub struct InputMap {
    pub bindings: HashMap<Action, Vec<KeyBinding>>,
}

impl Default for InputMap {
    /// W/S forward and back, A/D strafe, Q down, E up; `[`/`]` and
    /// PageDown/PageUp move the sun.
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut bind = |action: Action, keys: &[KeyCode]| {
            bindings.insert(action, keys.iter().copied().map(KeyBinding).collect());
        };
        bind(Action::MoveForward, &[KeyCode::KeyW]);
        bind(Action::MoveBack, &[KeyCode::KeyS]);
        bind(Action::StrafeLeft, &[KeyCode::KeyA]);
        bind(Action::StrafeRight, &[KeyCode::KeyD]);
        bind(Action::MoveDown, &[KeyCode::KeyQ]);
        bind(Action::MoveUp, &[KeyCode::KeyE]);
        bind(Action::SunEarlier, &[KeyCode::BracketLeft, KeyCode::PageDown]);
        bind(Action::SunLater, &[KeyCode::BracketRight, KeyCode::PageUp]);
        Self { bindings }
    }
}

impl InputMap {
    /// A map with no bindings at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn set_keys(&mut self, action: Action, keys: &[KeyCode]) {
        self.bindings
            .insert(action, keys.iter().copied().map(KeyBinding).collect());
    }

    #[must_use]
    pub fn keys(&self, action: Action) -> &[KeyBinding] {
        self.bindings.get(&action).map_or(&[], Vec::as_slice)
    }

    /// Apply `action name -> key name` overrides from the config file.
    ///
    /// Each valid entry replaces the action's bindings with the single named
    /// key. Invalid entries are logged and skipped. Returns how many applied.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> usize {
        let mut applied = 0;
        for (action_name, key_name) in overrides {
            let action = match action_name.parse::<Action>() {
                Ok(action) => action,
                Err(err) => {
                    tracing::warn!("Ignoring keybinding override: {err}");
                    continue;
                }
            };
            let Some(key) = parse_key(key_name) else {
                tracing::warn!("Ignoring keybinding override for {action}: unknown key {key_name:?}");
                continue;
            };
            tracing::debug!("Binding {action} to {key:?}");
            self.set_keys(action, &[key]);
            applied += 1;
        }
        applied
    }
}

/// Per-frame action activity computed by [`ActionResolver`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActionState {
    active: [bool; ACTION_COUNT],
}

impl ActionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_active(&self, action: Action) -> bool {
        self.active[action.index()]
    }

    /// `+1` while only SunLater is held, `-1` while only SunEarlier is held.
    #[must_use]
    pub fn sun_direction(&self) -> f32 {
        let later = f32::from(u8::from(self.is_active(Action::SunLater)));
        let earlier = f32::from(u8::from(self.is_active(Action::SunEarlier)));
        later - earlier
    }

    /// The six movement flags for the camera controller.
    #[must_use]
    pub fn movement(&self) -> MovementKeys {
        MovementKeys {
            forward: self.is_active(Action::MoveForward),
            back: self.is_active(Action::MoveBack),
            left: self.is_active(Action::StrafeLeft),
            right: self.is_active(Action::StrafeRight),
            down: self.is_active(Action::MoveDown),
            up: self.is_active(Action::MoveUp),
        }
    }
}

pub struct ActionResolver;

impl ActionResolver {
    /// Recompute `state` from the keyboard. Call once per frame after input
    /// events have been folded in.
    pub fn resolve(input_map: &InputMap, keyboard: &KeyboardState, state: &mut ActionState) {
        for action in Action::ALL {
            state.active[action.index()] = input_map
                .keys(action)
                .iter()
                .any(|binding| keyboard.is_held(binding.0));
        }
    }
}

/// Which movement keys are held this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovementKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub up: bool,
}
