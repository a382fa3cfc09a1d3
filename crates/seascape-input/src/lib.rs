//! Input plumbing: keyboard and mouse frame state, action bindings, the six
//! movement flags, and the sun-angle slider.

pub mod action_map;
pub mod keyboard;
pub mod mouse;
pub mod slider;

pub use action_map::{
    Action, ActionResolver, ActionState, InputMap, KeyBinding, MovementKeys, UnknownAction, parse_key,
};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
pub use slider::{SUN_ANGLE_MAX, SUN_ANGLE_MIN, SunSlider};
