//! Frame-coherent mouse state feeding the orbit controls.
//!
//! Cursor motion, button state, and wheel scroll accumulate between frames;
//! [`MouseState::end_frame`] resets the per-frame accumulators.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels per wheel "line" when the platform reports pixel deltas.
const PIXELS_PER_LINE: f32 = 100.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Buttons {
    left: bool,
    right: bool,
    middle: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    scroll: f32,
    buttons: Buttons,
    has_position: bool,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle `WindowEvent::CursorMoved`. The first sample only seeds the position.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if self.has_position {
            self.delta += new_pos - self.position;
        }
        self.position = new_pos;
        self.has_position = true;
    }

    /// Handle `WindowEvent::CursorLeft`; the next entry must not produce a jump.
    pub fn on_cursor_left(&mut self) {
        self.has_position = false;
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let pressed = state == ElementState::Pressed;
        match button {
            MouseButton::Left => self.buttons.left = pressed,
            MouseButton::Right => self.buttons.right = pressed,
            MouseButton::Middle => self.buttons.middle = pressed,
            _ => {}
        }
    }

    /// Handle `WindowEvent::MouseWheel`. Positive values scroll away from the user.
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
        };
    }

    /// Release all buttons, e.g. on focus loss.
    pub fn release_all(&mut self) {
        self.buttons = Buttons::default();
    }

    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor motion since the last [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Wheel lines since the last [`end_frame`](Self::end_frame).
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        match button {
            MouseButton::Left => self.buttons.left,
            MouseButton::Right => self.buttons.right,
            MouseButton::Middle => self.buttons.middle,
            _ => false,
        }
    }

    pub fn end_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.scroll = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_first_move_has_no_delta() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(300.0, 200.0);
        assert_eq!(mouse.delta(), Vec2::ZERO);
        assert_eq!(mouse.position(), Vec2::new(300.0, 200.0));
    }

    #[test]
    fn test_delta_accumulates_until_end_frame() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_cursor_moved(10.0, 5.0);
        mouse.on_cursor_moved(15.0, -5.0);
        assert_eq!(mouse.delta(), Vec2::new(15.0, -5.0));
        mouse.end_frame();
        assert_eq!(mouse.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_reentry_does_not_jump() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_cursor_left();
        mouse.on_cursor_moved(500.0, 500.0);
        assert_eq!(mouse.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_buttons() {
        let mut mouse = MouseState::new();
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        assert!(mouse.is_button_pressed(MouseButton::Left));
        assert!(mouse.is_button_pressed(MouseButton::Right));
        mouse.on_button(MouseButton::Left, ElementState::Released);
        assert!(!mouse.is_button_pressed(MouseButton::Left));
        mouse.release_all();
        assert!(!mouse.is_button_pressed(MouseButton::Right));
        assert!(!mouse.is_button_pressed(MouseButton::Back));
    }

    #[test]
    fn test_scroll_line_and_pixel() {
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        mouse.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, 50.0)));
        assert!((mouse.scroll() - 1.5).abs() < 1e-6);
        mouse.end_frame();
        assert_eq!(mouse.scroll(), 0.0);
    }
}
