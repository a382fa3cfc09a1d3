//! The time-of-day slider.

pub const SUN_ANGLE_MIN: f32 = 0.0;
pub const SUN_ANGLE_MAX: f32 = 100.0;

/// A bounded slider over `[0, 100]`: 0 is midnight, 50 the horizon, 100 noon.
///
/// Mutators return `Some(new_value)` only when the value actually changed,
/// so callers recompute the environment exactly once per change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SunSlider {
    value: f32,
    step: f32,
}

impl Default for SunSlider {
    fn default() -> Self {
        Self::new(50.0, 1.0)
    }
}

impl SunSlider {
    /// Non-finite initial values fall back to the horizon.
    #[must_use]
    pub fn new(initial: f32, step: f32) -> Self {
        let value = if initial.is_finite() { initial } else { 50.0 };
        Self {
            value: value.clamp(SUN_ANGLE_MIN, SUN_ANGLE_MAX),
            step: if step.is_finite() { step.abs() } else { 1.0 },
        }
    }

    #[must_use]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn set(&mut self, value: f32) -> Option<f32> {
        if !value.is_finite() {
            return None;
        }
        let clamped = value.clamp(SUN_ANGLE_MIN, SUN_ANGLE_MAX);
        if clamped == self.value {
            return None;
        }
        self.value = clamped;
        Some(clamped)
    }

    /// Move by `steps` increments (negative moves toward midnight).
    pub fn nudge(&mut self, steps: f32) -> Option<f32> {
        self.set(self.value + steps * self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_horizon() {
        let slider = SunSlider::default();
        assert_eq!(slider.value(), 50.0);
        assert_eq!(slider.step(), 1.0);
    }

    #[test]
    fn test_initial_value_clamped() {
        assert_eq!(SunSlider::new(150.0, 1.0).value(), 100.0);
        assert_eq!(SunSlider::new(-3.0, 1.0).value(), 0.0);
        assert_eq!(SunSlider::new(f32::NAN, 1.0).value(), 50.0);
    }

    #[test]
    fn test_set_reports_change_only() {
        let mut slider = SunSlider::default();
        assert_eq!(slider.set(75.0), Some(75.0));
        assert_eq!(slider.set(75.0), None);
        assert_eq!(slider.set(f32::INFINITY), None);
        assert_eq!(slider.value(), 75.0);
    }

    #[test]
    fn test_nudge_saturates_at_bounds() {
        let mut slider = SunSlider::new(99.5, 1.0);
        assert_eq!(slider.nudge(1.0), Some(100.0));
        assert_eq!(slider.nudge(1.0), None);

        let mut slider = SunSlider::new(0.0, 2.0);
        assert_eq!(slider.nudge(-1.0), None);
        assert_eq!(slider.nudge(1.0), Some(2.0));
    }
}
