//! Sun-angle input: the slider, the environment model, and the scene update
//! they trigger together.

use seascape_environment::{EnvironmentModel, EnvironmentParameters};
use seascape_input::SunSlider;
use seascape_scene::SceneContext;
use tracing::debug;

#[derive(Debug, Default)]
pub struct SunControl {
    slider: SunSlider,
    model: EnvironmentModel,
}

impl SunControl {
    pub fn new(slider: SunSlider) -> Self {
        Self {
            slider,
            model: EnvironmentModel::new(),
        }
    }

    pub fn value(&self) -> f32 {
        self.slider.value()
    }

    pub fn model(&self) -> &EnvironmentModel {
        &self.model
    }

    /// Recompute the environment for the current slider value and write it
    /// into `scene` unconditionally.
    pub fn apply(&mut self, scene: &mut SceneContext) -> EnvironmentParameters {
        let params = self.model.update(self.slider.value());
        scene.apply_environment(&params);
        params
    }

    /// Move the slider to `value`. The scene is only touched when the value
    /// actually changes.
    pub fn set(&mut self, value: f32, scene: &mut SceneContext) -> Option<EnvironmentParameters> {
        self.slider.set(value)?;
        Some(self.apply_changed(scene))
    }

    /// Move the slider by `steps` slider steps.
    pub fn nudge(&mut self, steps: f32, scene: &mut SceneContext) -> Option<EnvironmentParameters> {
        self.slider.nudge(steps)?;
        Some(self.apply_changed(scene))
    }

    fn apply_changed(&mut self, scene: &mut SceneContext) -> EnvironmentParameters {
        let params = self.apply(scene);
        debug!(
            "Sun angle {:.1}: brightness {:.3}, sunset {:.3}, stars {:.3}",
            self.slider.value(),
            params.sky_brightness,
            params.sunset_progress,
            params.starfield_opacity
        );
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seascape_environment::compute_environment;
    use seascape_scene::{Capabilities, SceneSettings, WaterPlane};

    fn scene() -> SceneContext {
        let mut settings = SceneSettings::default();
        settings.starfield.count = 8;
        SceneContext::new(settings, Capabilities::full(WaterPlane::default(), 3.7))
    }

    #[test]
    fn test_apply_writes_current_value() {
        let mut scene = scene();
        let mut sun = SunControl::new(SunSlider::new(0.0, 1.0));
        let params = sun.apply(&mut scene);

        assert_eq!(params, compute_environment(0.0));
        assert!((scene.starfield.opacity - 0.8).abs() < 1e-6);
        assert_eq!(sun.model().sun_position(), params.sun_position);
    }

    #[test]
    fn test_unchanged_value_does_not_touch_scene() {
        let mut scene = scene();
        let mut sun = SunControl::new(SunSlider::default());
        sun.apply(&mut scene);
        scene.starfield.set_opacity(0.42);

        assert!(sun.set(50.0, &mut scene).is_none());
        assert_eq!(scene.starfield.opacity, 0.42);
    }

    #[test]
    fn test_nudge_recomputes_from_new_value() {
        let mut scene = scene();
        let mut sun = SunControl::new(SunSlider::new(99.0, 1.0));

        let params = sun.nudge(1.0, &mut scene).unwrap();
        assert_eq!(sun.value(), 100.0);
        assert_eq!(params, compute_environment(100.0));
        assert!(scene.starfield.opacity.abs() < 1e-6);

        // Already at the top of the range.
        assert!(sun.nudge(1.0, &mut scene).is_none());
    }

    #[test]
    fn test_set_clamps_before_recompute() {
        let mut scene = scene();
        let mut sun = SunControl::new(SunSlider::default());
        let params = sun.set(250.0, &mut scene).unwrap();
        assert_eq!(params, compute_environment(100.0));
    }
}
