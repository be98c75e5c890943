//! The external control state: shape, speed, color, autoplay.
//!
//! [`Controller`] validates every change at this boundary (the engine trusts
//! its inputs) and runs the autoplay timer that cycles through shapes. The
//! host wires its input events to the setters and forwards the results to
//! the engine.

use glam::Vec3;

use crate::engine::AnimationParams;
use crate::error::ConfigError;
use crate::shapes::ShapeKind;

/// Seconds between autoplay shape switches.
pub const CYCLE_INTERVAL: f32 = 6.0;

/// Color swatches cycled by the host's color control.
///
/// Purple, cyan, amber, magenta, mint - the original picker's palette.
pub const SWATCHES: [Vec3; 5] = [
    Vec3::new(0.659, 0.333, 0.969),
    Vec3::new(0.133, 0.827, 0.933),
    Vec3::new(0.961, 0.620, 0.043),
    Vec3::new(0.925, 0.282, 0.600),
    Vec3::new(0.204, 0.827, 0.600),
];

/// Holds the user-facing state and decides when the engine must change.
pub struct Controller {
    shape: ShapeKind,
    speed: f32,
    base_color: Vec3,
    autoplay: bool,
    swatch: usize,
    last_cycle: f32,
}

impl Controller {
    /// Start on the Galaxy at normal speed with autoplay running.
    pub fn new() -> Self {
        Self {
            shape: ShapeKind::Galaxy,
            speed: 1.0,
            base_color: SWATCHES[0],
            autoplay: true,
            swatch: 0,
            last_cycle: 0.0,
        }
    }

    /// Currently selected shape.
    #[inline]
    pub fn shape(&self) -> ShapeKind {
        self.shape
    }

    /// Whether autoplay is cycling shapes.
    #[inline]
    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    /// Current animation parameters to hand to the engine.
    pub fn params(&self) -> AnimationParams {
        AnimationParams {
            base_color: self.base_color,
            speed: self.speed,
        }
    }

    /// Select a shape manually. Manual selection stops autoplay.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.shape = shape;
        self.autoplay = false;
    }

    /// Set the speed multiplier. Rejects non-positive or non-finite values.
    pub fn set_speed(&mut self, speed: f32) -> Result<(), ConfigError> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(ConfigError::Speed(speed));
        }
        self.speed = speed;
        Ok(())
    }

    /// Current speed multiplier.
    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Set the base particle color directly.
    pub fn set_color(&mut self, color: Vec3) {
        self.base_color = color;
    }

    /// Advance to the next preset swatch and return it.
    pub fn next_swatch(&mut self) -> Vec3 {
        self.swatch = (self.swatch + 1) % SWATCHES.len();
        self.base_color = SWATCHES[self.swatch];
        self.base_color
    }

    /// Enable or disable autoplay.
    ///
    /// Re-enabling restarts the cycle timer so the current shape gets a full
    /// interval before the first switch.
    pub fn set_autoplay(&mut self, autoplay: bool, elapsed: f32) {
        if autoplay && !self.autoplay {
            self.last_cycle = elapsed;
        }
        self.autoplay = autoplay;
    }

    /// Run the autoplay timer.
    ///
    /// Returns the next shape to morph to when the interval has elapsed,
    /// otherwise `None`. The caller forwards the result to the engine.
    pub fn update(&mut self, elapsed: f32) -> Option<ShapeKind> {
        if !self.autoplay || elapsed - self.last_cycle < CYCLE_INTERVAL {
            return None;
        }
        self.last_cycle = elapsed;
        self.shape = self.shape.next();
        Some(self.shape)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speed_validation() {
        let mut c = Controller::new();
        assert!(c.set_speed(0.0).is_err());
        assert!(c.set_speed(-2.0).is_err());
        assert!(c.set_speed(f32::NAN).is_err());
        assert!(c.set_speed(f32::INFINITY).is_err());
        // Rejected values never stick.
        assert_eq!(c.speed(), 1.0);

        assert!(c.set_speed(2.5).is_ok());
        assert_eq!(c.speed(), 2.5);
        assert_eq!(c.params().speed, 2.5);
    }

    #[test]
    fn test_manual_selection_stops_autoplay() {
        let mut c = Controller::new();
        assert!(c.autoplay());
        c.set_shape(ShapeKind::Lemniscate);
        assert!(!c.autoplay());
        assert_eq!(c.shape(), ShapeKind::Lemniscate);
    }

    #[test]
    fn test_autoplay_cadence() {
        let mut c = Controller::new();
        assert_eq!(c.update(1.0), None);
        assert_eq!(c.update(CYCLE_INTERVAL - 0.1), None);

        let switched = c.update(CYCLE_INTERVAL + 0.1);
        assert_eq!(switched, Some(ShapeKind::KochCurve));

        // Timer restarts from the switch, not from zero.
        assert_eq!(c.update(CYCLE_INTERVAL + 1.0), None);
        assert_eq!(
            c.update(2.0 * CYCLE_INTERVAL + 0.2),
            Some(ShapeKind::Cardioid)
        );
    }

    #[test]
    fn test_autoplay_resume_resets_timer() {
        let mut c = Controller::new();
        c.set_shape(ShapeKind::Rose);
        c.set_autoplay(true, 100.0);
        // A full interval must elapse after resume.
        assert_eq!(c.update(100.0 + CYCLE_INTERVAL - 0.5), None);
        assert_eq!(
            c.update(100.0 + CYCLE_INTERVAL + 0.5),
            Some(ShapeKind::Galaxy)
        );
    }

    #[test]
    fn test_swatch_cycle() {
        let mut c = Controller::new();
        let first = c.next_swatch();
        assert_eq!(first, SWATCHES[1]);
        for _ in 0..SWATCHES.len() {
            c.next_swatch();
        }
        // A full lap through the palette lands back on the same swatch.
        assert_eq!(c.params().base_color, SWATCHES[1]);
    }
}
