//! The per-frame animation engine.
//!
//! [`MorphEngine`] owns the flat position/color buffers for every particle
//! and, once per display tick, nudges positions toward the current morph
//! target, overlays time-varying noise, and recomputes colors. Buffers are
//! mutated in place; the renderer re-uploads them when [`MorphEngine::take_dirty`]
//! reports a change.
//!
//! # Example
//!
//! ```ignore
//! use pointmorph::engine::MorphEngine;
//! use pointmorph::shapes::ShapeKind;
//!
//! let mut engine = MorphEngine::new(30_000)?;
//! engine.set_shape(ShapeKind::Rose);
//!
//! // In the frame loop:
//! engine.step(time.elapsed());
//! if engine.take_dirty() {
//!     renderer.upload(engine.positions(), engine.colors());
//! }
//! ```

use glam::{Mat4, Vec3};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::error::ConfigError;
use crate::shapes::{generate_positions_with, ShapeKind};

/// Fraction of the remaining gap closed per step, before speed scaling.
///
/// Chosen empirically for visually smooth convergence at ~60 fps. This is a
/// per-frame fraction, not an exponential-decay rate, so the morph pace is
/// framerate-dependent.
pub const LERP_RATE: f32 = 0.03;

/// Peak per-axis noise displacement per step, before speed scaling.
pub const NOISE_AMPLITUDE: f32 = 0.03;

/// Container rotation about the vertical axis, radians per second per speed.
pub const ROTATION_RATE: f32 = 0.05;

/// Render hint: billboard half-size in world units.
pub const PARTICLE_SIZE: f32 = 0.18;

/// Render hint: sprite opacity fed into additive blending.
pub const PARTICLE_OPACITY: f32 = 0.8;

/// Parameters read by the engine on every step.
///
/// Replaced wholesale by the controller; never mutated mid-step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationParams {
    /// Base particle color. Per-particle pulse and distance terms are added
    /// on top, intentionally unclamped so bright centers bloom under
    /// additive blending.
    pub base_color: Vec3,
    /// Scales the interpolation rate, noise amplitude, and rotation rate.
    pub speed: f32,
}

impl Default for AnimationParams {
    fn default() -> Self {
        Self {
            // #a855f7, the original launch palette.
            base_color: Vec3::new(0.659, 0.333, 0.969),
            speed: 1.0,
        }
    }
}

/// Owns the particle buffers and advances them one display tick at a time.
pub struct MorphEngine {
    count: usize,
    /// Current rendered positions, 3 floats per particle.
    positions: Vec<f32>,
    /// Current colors, 3 floats per particle, ~[0, 1] but unclamped.
    colors: Vec<f32>,
    /// Morph target positions, replaced wholesale on shape change.
    target: Vec<f32>,
    /// Per-particle phase in [0, 2π), sampled once at construction. Keeps the
    /// ensemble from pulsing in unison.
    phases: Vec<f32>,
    params: AnimationParams,
    yaw: f32,
    tilt: f32,
    dirty: bool,
    rng: SmallRng,
}

impl MorphEngine {
    /// Create an engine for `count` particles, seeded with the Galaxy shape.
    ///
    /// Positions start equal to the initial target, so startup shows the
    /// shape immediately instead of a transition from nowhere.
    pub fn new(count: usize) -> Result<Self, ConfigError> {
        Self::with_rng(count, SmallRng::from_entropy())
    }

    /// Create an engine with an explicit random source.
    ///
    /// Shape jitter is re-drawn from this source on every shape change, but
    /// the per-particle phases are sampled exactly once, here.
    pub fn with_rng(count: usize, mut rng: SmallRng) -> Result<Self, ConfigError> {
        if count == 0 {
            return Err(ConfigError::ParticleCount(count));
        }

        let target = generate_positions_with(ShapeKind::Galaxy, count, &mut rng);
        let positions = target.clone();
        let phases: Vec<f32> = (0..count).map(|_| rng.gen::<f32>() * TAU).collect();

        Ok(Self {
            count,
            positions,
            colors: vec![0.0; count * 3],
            target,
            phases,
            params: AnimationParams::default(),
            yaw: 0.0,
            tilt: 0.0,
            dirty: true,
            rng,
        })
    }

    /// Number of particles. Fixed for the engine's lifetime.
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Current rendered positions, 3 floats per particle.
    #[inline]
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Current colors, 3 floats per particle.
    #[inline]
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// The morph target currently being interpolated toward.
    #[inline]
    pub fn target(&self) -> &[f32] {
        &self.target
    }

    /// Parameters in effect for the next step.
    #[inline]
    pub fn params(&self) -> AnimationParams {
        self.params
    }

    /// Swap the morph target to a freshly generated shape.
    ///
    /// Positions are untouched: the next steps simply interpolate from
    /// wherever the particles currently sit. Arriving mid-morph is fine;
    /// there is no queue and no transition history.
    pub fn set_shape(&mut self, shape: ShapeKind) {
        self.target = generate_positions_with(shape, self.count, &mut self.rng);
    }

    /// Replace the animation parameters wholesale.
    ///
    /// Takes effect on the next [`step`](Self::step); no reallocation.
    /// Validation happens at the controller boundary.
    pub fn set_params(&mut self, params: AnimationParams) {
        self.params = params;
    }

    /// Advance one display tick.
    ///
    /// `elapsed` is monotonic seconds since start. For every particle:
    /// lerp toward the target, add per-axis sine noise with the particle's
    /// phase offset, then recompute color from the post-noise distance and a
    /// time pulse. Finishes by updating the container rotation and marking
    /// the buffers dirty.
    pub fn step(&mut self, elapsed: f32) {
        let speed = self.params.speed;
        let lerp = LERP_RATE * speed;
        let noise_amp = NOISE_AMPLITUDE * speed;
        let base = self.params.base_color;

        for i in 0..self.count {
            let i3 = i * 3;
            let phase = self.phases[i];

            for axis in 0..3 {
                let p = self.positions[i3 + axis];
                self.positions[i3 + axis] = p + (self.target[i3 + axis] - p) * lerp;
            }

            // Breathing noise, distinct frequency per axis.
            self.positions[i3] += (elapsed * 1.5 + phase).sin() * noise_amp;
            self.positions[i3 + 1] += (elapsed * 1.2 + phase).cos() * noise_amp;
            self.positions[i3 + 2] += (elapsed * 1.8 + phase).sin() * noise_amp;

            let x = self.positions[i3];
            let y = self.positions[i3 + 1];
            let z = self.positions[i3 + 2];
            let dist = (x * x + y * y + z * z).sqrt();

            let pulse = ((elapsed * 2.0 + phase).sin() + 1.0) * 0.5;

            // Center-hot convention: red/green fade with distance while blue
            // grows, so the core runs warm and the periphery cools off.
            self.colors[i3] = base.x + pulse * 0.15 - dist * 0.005;
            self.colors[i3 + 1] = base.y + pulse * 0.15 - dist * 0.005;
            self.colors[i3 + 2] = base.z + pulse * 0.3 + dist * 0.005;
        }

        // Rigid rotation lives on the container transform, not the particles.
        self.yaw = elapsed * ROTATION_RATE * speed;
        self.tilt = (elapsed * 0.1).sin() * 0.05;

        self.dirty = true;
    }

    /// Container transform for the whole system: slow yaw plus a gentle
    /// oscillating tilt.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_rotation_y(self.yaw) * Mat4::from_rotation_z(self.tilt)
    }

    /// True if the buffers changed since the last call; clears the flag.
    ///
    /// The renderer must re-upload positions and colors before its next draw
    /// whenever this returns true.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(count: usize) -> MorphEngine {
        MorphEngine::with_rng(count, SmallRng::seed_from_u64(42)).unwrap()
    }

    #[test]
    fn test_zero_count_rejected() {
        assert!(matches!(
            MorphEngine::new(0),
            Err(ConfigError::ParticleCount(0))
        ));
    }

    #[test]
    fn test_initial_state() {
        let e = engine(100);
        assert_eq!(e.positions().len(), 300);
        assert_eq!(e.colors().len(), 300);
        assert_eq!(e.target().len(), 300);
        // Zero-length startup transition.
        assert_eq!(e.positions(), e.target());
        for &phase in &e.phases {
            assert!((0.0..TAU).contains(&phase));
        }
    }

    #[test]
    fn test_set_shape_preserves_positions() {
        let mut e = engine(200);
        e.step(0.5);

        let before = e.positions().to_vec();
        let old_target = e.target().to_vec();
        e.set_shape(ShapeKind::Rose);

        assert_eq!(e.positions(), before.as_slice());
        assert_ne!(e.target(), old_target.as_slice());
    }

    #[test]
    fn test_step_moves_toward_target() {
        let mut e = engine(4);
        e.set_shape(ShapeKind::Rose);

        let start = e.positions().to_vec();
        let target = e.target().to_vec();
        e.step(1.0 / 60.0);

        for i in 0..start.len() {
            let expected = start[i] + (target[i] - start[i]) * LERP_RATE;
            // Lerp progress of exactly 3% of the gap, plus bounded noise.
            assert!(
                (e.positions()[i] - expected).abs() <= NOISE_AMPLITUDE + 1e-5,
                "coordinate {} drifted past the noise envelope",
                i
            );
        }
    }

    #[test]
    fn test_speed_zero_freezes_positions() {
        let mut e = engine(1000);
        e.set_shape(ShapeKind::Butterfly);
        e.set_params(AnimationParams {
            speed: 0.0,
            ..AnimationParams::default()
        });

        let before = e.positions().to_vec();
        e.step(3.0);

        // Lerp and noise both scale with speed, so positions are untouched.
        assert_eq!(e.positions(), before.as_slice());
    }

    #[test]
    fn test_color_pulse_independent_of_speed() {
        let mut e = engine(50);
        e.set_params(AnimationParams {
            speed: 0.0,
            ..AnimationParams::default()
        });

        e.step(0.0);
        let at_zero = e.colors().to_vec();
        e.step(0.7);
        let later = e.colors().to_vec();

        // Positions are frozen, yet the pulse term still tracks time.
        assert_ne!(at_zero, later);
    }

    #[test]
    fn test_set_color_reflected_within_one_step() {
        let mut e = engine(50);
        let mut params = AnimationParams {
            speed: 0.0,
            base_color: Vec3::new(0.1, 0.2, 0.3),
        };
        e.set_params(params);
        e.step(1.0);
        let before = e.colors().to_vec();

        params.base_color = Vec3::new(0.6, 0.5, 0.4);
        e.set_params(params);
        e.step(1.0);

        // Frozen positions and repeated elapsed time hold dist and pulse
        // constant, so the delta is exactly the base color change.
        for (i, (&old, &new)) in before.iter().zip(e.colors()).enumerate() {
            let expected = [0.5, 0.3, 0.1][i % 3];
            assert!(
                (new - old - expected).abs() < 1e-5,
                "channel {} lagged the base color change",
                i
            );
        }
    }

    #[test]
    fn test_convergence_is_geometric() {
        let mut e = engine(100);
        e.set_shape(ShapeKind::Archimedean);

        let start = e.positions().to_vec();
        let target = e.target().to_vec();

        let initial: f32 = start
            .iter()
            .zip(&target)
            .map(|(p, t)| (p - t).abs())
            .fold(0.0, f32::max);

        let steps = 200;
        for _ in 0..steps {
            e.step(1.0);
        }

        // Residual after K steps is bounded by (1-L)^K of the initial gap
        // plus the steady-state noise floor of amplitude / L.
        let bound =
            (1.0 - LERP_RATE).powi(steps) * initial + NOISE_AMPLITUDE / LERP_RATE + 0.05;
        for i in 0..start.len() {
            assert!(
                (e.positions()[i] - target[i]).abs() <= bound,
                "coordinate {} failed to converge: residual {}",
                i,
                (e.positions()[i] - target[i]).abs()
            );
        }
    }

    #[test]
    fn test_dirty_flag_semantics() {
        let mut e = engine(10);
        // Construction leaves fresh buffers to upload.
        assert!(e.take_dirty());
        assert!(!e.take_dirty());

        e.step(0.1);
        assert!(e.take_dirty());
        assert!(!e.take_dirty());
    }

    #[test]
    fn test_model_matrix_tracks_time() {
        let mut e = engine(10);
        e.step(0.0);
        let at_zero = e.model_matrix();
        e.step(10.0);
        let later = e.model_matrix();

        assert!(at_zero.is_finite());
        assert!(later.is_finite());
        assert_ne!(at_zero, later);
    }
}
