//! The interactive application: window, input, and the frame loop.
//!
//! Per frame: advance the clock, let the controller run its autoplay timer,
//! step the engine, re-upload buffers if they changed, draw. Keyboard maps
//! directly onto controller operations:
//!
//! - `1`-`8`  select a shape (stops autoplay)
//! - `Space`  toggle autoplay
//! - `Up`/`Down`  speed up / slow down
//! - `C`      cycle the color swatch
//! - `P`      pause the clock

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ActiveEventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::controller::Controller;
use crate::engine::MorphEngine;
use crate::error::AppError;
use crate::gpu::GpuState;
use crate::shapes::ShapeKind;
use crate::time::Time;

const SPEED_STEP: f32 = 0.25;
const MIN_SPEED: f32 = 0.25;
const MAX_SPEED: f32 = 4.0;

pub struct App {
    engine: MorphEngine,
    controller: Controller,
    time: Time,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    mouse_pressed: bool,
    last_mouse_pos: Option<(f64, f64)>,
}

impl App {
    /// Build the core state up front; the window and GPU arrive in `resumed`.
    pub fn new(particle_count: usize) -> Result<Self, AppError> {
        let mut engine = MorphEngine::new(particle_count)?;
        let controller = Controller::new();
        engine.set_params(controller.params());

        Ok(Self {
            engine,
            controller,
            time: Time::new(),
            window: None,
            gpu: None,
            mouse_pressed: false,
            last_mouse_pos: None,
        })
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Space => {
                let autoplay = !self.controller.autoplay();
                self.controller.set_autoplay(autoplay, self.time.elapsed());
            }
            KeyCode::KeyC => {
                self.controller.next_swatch();
                self.engine.set_params(self.controller.params());
            }
            KeyCode::KeyP => {
                self.time.toggle_pause();
            }
            KeyCode::ArrowUp | KeyCode::ArrowDown => {
                let step = if key == KeyCode::ArrowUp {
                    SPEED_STEP
                } else {
                    -SPEED_STEP
                };
                let speed = (self.controller.speed() + step).clamp(MIN_SPEED, MAX_SPEED);
                // Clamped to a valid range above, so this cannot fail.
                if self.controller.set_speed(speed).is_ok() {
                    self.engine.set_params(self.controller.params());
                }
            }
            _ => {
                if let Some(shape) = digit_to_shape(key) {
                    self.select_shape(shape);
                }
            }
        }
    }

    fn select_shape(&mut self, shape: ShapeKind) {
        self.controller.set_shape(shape);
        self.engine.set_shape(shape);
        self.update_title();
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            window.set_title(&format!(
                "pointmorph - {}",
                self.controller.shape().label()
            ));
        }
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let (elapsed, delta) = self.time.update();

        if let Some(shape) = self.controller.update(elapsed) {
            self.engine.set_shape(shape);
            self.update_title();
        }

        if !self.time.is_paused() {
            self.engine.step(elapsed);
        }

        let Some(gpu) = &mut self.gpu else { return };

        // Idle camera drift while the viewer is hands-off, like the
        // original's auto-rotate outside autoplay.
        if !self.controller.autoplay() && !self.mouse_pressed {
            gpu.camera.auto_rotate(delta);
        }

        if self.engine.take_dirty() {
            gpu.upload(self.engine.positions(), self.engine.colors());
        }
        gpu.set_frame_state(self.engine.model_matrix(), elapsed);

        match gpu.render() {
            Ok(_) => {}
            Err(wgpu::SurfaceError::Lost) => gpu.resize(winit::dpi::PhysicalSize {
                width: gpu.config.width,
                height: gpu.config.height,
            }),
            Err(wgpu::SurfaceError::OutOfMemory) => event_loop.exit(),
            Err(e) => eprintln!("Render error: {:?}", e),
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("pointmorph - Galaxy")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                eprintln!("{}", AppError::from(e));
                event_loop.exit();
                return;
            }
        };
        self.window = Some(window.clone());

        match pollster::block_on(GpuState::new(
            window,
            self.engine.positions(),
            self.engine.colors(),
        )) {
            Ok(gpu) => self.gpu = Some(gpu),
            Err(e) => {
                eprintln!("{}", AppError::from(e));
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                self.handle_key(key);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.mouse_pressed = state == ElementState::Pressed;
                    if !self.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                if self.mouse_pressed {
                    if let Some((last_x, last_y)) = self.last_mouse_pos {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        if let Some(gpu) = &mut self.gpu {
                            gpu.camera.orbit(dx, dy);
                        }
                    }
                    self.last_mouse_pos = Some((position.x, position.y));
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.1,
                };
                if let Some(gpu) = &mut self.gpu {
                    gpu.camera.zoom(scroll);
                }
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => {}
        }
    }
}

/// Map the digit row onto [`ShapeKind::ALL`].
fn digit_to_shape(key: KeyCode) -> Option<ShapeKind> {
    let index = match key {
        KeyCode::Digit1 => 0,
        KeyCode::Digit2 => 1,
        KeyCode::Digit3 => 2,
        KeyCode::Digit4 => 3,
        KeyCode::Digit5 => 4,
        KeyCode::Digit6 => 5,
        KeyCode::Digit7 => 6,
        KeyCode::Digit8 => 7,
        _ => return None,
    };
    ShapeKind::from_index(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digit_mapping_covers_all_shapes() {
        assert_eq!(digit_to_shape(KeyCode::Digit1), Some(ShapeKind::Galaxy));
        assert_eq!(digit_to_shape(KeyCode::Digit8), Some(ShapeKind::Rose));
        assert_eq!(digit_to_shape(KeyCode::Digit9), None);
        assert_eq!(digit_to_shape(KeyCode::KeyA), None);
    }

    #[test]
    fn test_app_rejects_zero_particles() {
        assert!(App::new(0).is_err());
    }
}
