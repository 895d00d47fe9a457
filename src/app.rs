//! winit host: window, asset loading, event routing and the redraw loop.

use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::controller::Controller;
use crate::error::{Result, ViewError};
use crate::input::InputState;
use crate::renderer::Renderer;
use crate::world::GameEngine;

/// Where the host is in its lifecycle. Frames are only composed once
/// `Ready`; input that arrives before then is dropped.
enum Lifecycle {
    Loading,
    Ready(Renderer),
}

pub struct App<E: GameEngine> {
    controller: Controller<E>,
    input: InputState,
    lifecycle: Lifecycle,
    start: Instant,
    /// First fatal error; stops the loop and is returned from [`run`](Self::run).
    error: Option<ViewError>,
}

impl<E: GameEngine> App<E> {
    pub fn new(controller: Controller<E>) -> Self {
        Self {
            controller,
            input: InputState::new(),
            lifecycle: Lifecycle::Loading,
            start: Instant::now(),
            error: None,
        }
    }

    pub fn run(mut self) -> Result<()> {
        let event_loop = EventLoop::new().map_err(|e| ViewError::Window(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);
        event_loop.run_app(&mut self).map_err(|e| ViewError::Window(e.to_string()))?;
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop) -> Result<Renderer> {
        let config = self.controller.config();
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title(&config.title)
                    .with_inner_size(winit::dpi::PhysicalSize::new(
                        config.window_width,
                        config.window_height,
                    )),
            )
            .map_err(|e| ViewError::Window(e.to_string()))?;

        let mut renderer = pollster::block_on(Renderer::new(Arc::new(window), config.view_cells()))?;
        renderer.load_assets(&config.assets_dir)?;
        Ok(renderer)
    }

    fn submit(&mut self) {
        let line = self.input.pending_line().to_string();
        if line.trim().is_empty() {
            return;
        }
        match self.controller.submit_text(&line) {
            Ok(()) => self.input.accept(),
            Err(e) => {
                tracing::debug!(%e, "input rejected");
                self.input.reject();
            }
        }
    }

    fn on_key(&mut self, event_loop: &ActiveEventLoop, code: KeyCode, text: Option<&str>) {
        match code {
            KeyCode::Escape => event_loop.exit(),
            KeyCode::Enter | KeyCode::NumpadEnter => self.submit(),
            KeyCode::Backspace => self.input.backspace(),
            KeyCode::PageDown => self.controller.next_page(),
            KeyCode::PageUp => self.controller.prev_page(),
            _ => {
                for ch in text.unwrap_or_default().chars() {
                    self.input.type_char(ch);
                }
            }
        }
    }

    fn on_click(&mut self, renderer: &Renderer) {
        let cells = renderer.cells();
        if let Some(point) = renderer.viewport().to_overlay(self.input.mouse_pos, cells) {
            self.controller.click(point);
        }
    }
}

impl<E: GameEngine> ApplicationHandler for App<E> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if matches!(self.lifecycle, Lifecycle::Ready(_)) {
            return;
        }
        match self.init(event_loop) {
            Ok(renderer) => {
                tracing::info!(ready = renderer.is_ready(), "assets loaded");
                self.lifecycle = Lifecycle::Ready(renderer);
            }
            Err(e) => {
                tracing::error!(%e, "startup failed");
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Lifecycle::Ready(renderer) = &self.lifecycle {
            renderer.window.request_redraw();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        // Swap the renderer out so handlers can borrow `self` mutably.
        let Lifecycle::Ready(mut renderer) = std::mem::replace(&mut self.lifecycle, Lifecycle::Loading) else {
            if matches!(event, WindowEvent::CloseRequested) {
                event_loop.exit();
            }
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),

            WindowEvent::Resized(size) => renderer.resize(size),

            WindowEvent::CursorMoved { position, .. } => {
                self.input.mouse_pos = [position.x as f32, position.y as f32];
            }

            WindowEvent::MouseInput { button, state, .. } => match state {
                ElementState::Pressed => {
                    if self.input.mouse_held.insert(button) {
                        self.input.mouse_pressed.insert(button);
                    }
                    if button == MouseButton::Left {
                        self.on_click(&renderer);
                    }
                }
                ElementState::Released => {
                    self.input.mouse_held.remove(&button);
                }
            },

            WindowEvent::KeyboardInput {
                event: KeyEvent { physical_key: PhysicalKey::Code(code), state, ref text, .. },
                ..
            } => match state {
                ElementState::Pressed => {
                    if self.input.keys_held.insert(code) {
                        self.input.keys_pressed.insert(code);
                    }
                    self.on_key(event_loop, code, text.as_deref());
                }
                ElementState::Released => {
                    self.input.keys_held.remove(&code);
                }
            },

            WindowEvent::RedrawRequested => {
                self.controller.tick(self.start.elapsed());
                let frame = self.controller.frame(&self.input);
                match renderer.render(&frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = renderer.window.inner_size();
                        renderer.resize(size);
                    }
                    Err(e) => tracing::warn!(%e, "render error"),
                }
                self.input.clear_frame_state();
            }

            _ => {}
        }

        self.lifecycle = Lifecycle::Ready(renderer);
    }
}
