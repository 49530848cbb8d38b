//! Slingshot N-body sandbox
//!
//! A fixed sun and a few planets orbit under Newtonian gravity. Drag on the
//! orbital plane to fling new planets into the system.
//!
//! Controls:
//! - Left mouse drag: Slingshot (press to anchor, pull back, release to launch)
//! - Right mouse drag: Orbit camera
//! - Scroll: Zoom in/out
//! - 1/2/3: Load presets (Solar System, Binary Star, Empty Space)
//! - Space: Pause/resume
//! - R: Reset to the preset's initial configuration
//! - C: Recenter camera
//! - T: Toggle trails
//! - G: Toggle grid
//! - Escape: Cancel the current slingshot

mod camera;
mod graphics;
mod renderer;
mod slingshot;
mod spawner;
mod trails;
mod ui;

use std::time::Instant;

use camera::OrbitCamera;
use glam::Vec2;
use graphics::GraphicsContext;
use log::{debug, error, info, warn};
use nbody_core::forces::total_energy;
use nbody_core::{Preset, SimConfig, SimError, SimEvent, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use renderer::{Overlays, Renderer};
use slingshot::Slingshot;
use spawner::Spawner;
use trails::{Trails, DEFAULT_TRAIL_LENGTH};
use ui::{draw_controls, PanelView, UiAction};
use winit::{
    event::{ElementState, Event, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::ControlFlow,
    keyboard::{KeyCode, PhysicalKey},
};

const MAX_DRAWN_BODIES: usize = 2048;

struct EguiState {
    ctx: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,
}

struct App {
    ctx: GraphicsContext,
    renderer: Renderer,
    camera: OrbitCamera,
    simulation: Simulation,
    preset: Preset,
    trails: Trails,
    slingshot: Slingshot,
    spawner: Spawner<StdRng>,
    paused: bool,
    show_grid: bool,
    show_trails: bool,
    orbiting: bool,
    cursor: Option<Vec2>,
    last_orbit_pos: Option<Vec2>,
    egui: EguiState,
}

impl App {
    fn new(ctx: GraphicsContext) -> Result<Self, SimError> {
        let renderer = Renderer::new(&ctx, MAX_DRAWN_BODIES, DEFAULT_TRAIL_LENGTH);
        let camera = OrbitCamera::new(ctx.aspect_ratio());

        let preset = Preset::default();
        let simulation = Simulation::from_preset(preset, SimConfig::default())?;

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &ctx.window,
            Some(ctx.window.scale_factor() as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&ctx.device, ctx.config.format, None, 1);

        Ok(Self {
            ctx,
            renderer,
            camera,
            simulation,
            preset,
            trails: Trails::new(DEFAULT_TRAIL_LENGTH),
            slingshot: Slingshot::default(),
            spawner: Spawner::new(StdRng::from_entropy()),
            paused: false,
            show_grid: true,
            show_trails: true,
            orbiting: false,
            cursor: None,
            last_orbit_pos: None,
            egui: EguiState {
                ctx: egui_ctx,
                state: egui_state,
                renderer: egui_renderer,
            },
        })
    }

    fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        self.ctx.resize(new_size);
        self.camera.update_aspect_ratio(self.ctx.aspect_ratio());
        self.renderer
            .resize(&self.ctx.device, new_size.width, new_size.height);
    }

    fn load_preset(&mut self, preset: Preset) {
        let config = *self.simulation.config();
        match Simulation::from_preset(preset, config) {
            Ok(mut simulation) => {
                for event in self.simulation.carry_pending_settings(&mut simulation) {
                    warn!("preset switch dropped queued {event:?}");
                }
                self.simulation = simulation;
                self.preset = preset;
                self.trails.clear();
                self.slingshot.cancel();
            }
            Err(err) => error!("could not load preset {}: {err}", preset.name()),
        }
    }

    /// One frame of physics. Queued events are applied before the step.
    fn update(&mut self, wall_dt: f32) {
        let wall_dt = if self.paused { 0.0 } else { wall_dt };
        let report = self.simulation.advance(wall_dt);

        for id in &report.injected {
            debug!("launched {id}");
        }
        self.trails
            .record(self.simulation.bodies(), self.simulation.generation());
    }

    fn apply_ui(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            match action {
                UiAction::Sim(event) => self.simulation.push_event(event),
                UiAction::LoadPreset(preset) => self.load_preset(preset),
                UiAction::TogglePause => self.paused = !self.paused,
            }
        }
    }

    fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer.update_camera(&self.ctx.queue, &self.camera);
        let geometry = self.renderer.upload(
            &self.ctx.queue,
            self.simulation.bodies(),
            &self.trails,
            self.slingshot.aim_line(),
        );

        let config = self.simulation.config();
        let panel = PanelView {
            time_scale: config.time_scale(),
            gravity: config.gravity(),
            preset: self.preset,
            bodies: self.simulation.bodies().len(),
            energy: total_energy(self.simulation.bodies(), config.gravity()),
            elapsed: self.simulation.elapsed_time(),
            paused: self.paused,
        };

        let mut actions = Vec::new();
        let raw_input = self.egui.state.take_egui_input(&self.ctx.window);
        let full_output = self.egui.ctx.run(raw_input, |ctx| {
            draw_controls(ctx, &panel, &mut actions);
        });
        self.apply_ui(actions);

        self.egui
            .state
            .handle_platform_output(&self.ctx.window, full_output.platform_output);
        let tris = self
            .egui
            .ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui
                .renderer
                .update_texture(&self.ctx.device, &self.ctx.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.ctx.size.width, self.ctx.size.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.renderer.render(
            &mut encoder,
            &view,
            &geometry,
            Overlays {
                grid: self.show_grid,
                trails: self.show_trails,
            },
        );

        self.egui.renderer.update_buffers(
            &self.ctx.device,
            &self.ctx.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );
        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui.renderer.free_texture(id);
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn viewport(&self) -> Vec2 {
        Vec2::new(self.ctx.size.width as f32, self.ctx.size.height as f32)
    }

    fn cursor_on_plane(&self) -> Option<glam::Vec3> {
        let cursor = self.cursor?;
        self.camera
            .cursor_ray(cursor, self.viewport())
            .hit_orbital_plane()
    }

    fn handle_key(&mut self, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }

        match key {
            KeyCode::Space => self.paused = !self.paused,
            KeyCode::KeyG => self.show_grid = !self.show_grid,
            KeyCode::KeyT => self.show_trails = !self.show_trails,
            KeyCode::KeyC => self.camera.home(),
            KeyCode::KeyR => self.simulation.push_event(SimEvent::Reset),
            KeyCode::Escape => self.slingshot.cancel(),
            KeyCode::Digit1 => self.load_preset(Preset::SolarSystem),
            KeyCode::Digit2 => self.load_preset(Preset::BinaryStar),
            KeyCode::Digit3 => self.load_preset(Preset::Empty),
            _ => {}
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match (button, state) {
            (MouseButton::Left, ElementState::Pressed) => {
                if let Some(point) = self.cursor_on_plane() {
                    self.slingshot.press(point);
                }
            }
            (MouseButton::Left, ElementState::Released) => {
                if let Some(launch) = self.slingshot.release() {
                    self.simulation.push_event(SimEvent::Inject {
                        position: launch.position,
                        velocity: launch.velocity,
                        traits: self.spawner.next_traits(),
                    });
                }
            }
            (MouseButton::Right, state) => {
                self.orbiting = state == ElementState::Pressed;
                self.last_orbit_pos = None;
            }
            _ => {}
        }
    }

    fn handle_mouse_move(&mut self, x: f64, y: f64) {
        let pos = Vec2::new(x as f32, y as f32);
        self.cursor = Some(pos);

        if self.slingshot.is_aiming() {
            if let Some(point) = self.cursor_on_plane() {
                self.slingshot.drag(point);
            }
        }

        if self.orbiting {
            if let Some(last) = self.last_orbit_pos {
                let delta = (pos - last) * 0.01;
                self.camera.orbit(delta.x, delta.y);
            }
            self.last_orbit_pos = Some(pos);
        }
    }

    fn handle_scroll(&mut self, delta: f32) {
        self.camera.zoom(delta * 3.0);
    }

    fn handle_window_event(&mut self, event: &WindowEvent) -> bool {
        self.egui.state.on_window_event(&self.ctx.window, event).consumed
    }
}

/// Left-button releases reach the slingshot even when egui consumed them.
fn ends_slingshot(button: MouseButton, state: ElementState) -> bool {
    button == MouseButton::Left && state == ElementState::Released
}

fn main() {
    env_logger::init();

    let (ctx, event_loop) = match pollster::block_on(GraphicsContext::new(
        "Slingshot Gravity - Rust/wgpu",
        1280,
        720,
    )) {
        Ok(pair) => pair,
        Err(err) => {
            error!("graphics initialisation failed: {err}");
            std::process::exit(1);
        }
    };

    let mut app = match App::new(ctx) {
        Ok(app) => app,
        Err(err) => {
            error!("simulation setup failed: {err}");
            std::process::exit(1);
        }
    };
    info!("loaded {}", app.preset.name());
    let mut last_time = Instant::now();

    let result = event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Poll);

        match event {
            Event::WindowEvent { ref event, .. } => {
                if app.handle_window_event(event) {
                    // a drag that ends over the panel still has to finish the slingshot
                    if let WindowEvent::MouseInput { state, button, .. } = event {
                        if ends_slingshot(*button, *state) {
                            app.handle_mouse_button(*button, *state);
                        }
                    }
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => elwt.exit(),
                    WindowEvent::Resized(size) => app.resize(*size),
                    WindowEvent::MouseInput { state, button, .. } => {
                        app.handle_mouse_button(*button, *state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        app.handle_mouse_move(position.x, position.y);
                    }
                    WindowEvent::KeyboardInput {
                        event:
                            KeyEvent {
                                physical_key: PhysicalKey::Code(key),
                                state,
                                ..
                            },
                        ..
                    } => app.handle_key(*key, *state),
                    WindowEvent::MouseWheel { delta, .. } => {
                        let scroll = match delta {
                            MouseScrollDelta::LineDelta(_, y) => *y,
                            MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 100.0,
                        };
                        app.handle_scroll(scroll);
                    }
                    WindowEvent::RedrawRequested => {
                        let now = Instant::now();
                        let wall_dt = (now - last_time).as_secs_f32();
                        last_time = now;

                        app.update(wall_dt);
                        match app.render() {
                            Ok(_) => {}
                            Err(wgpu::SurfaceError::Lost) => app.resize(app.ctx.size),
                            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                            Err(e) => error!("render error: {e:?}"),
                        }
                    }
                    _ => {}
                }
            }
            Event::AboutToWait => {
                app.ctx.window.request_redraw();
            }
            _ => {}
        }
    });

    if let Err(err) = result {
        error!("event loop error: {err}");
        std::process::exit(1);
    }
}
