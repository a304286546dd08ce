// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Strata Engine Sandbox
// Main binary for testing and demos

use anyhow::Result;
use strata_sdk::prelude::*;
use strata_sdk::{Application, Engine, EngineConfig, EngineContext, UpdateContext};

/// Scene-units per second the view pans at.
const MOVE_SPEED: f32 = 0.6;
/// Degrees per second the view rotates at.
const ROTATE_SPEED: f32 = 90.0;

/// A colored triangle in clip-ish scene space.
fn triangle() -> RenderObject {
    RenderObject {
        vertices: vec![
            Vertex {
                position: [-0.5, -0.5, 0.0],
                color: [0.8, 0.2, 0.8, 1.0],
            },
            Vertex {
                position: [0.5, -0.5, 0.0],
                color: [0.2, 0.3, 0.8, 1.0],
            },
            Vertex {
                position: [0.0, 0.5, 0.0],
                color: [0.8, 0.8, 0.2, 1.0],
            },
        ],
        indices: vec![0, 1, 2],
    }
}

/// The flat blue square drawn behind the triangle.
fn square() -> RenderObject {
    const BLUE: [f32; 4] = [0.2, 0.3, 0.8, 1.0];
    RenderObject {
        vertices: vec![
            Vertex {
                position: [-0.75, -0.75, 0.0],
                color: BLUE,
            },
            Vertex {
                position: [0.75, -0.75, 0.0],
                color: BLUE,
            },
            Vertex {
                position: [0.75, 0.75, 0.0],
                color: BLUE,
            },
            Vertex {
                position: [-0.75, 0.75, 0.0],
                color: BLUE,
            },
        ],
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

/// Column-major pan+rotate matrix for the scene view.
fn view_matrix(position: [f32; 2], rotation_degrees: f32) -> [[f32; 4]; 4] {
    let (sin, cos) = rotation_degrees.to_radians().sin_cos();
    [
        [cos, sin, 0.0, 0.0],
        [-sin, cos, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [position[0], position[1], 0.0, 1.0],
    ]
}

/// A regular layer that narrates interesting events to the log.
struct EventEchoLayer;

impl Layer for EventEchoLayer {
    fn name(&self) -> &str {
        "EventEcho"
    }

    fn on_event(&mut self, event: &mut Event) {
        let mut dispatcher = EventDispatcher::new(event);
        dispatcher.dispatch(EventKind::KeyPressed, |data| {
            if let EventData::KeyPressed { key_code, repeat } = data {
                log::debug!("Key pressed: {key_code} (repeat: {repeat})");
            }
            false
        });
        dispatcher.dispatch(EventKind::MouseButtonPressed, |data| {
            log::debug!("Mouse press: {data:?}");
            false
        });
    }
}

/// An overlay layer drawing a small debug HUD through the egui context.
#[derive(Default)]
struct DebugHudLayer {
    frames: u64,
    events_seen: u64,
}

impl Layer for DebugHudLayer {
    fn name(&self) -> &str {
        "DebugHud"
    }

    fn on_update(&mut self) {
        self.frames += 1;
    }

    fn on_event(&mut self, _event: &mut Event) {
        self.events_seen += 1;
    }

    fn on_overlay_render(&mut self, ctx: &egui::Context) {
        egui::Window::new("Strata Debug")
            .default_open(true)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("Frames: {}", self.frames));
                ui.label(format!("Events seen: {}", self.events_seen));
                ui.separator();
                ui.label("WASD pans, Q/E rotates, Space resets.");
            });
    }
}

/// The demo application: a triangle over a square, panned and rotated with
/// the keyboard.
struct SandboxApp {
    position: [f32; 2],
    rotation_degrees: f32,
}

impl Application for SandboxApp {
    fn new(context: EngineContext<'_>) -> Self {
        let (width, height) = context.window.inner_size();
        log::info!("SandboxApp booting against a {width}x{height} window.");

        context.layers.push_layer(Box::new(EventEchoLayer));
        context.layers.push_overlay(Box::new(DebugHudLayer::default()));

        Self {
            position: [0.0, 0.0],
            rotation_degrees: 0.0,
        }
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) {
        let step = MOVE_SPEED * ctx.delta_seconds;
        if ctx.input.is_key_pressed("KeyW") {
            self.position[1] += step;
        }
        if ctx.input.is_key_pressed("KeyS") {
            self.position[1] -= step;
        }
        if ctx.input.is_key_pressed("KeyA") {
            self.position[0] -= step;
        }
        if ctx.input.is_key_pressed("KeyD") {
            self.position[0] += step;
        }
        if ctx.input.is_key_pressed("KeyQ") {
            self.rotation_degrees += ROTATE_SPEED * ctx.delta_seconds;
        }
        if ctx.input.is_key_pressed("KeyE") {
            self.rotation_degrees -= ROTATE_SPEED * ctx.delta_seconds;
        }
        if ctx.input.is_key_pressed("Space") {
            self.position = [0.0, 0.0];
            self.rotation_degrees = 0.0;
        }
    }

    fn render(&mut self) -> Vec<RenderObject> {
        vec![square(), triangle()]
    }

    fn view(&self) -> SceneView {
        SceneView {
            clear_color: LinearRgba::new(0.2, 0.1, 0.2, 1.0),
            view_projection: view_matrix(self.position, self.rotation_degrees),
        }
    }
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info"))
        .filter_module("wgpu_hal", log::LevelFilter::Error)
        .init();

    let config = EngineConfig::from_json(r#"{ "window": { "title": "Strata Sandbox" } }"#)?;
    Engine::run_with_config::<SandboxApp>(config)?;
    Ok(())
}
