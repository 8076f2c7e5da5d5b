//! Island Walk - headless host
//!
//! Run with: `cargo run --bin island_walk`
//!
//! Opens a window for keyboard focus and drives the island session from the
//! frame loop. Nothing is drawn; the player's position, animation and music
//! triggers are logged instead (`RUST_LOG=debug` for every collision and fade).
//!
//! Controls:
//! - A / D: Walk around the island
//! - Shift: Toggle run / walk
//! - Space: Jump
//! - E (hold): Dance while standing in a dance zone
//! - ESC: Exit
//!
//! Config files are read from the working directory when present:
//! `settings.json`, `tuning.json`, `layout.json`.
//!
//! Browser (wasm): build with `cargo build --bin island_walk --target wasm32-unknown-unknown`,
//! then run `wasm-bindgen` and serve.

use std::path::Path;
use std::sync::Arc;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use anyhow::Context;
use serde::de::DeserializeOwned;
use tracing::{info, warn};
use web_time::Instant;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode as WinitKey, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use island_walk_engine::game::config::load_or_default;
use island_walk_engine::game::{AudioLedger, CharacterTuning, GameSettings, IslandLayout, IslandSession};
use island_walk_engine::input::{KeyCode, KeyboardState};
use island_walk_engine::player::{Action, BlendMixer, FrameTime};

/// Map winit physical keys onto engine key codes.
fn map_key(key: WinitKey) -> KeyCode {
    match key {
        WinitKey::KeyW => KeyCode::W,
        WinitKey::KeyA => KeyCode::A,
        WinitKey::KeyS => KeyCode::S,
        WinitKey::KeyD => KeyCode::D,
        WinitKey::KeyE => KeyCode::E,
        WinitKey::Space => KeyCode::Space,
        WinitKey::ShiftLeft => KeyCode::ShiftLeft,
        WinitKey::ShiftRight => KeyCode::ShiftRight,
        _ => KeyCode::Unknown,
    }
}

/// Read an optional JSON config file; a missing file silently means defaults.
fn load_config<T: DeserializeOwned + Default>(path: &str) -> T {
    if Path::new(path).exists() {
        load_or_default(path)
    } else {
        T::default()
    }
}

struct IslandWalkApp {
    window: Option<Arc<Window>>,
    session: IslandSession,
    keyboard: KeyboardState,
    mixer: BlendMixer,
    audio: AudioLedger,
    start_time: Instant,
    last_frame: Instant,
    last_status: Instant,
    last_action: Option<Action>,
}

impl IslandWalkApp {
    fn new(session: IslandSession) -> Self {
        let now = Instant::now();
        Self {
            window: None,
            session,
            keyboard: KeyboardState::new(),
            mixer: BlendMixer::with_clips(Action::ALL.iter().map(|a| a.clip_name())),
            audio: AudioLedger::new(),
            start_time: now,
            last_frame: now,
            last_status: now,
            last_action: None,
        }
    }

    fn initialize(&mut self, window: Arc<Window>) {
        let size = window.inner_size();
        self.session.on_resize(size.width, size.height);

        // The character is available immediately; there is no asset loader here.
        let frame = FrameTime::new(0.0, self.start_time.elapsed());
        self.session.spawn_player(frame, &mut self.mixer);

        window.request_redraw();
        self.window = Some(window);
    }

    fn tick(&mut self) {
        let now = Instant::now();
        let delta = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        // Key edges stay pending through a pause and reach the first tick after it.
        if self.session.is_paused() {
            return;
        }

        let frame = FrameTime::new(delta, now.duration_since(self.start_time));
        let input = self.keyboard.snapshot();
        let Some(outcome) = self.session.tick(frame, &input, &mut self.mixer, &mut self.audio) else {
            return;
        };

        if outcome.action != self.last_action {
            if let Some(action) = outcome.action {
                info!(%action, "animation");
            }
            self.last_action = outcome.action;
        }

        if now.duration_since(self.last_status).as_secs_f32() >= 1.0 {
            self.last_status = now;
            if let Some(player) = self.session.player() {
                let p = player.position();
                info!(
                    x = p.x,
                    y = p.y,
                    z = p.z,
                    angle = player.angle(),
                    colliding = player.is_colliding(),
                    "player"
                );
            }
            for prop in self.session.props().iter().filter(|p| p.prompt().visible) {
                info!(prop = prop.id(), progress = prop.prompt().progress, "Hold E");
            }
        }
    }
}

impl ApplicationHandler for IslandWalkApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let attrs = WindowAttributes::default()
                .with_title("Island Walk")
                .with_inner_size(PhysicalSize::new(1280, 720));
            match event_loop.create_window(attrs) {
                Ok(window) => self.initialize(Arc::new(window)),
                Err(err) => {
                    warn!(error = %err, "failed to create window");
                    event_loop.exit();
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if key == WinitKey::Escape && pressed {
                        event_loop.exit();
                        return;
                    }
                    self.keyboard.handle_key(map_key(key), pressed);
                }
            }
            WindowEvent::Focused(false) => self.keyboard.reset(),
            WindowEvent::Resized(size) => {
                self.session.on_resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => {
                self.tick();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }
}

fn build_session() -> anyhow::Result<IslandSession> {
    let settings: GameSettings = load_config("settings.json");
    let tuning: CharacterTuning = load_config("tuning.json");
    let layout: IslandLayout = load_config("layout.json");
    IslandSession::new(settings, tuning, &layout).context("invalid island layout")
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Island Walk - A/D walk, Shift run toggle, Space jump, hold E to dance, ESC exit");

    let session = build_session()?;
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = IslandWalkApp::new(session);
    event_loop.run_app(&mut app)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

/// Browser entry point.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    tracing_subscriber::fmt().without_time().init();

    let session = match build_session() {
        Ok(session) => session,
        Err(err) => {
            warn!(error = %err, "failed to build session");
            return;
        }
    };
    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            warn!(error = %err, "failed to create event loop");
            return;
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = IslandWalkApp::new(session);
    if let Err(err) = event_loop.run_app(&mut app) {
        warn!(error = %err, "event loop exited with error");
    }
}
