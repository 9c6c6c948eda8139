//! Sea Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent};

    use sea_jump::audio::AudioManager;
    use sea_jump::consts::*;
    use sea_jump::renderer::{self, RenderState};
    use sea_jump::sim::{GameEvent, GamePhase, GameSession, pointer_down, pointer_up, tick};
    use sea_jump::{Settings, Tuning};

    /// How long the "+N" popup stays up (ms)
    const POPUP_MS: f64 = 800.0;

    /// Game instance holding all state
    struct Game {
        session: GameSession,
        settings: Settings,
        audio: AudioManager,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        /// Hide the points popup after this time
        popup_until: f64,
    }

    impl Game {
        fn new(session: GameSession, settings: Settings) -> Self {
            Self {
                audio: AudioManager::new(&settings),
                session,
                settings,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                popup_until: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= TICK_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.session, time);
                self.accumulator -= TICK_DT;
                substeps += 1;
            }
            if !self.session.phase.is_running() {
                self.accumulator = 0.0;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Calculate FPS from oldest to newest frame
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Hand queued core events to audio and the HUD
        fn flush_events(&mut self, time: f64) {
            let events: Vec<GameEvent> = self.session.drain_events().collect();
            for event in &events {
                self.audio.handle(event);
                if let GameEvent::Landed { points, .. } = event {
                    show_popup(*points);
                    self.popup_until = time + POPUP_MS;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let snapshot = self.session.snapshot();
            let vertices = renderer::scene(
                &snapshot,
                &self.session.tuning,
                &self.settings,
                (time / 1000.0) as f32,
            );
            match render_state.render(&vertices, snapshot.camera.pos) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, time: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let phase = self.session.phase;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.session.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    el.set_text_content(Some(&format!("{} fps", self.fps)));
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            set_visible(&document, "start-screen", phase == GamePhase::NotStarted);
            set_visible(&document, "game-over", phase == GamePhase::GameOver);
            if phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.session.score.to_string()));
                }
            }

            if time > self.popup_until {
                set_visible(&document, "points-popup", false);
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn show_popup(points: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("points-popup") {
            el.set_text_content(Some(&format!("+{}", points)));
            let class = if points > 1 { "perfect" } else { "" };
            let _ = el.set_attribute("class", class);
        }
    }

    /// Tuning override from an inline `<script id="tuning" type="application/json">`
    fn load_tuning(document: &web_sys::Document) -> Result<Tuning, sea_jump::TuningError> {
        match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) if !json.trim().is_empty() => Tuning::from_json(&json),
            _ => Ok(Tuning::default()),
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
        }

        log::info!("Sea Jump starting...");

        let Some(window) = web_sys::window() else {
            log::error!("no window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("no document");
            return;
        };

        let mut settings = Settings::default();
        if let Ok(query) = window.location().search() {
            settings.apply_query(&query);
        }

        let tuning = match load_tuning(&document) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("Invalid tuning, refusing to start: {}", e);
                return;
            }
        };

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("no canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let session = match GameSession::new(seed, tuning) {
            Ok(session) => session,
            Err(e) => {
                log::error!("Invalid tuning, refusing to start: {}", e);
                return;
            }
        };
        let view = session.view();
        let game = Rc::new(RefCell::new(Game::new(session, settings)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        match RenderState::new(surface, &adapter, width, height, view).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Renderer setup failed: {}", e),
                        }
                    }
                    Err(e) => log::error!("Failed to get adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        setup_input_handlers(&canvas, game.clone());
        setup_focus_handlers(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Sea Jump running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Press on the canvas
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                let now = event.time_stamp();
                pointer_down(&mut g.session, now);
                g.flush_events(now);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release anywhere, so a drag off the canvas still launches
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut g = game.borrow_mut();
                let now = event.time_stamp();
                pointer_up(&mut g.session, now);
                g.flush_events(now);
            });
            let _ = window
                .add_event_listener_with_callback("pointerup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard: Space / Enter behave like the pointer
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() || !matches!(event.key().as_str(), " " | "Enter") {
                    return;
                }
                event.prevent_default();
                let mut g = game.borrow_mut();
                let now = event.time_stamp();
                pointer_down(&mut g.session, now);
                g.flush_events(now);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if !matches!(event.key().as_str(), " " | "Enter") {
                    return;
                }
                let mut g = game.borrow_mut();
                let now = event.time_stamp();
                pointer_up(&mut g.session, now);
                g.flush_events(now);
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        for (name, muted) in [("blur", true), ("focus", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(muted);
                    log::info!("Audio {} ({})", if muted { "muted" } else { "unmuted" }, name);
                }
            });
            let _ = window.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                TICK_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.flush_events(time);
            g.render(time);
            g.update_hud(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use sea_jump::Tuning;
    use sea_jump::sim::{GameEvent, GamePhase, GameSession, plan_hold, pointer_down, pointer_up, tick};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sea Jump (native) starting...");
    log::info!("Native mode runs the autopilot headless - run with `trunk serve` for the web version");

    // Usage: sea-jump [jumps] [tuning.json]
    let mut args = std::env::args().skip(1);
    let jumps: u32 = match args.next() {
        Some(arg) => arg.parse().with_context(|| format!("invalid jump count {arg:?}"))?,
        None => 50,
    };
    let tuning = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {path}"))?;
            Tuning::from_json(&json).with_context(|| format!("loading tuning file {path}"))?
        }
        None => Tuning::default(),
    };

    let seed = std::env::var("SEA_JUMP_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);
    let mut session = GameSession::new(seed, tuning)?;
    log::info!("Seed {}, {} jumps", seed, jumps);

    let frame_ms = 1000.0 / f64::from(sea_jump::consts::TICK_HZ);
    let mut now = 0.0;
    pointer_down(&mut session, now);

    let mut perfect = 0;
    for jump in 1..=jumps {
        let Some(plan) = plan_hold(&session) else {
            break;
        };
        log::debug!("Jump {}: hold {}ms, miss by {:?}", jump, plan.hold_ms, plan.miss_by);

        pointer_down(&mut session, now);
        now += plan.hold_ms;
        pointer_up(&mut session, now);
        while session.phase == GamePhase::Airborne {
            now += frame_ms;
            tick(&mut session, now);
        }

        for event in session.drain_events() {
            match event {
                GameEvent::Landed { points, .. } if points > 1 => perfect += 1,
                GameEvent::GameOver { score } => log::info!("Fell into the sea with {} points", score),
                _ => {}
            }
        }
        if session.phase == GamePhase::GameOver {
            break;
        }
        // Settle between jumps
        for _ in 0..10 {
            now += frame_ms;
            tick(&mut session, now);
        }
    }

    println!(
        "score {} ({} perfect landings), camera at x={:.1}, phase {:?}",
        session.score, perfect, session.camera.pos.x, session.phase
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
