//! Cosmic Collector entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, Event, HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use cosmic_collector::audio::{AudioManager, SoundEffect};
    use cosmic_collector::persistence::{LocalStorage, MemoryStorage, Storage};
    use cosmic_collector::platform::{Action, Control, InputTracker};
    use cosmic_collector::renderer::{RenderState, SceneOptions, build_scene, needs_reconfigure};
    use cosmic_collector::sim::{Achievement, GamePhase};
    use cosmic_collector::ui::{HudView, PAUSE_HINT, PAUSE_TITLE, ResultView, SPEED_DOTS};
    use cosmic_collector::{FrameStatus, Session, SessionResult, Settings};

    /// Longest frame delta fed to the simulation (tab switches stall rAF)
    const MAX_FRAME_DT: f32 = 0.1;

    type BrowserSession = Session<Box<dyn Storage>>;

    /// Game instance holding all state
    struct Game {
        session: BrowserSession,
        render_state: Option<RenderState>,
        input: InputTracker,
        audio: AudioManager,
        scene: SceneOptions,
        last_time: f64,
        /// Last HUD written to the DOM
        last_hud: Option<HudView>,
    }

    impl Game {
        fn new(session: BrowserSession) -> Self {
            let audio = AudioManager::new(session.settings().effective_volume());
            let scene = SceneOptions::from_settings(session.settings());
            Self {
                session,
                render_state: None,
                input: InputTracker::new(),
                audio,
                scene,
                last_time: 0.0,
                last_hud: None,
            }
        }

        /// Start or restart a run and swap the overlays
        fn start(&mut self) {
            self.session.start();
            self.input.clear();
            self.last_time = 0.0;
            self.last_hud = None;

            if let Some(document) = document() {
                set_display(&document, "startScreen", false);
                set_display(&document, "endScreen", false);
            }
        }

        /// Apply a one-shot command from a key or button
        fn apply(&mut self, action: Action) {
            match action {
                Action::Boost => {
                    self.session.trigger_boost(js_sys::Date::now());
                }
                Action::BoostRelease => self.session.release_boost(),
                Action::TogglePause => {
                    self.session.toggle_pause(js_sys::Date::now());
                }
                Action::Restart => {
                    if self.session.can_restart() {
                        self.start();
                    }
                }
                // InputTracker already flipped its flag
                Action::ToggleIdle => {}
            }
            self.play_pending_events();
        }

        fn play_pending_events(&mut self) {
            let events = self.session.drain_events();
            self.audio.play_events(&events);
        }

        /// Advance the simulation by one animation frame
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (((time - self.last_time) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT)
            } else {
                0.0
            };
            self.last_time = time;

            let input = self.input.snapshot();
            let status = self.session.frame(&input, dt, js_sys::Date::now());
            self.play_pending_events();

            if let FrameStatus::Ended(result) = status {
                self.show_results(&result);
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_scene(self.session.state(), time, &self.scene);
            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(e) if needs_reconfigure(&e) => render_state.reconfigure(),
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = HudView::new(self.session.state(), self.session.records());
            if self.last_hud.as_ref() == Some(&hud) {
                return;
            }
            let Some(document) = document() else { return };

            set_text(&document, "time", &hud.time);
            set_text(&document, "score", &hud.score);
            set_text(&document, "speed", &hud.speed);
            set_text(&document, "highScore", &hud.high_score);
            set_text(&document, "bestTime", &hud.best_time);
            set_style(&document, "timeProgress", "width", &format!("{}%", hud.time_percent));
            set_style(&document, "scoreProgress", "width", &format!("{}%", hud.score_percent));

            if let Ok(dots) = document.query_selector_all("#speedDots .dot") {
                for i in 0..dots.length().min(SPEED_DOTS as u32) {
                    if let Some(dot) = dots.get(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                        let _ = dot
                            .class_list()
                            .toggle_with_force("active", (i as usize) < hud.active_speed_dots);
                    }
                }
            }

            show_optional(&document, "comboBanner", hud.combo_banner.as_deref());
            show_optional(&document, "timeWarning", hud.time_warning.as_deref());

            set_display(&document, "pauseOverlay", hud.paused);
            if hud.paused {
                set_text(&document, "pauseTitle", PAUSE_TITLE);
                set_text(&document, "pauseHint", PAUSE_HINT);
            }
            if let Some(btn) = document.get_element_by_id("pauseBtn") {
                let icon = if hud.paused { "play" } else { "pause" };
                btn.set_inner_html(&format!(
                    "<i class=\"fas fa-{}\"></i> {}",
                    icon, hud.pause_button
                ));
            }

            self.last_hud = Some(hud);
        }

        /// Fill and show the end screen
        fn show_results(&self, result: &SessionResult) {
            let Some(document) = document() else { return };
            let view = ResultView::new(result);

            set_text(&document, "resultTitle", view.title);
            set_text(&document, "resultMessage", view.message);
            set_text(&document, "finalScore", &view.final_score);
            set_text(&document, "finalTime", &view.final_time);
            if let Some(icon) = document.get_element_by_id("resultIcon") {
                icon.set_inner_html(&format!("<i class=\"fas fa-{}\"></i>", view.icon));
            }
            set_style(&document, "resultIcon", "color", view.icon_color);

            // Earlier unlocks keep their class; only this run's banners are added
            for banner in &view.banners {
                let id = achievement_element_id(banner.achievement);
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.class_list().add_1("unlocked");
                    el.set_inner_html(&format!(
                        "<i class=\"fas fa-{}\"></i><span>{}</span>",
                        banner.icon, banner.text
                    ));
                }
            }

            set_display(&document, "endScreen", true);
        }

        /// Canvas resized (CSS pixels plus device pixel ratio)
        fn resize(&mut self, css_width: f32, css_height: f32, dpr: f64) {
            self.session.resize(css_width, css_height);
            if let Some(render_state) = self.render_state.as_mut() {
                render_state.resize(
                    (css_width as f64 * dpr) as u32,
                    (css_height as f64 * dpr) as u32,
                    (css_width, css_height),
                );
            }
        }
    }

    fn achievement_element_id(achievement: Achievement) -> &'static str {
        match achievement {
            Achievement::SpeedDemon => "speedAchievement",
            Achievement::TimeMaster => "timeAchievement",
            Achievement::PerfectRun => "perfectAchievement",
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_style(document: &Document, id: &str, property: &str, value: &str) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property(property, value);
        }
    }

    fn set_display(document: &Document, id: &str, visible: bool) {
        set_style(document, id, "display", if visible { "flex" } else { "none" });
    }

    fn show_optional(document: &Document, id: &str, text: Option<&str>) {
        if let Some(text) = text {
            set_text(document, id, text);
        }
        set_style(document, id, "display", if text.is_some() { "block" } else { "none" });
    }

    fn js_error(context: &str, err: impl std::fmt::Debug) -> JsValue {
        JsValue::from_str(&format!("{}: {:?}", context, err))
    }

    /// Open LocalStorage, falling back to memory when the browser blocks it
    fn open_storage() -> Box<dyn Storage> {
        match LocalStorage::open() {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                log::warn!("LocalStorage unavailable ({}), records will not persist", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_error("logger", e))?;

        log::info!("Cosmic Collector starting...");

        let window = web_sys::window().ok_or_else(|| js_error("window", "missing"))?;
        let document = window
            .document()
            .ok_or_else(|| js_error("document", "missing"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| js_error("canvas", "missing #gameCanvas"))?
            .dyn_into()
            .map_err(|e| js_error("canvas", e))?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let css_w = canvas.client_width() as f32;
        let css_h = canvas.client_height() as f32;
        let width = (css_w as f64 * dpr) as u32;
        let height = (css_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let storage = open_storage();
        let settings = Settings::load(&storage);
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(storage, settings, seed, css_w, css_h);
        let game = Rc::new(RefCell::new(Game::new(session)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_error("surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_error("adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, (css_w, css_h)).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("Failed to create device, rendering disabled: {}", e),
        }

        setup_keyboard(game.clone())?;
        setup_buttons(&document, game.clone())?;
        setup_resize(&canvas, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Cosmic Collector running!");
        Ok(())
    }

    fn listen<E, F>(target: &web_sys::EventTarget, name: &str, handler: F) -> Result<(), JsValue>
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = document().ok_or_else(|| js_error("document", "missing"))?;

        {
            let game = game.clone();
            listen(&document, "keydown", move |event: KeyboardEvent| {
                let key = event.key();
                if key == " " {
                    event.prevent_default();
                }
                if event.repeat() && key == " " {
                    return;
                }
                let mut g = game.borrow_mut();
                if let Some(action) = g.input.key_down(&key) {
                    g.apply(action);
                }
            })?;
        }

        {
            let game = game.clone();
            listen(&document, "keyup", move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(action) = g.input.key_up(&event.key()) {
                    g.apply(action);
                }
            })?;
        }

        // Keys released while the window was unfocused never send keyup
        let window = web_sys::window().ok_or_else(|| js_error("window", "missing"))?;
        listen(&window, "blur", move |_event: Event| {
            game.borrow_mut().input.clear();
        })
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in ["startButton", "restartButton"] {
            if let Some(btn) = document.get_element_by_id(id) {
                let game = game.clone();
                listen(&btn, "click", move |_event: Event| {
                    game.borrow_mut().start();
                })?;
            }
        }

        if let Some(btn) = document.get_element_by_id("pauseBtn") {
            let game = game.clone();
            listen(&btn, "click", move |_event: Event| {
                game.borrow_mut().apply(Action::TogglePause);
            })?;
        }

        if let Some(btn) = document.get_element_by_id("boostBtn") {
            for (name, action) in [
                ("mousedown", Action::Boost),
                ("touchstart", Action::Boost),
                ("mouseup", Action::BoostRelease),
                ("touchend", Action::BoostRelease),
            ] {
                let game = game.clone();
                listen(&btn, name, move |event: Event| {
                    if name.starts_with("touch") {
                        event.prevent_default();
                    }
                    game.borrow_mut().apply(action);
                })?;
            }
        }

        for (id, control) in [
            ("upBtn", Control::Up),
            ("downBtn", Control::Down),
            ("leftBtn", Control::Left),
            ("rightBtn", Control::Right),
        ] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            for (name, pressed) in [
                ("mousedown", true),
                ("touchstart", true),
                ("mouseup", false),
                ("mouseleave", false),
                ("touchend", false),
            ] {
                let game = game.clone();
                listen(&btn, name, move |event: Event| {
                    if name.starts_with("touch") {
                        event.prevent_default();
                    }
                    game.borrow_mut().input.set(control, pressed);
                })?;
            }
        }

        // Every button clicks and never opens a context menu
        let buttons = document.query_selector_all("button")?;
        for i in 0..buttons.length() {
            let Some(btn) = buttons.get(i) else { continue };
            {
                let game = game.clone();
                listen(&btn, "click", move |_event: Event| {
                    game.borrow().audio.play(SoundEffect::Click);
                })?;
            }
            listen(&btn, "contextmenu", |event: Event| event.prevent_default())?;
        }

        Ok(())
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| js_error("window", "missing"))?;
        let canvas = canvas.clone();
        listen(&window.clone(), "resize", move |_event: Event| {
            let dpr = window.device_pixel_ratio();
            let css_w = canvas.client_width() as f32;
            let css_h = canvas.client_height() as f32;
            canvas.set_width((css_w as f64 * dpr) as u32);
            canvas.set_height((css_h as f64 * dpr) as u32);
            game.borrow_mut().resize(css_w, css_h, dpr);
        })
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            if g.session.state().phase != GamePhase::Idle {
                g.update(time);
            }
            g.render(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use cosmic_collector::persistence::MemoryStorage;
    use cosmic_collector::sim::TickInput;
    use cosmic_collector::{FrameStatus, Session, Settings};

    env_logger::init();
    log::info!("Cosmic Collector (native) starting...");
    log::info!("Native mode runs a headless autopilot round - use the web build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(42);

    let mut session = Session::new(MemoryStorage::new(), Settings::default(), seed, 800.0, 600.0);
    session.start();

    let dt = 1.0 / 60.0;
    let autopilot = TickInput {
        idle_mode: true,
        ..Default::default()
    };
    let mut now_ms = 0.0;
    let result = loop {
        now_ms += dt as f64 * 1000.0;
        if let FrameStatus::Ended(result) = session.frame(&autopilot, dt, now_ms) {
            break result;
        }
    };

    println!(
        "\nSeed {}: {} - {}/{} stars, {}s left, max combo {}",
        seed,
        if result.won { "MISSION SUCCESS" } else { "MISSION FAILED" },
        result.score,
        result.star_count,
        result.time_left.max(0.0).floor(),
        result.max_combo
    );
    for achievement in &result.achievements {
        println!("  {} Unlocked!", achievement.title());
    }
}
