//! Tower Climb entry point
//!
//! The browser build runs the game loop on a canvas; the native build runs a
//! headless autopilot climb and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use tower_climb::Settings;
    use tower_climb::Tuning;
    use tower_climb::audio::AudioManager;
    use tower_climb::consts::SIM_DT;
    use tower_climb::renderer::CanvasRenderer;
    use tower_climb::sim::{KeySet, Simulation};

    /// Longest frame gap fed to the run clock (tab switches, breakpoints)
    const MAX_FRAME_DT: f32 = 0.1;
    const HEAD_IMAGE_SRC: &str = "./henderson.png";

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        renderer: Option<CanvasRenderer>,
        keys: KeySet,
        audio: AudioManager,
        settings: Settings,
        autopilot: bool,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.apply_settings(&settings);
            Self {
                sim: Simulation::with_tuning(seed, tuning),
                renderer: None,
                keys: KeySet::new(),
                audio,
                settings,
                autopilot: false,
                last_time: 0.0,
            }
        }

        /// One simulation tick per frame
        fn update(&mut self, dt: f32) {
            let sampled = self.keys.sample();
            let input = if self.autopilot {
                let mut input = self.sim.autopilot_input();
                input.confirm |= sampled.confirm;
                input
            } else {
                sampled
            };

            let snap = self.sim.tick(&input, dt.min(MAX_FRAME_DT));
            self.audio.play_cues(snap.cues);
        }

        fn render(&self, time: f64) {
            if let Some(renderer) = &self.renderer {
                renderer.render(
                    &self.sim.snapshot(),
                    &self.sim.state().tuning,
                    &self.settings,
                    self.autopilot,
                    time,
                );
            }
        }

        fn toggle_autopilot(&mut self) {
            self.autopilot = !self.autopilot;
            log::info!("Autopilot: {}", self.autopilot);
        }

        fn toggle_mute(&mut self) {
            self.settings.toggle_mute();
            self.audio.apply_settings(&self.settings);
            self.settings.save();
            log::info!("Muted: {}", self.settings.muted);
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Tower Climb starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let tuning = Tuning::load();
        canvas.set_width(tuning.canvas_width as u32);
        canvas.set_height(tuning.canvas_height as u32);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning)));

        match CanvasRenderer::new(&canvas, HEAD_IMAGE_SRC) {
            Ok(renderer) => game.borrow_mut().renderer = Some(renderer),
            Err(e) => log::error!("Canvas unavailable: {:?}", e),
        }

        setup_input_handlers(game.clone(), &canvas);
        request_animation_frame(game);
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>, canvas: &HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                let code = event.code();
                match code.as_str() {
                    "KeyI" if !event.repeat() => g.toggle_autopilot(),
                    "KeyM" if !event.repeat() => g.toggle_mute(),
                    _ => {
                        if g.keys.key_down(&code).is_some() {
                            // Keep arrows and space from scrolling the page
                            event.prevent_default();
                        }
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                // Key-ups are lost while unfocused
                game.borrow_mut().keys.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.keys.press_confirm();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Tower Climb (native) starting headless autopilot run...");
    log::info!("The playable game is the web build - run with `trunk serve`");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    let max_ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(headless::DEFAULT_MAX_TICKS);

    let summary = headless::climb(seed, tower_climb::Tuning::load(), max_ticks);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to encode summary: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use tower_climb::Tuning;
    use tower_climb::consts::SIM_DT;
    use tower_climb::sim::{GamePhase, Simulation};

    /// Five minutes of play at one tick per frame
    pub const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

    /// Outcome of one unattended run
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub outcome: GamePhase,
        pub floor: u32,
        pub lives: u8,
        pub score: u64,
        pub time_elapsed: f32,
        pub ticks: u64,
    }

    /// Let the autopilot play until the run ends or `max_ticks` pass
    pub fn climb(seed: u64, tuning: Tuning, max_ticks: u64) -> RunSummary {
        let mut sim = Simulation::with_tuning(seed, tuning);
        for _ in 0..max_ticks {
            let input = sim.autopilot_input();
            if sim.tick(&input, SIM_DT).phase.is_terminal() {
                break;
            }
        }

        let state = sim.state();
        match state.phase {
            GamePhase::Victory => log::info!("Autopilot reached the top"),
            GamePhase::GameOver => log::info!("Autopilot ran out of lives on floor {}", state.floor),
            _ => log::warn!("Autopilot stopped after {max_ticks} ticks on floor {}", state.floor),
        }

        RunSummary {
            seed,
            outcome: state.phase,
            floor: state.floor,
            lives: state.player.lives,
            score: state.score,
            time_elapsed: state.time_elapsed,
            ticks: state.time_ticks,
        }
    }
}
