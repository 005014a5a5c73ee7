//! School Rush entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use glam::Vec2;
    use school_rush::audio::{AudioManager, SoundEffect};
    use school_rush::consts::*;
    use school_rush::platform::LocalStorageStore;
    use school_rush::renderer::CanvasRenderer;
    use school_rush::scores::BestScore;
    use school_rush::settings::Settings;
    use school_rush::sim::{GameEvent, RoundPhase, RoundState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: RoundState,
        renderer: Option<CanvasRenderer>,
        audio: AudioManager,
        store: LocalStorageStore,
        best: BestScore,
        settings: Settings,
        input: TickInput,
        last_time: f64,
        /// Set once the running round has beaten the stored best
        new_best_this_round: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, playfield: Vec2) -> Self {
            let settings = Settings::load();
            let store = LocalStorageStore::new();
            let best = BestScore::load(&store);

            let mut audio = AudioManager::new();
            audio.set_master_volume(settings.master_volume);
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_muted(settings.muted);

            Self {
                state: RoundState::new(seed, playfield),
                renderer: None,
                audio,
                store,
                best,
                settings,
                input: TickInput::default(),
                last_time: 0.0,
                new_best_this_round: false,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the simulation by one frame delta and drain its cues
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            tick(&mut self.state, &self.input, dt);

            for event in self.state.drain_events() {
                match event {
                    GameEvent::CommonCaught(_) => self.audio.play(SoundEffect::CommonCatch),
                    GameEvent::BonusCaught => self.audio.play(SoundEffect::BonusCatch),
                    GameEvent::PenaltyCaught => self.audio.play(SoundEffect::PenaltyCatch),
                    GameEvent::RoundOver => {
                        log::info!(
                            "Round over: score {} (best {})",
                            self.state.score,
                            self.best.value()
                        );
                        if self.new_best_this_round {
                            self.audio.play(SoundEffect::NewBest);
                        } else {
                            self.audio.play(SoundEffect::RoundOver);
                        }
                    }
                }
            }

            // Persist the best score as soon as it's beaten, not at round end
            if self.best.offer(self.state.score, &mut self.store) {
                if !self.new_best_this_round {
                    log::info!("New best score: {}", self.best.value());
                }
                self.new_best_this_round = true;
            }

            // Track frame times for the FPS readout
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&self) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, self.settings.effective_screen_shake());
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            let set_value = |selector: &str, text: &str| {
                if let Some(el) = document.query_selector(selector).ok().flatten() {
                    el.set_text_content(Some(text));
                }
            };

            set_value("#hud-score .hud-value", &self.state.score.to_string());
            set_value("#hud-lives .hud-value", &self.state.lives.to_string());
            set_value(
                "#hud-time .hud-value",
                &format!("{:.0}", self.state.time_remaining.ceil()),
            );
            set_value("#hud-best .hud-value", &self.best.value().to_string());

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    set_value("#hud-fps .hud-value", &self.fps.to_string());
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Game-over overlay
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == RoundPhase::Over {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(best_el) = document.get_element_by_id("final-best") {
                        best_el.set_text_content(Some(&self.best.value().to_string()));
                    }
                    if let Some(tally_el) = document.get_element_by_id("final-tally") {
                        let summary = self
                            .state
                            .tally
                            .iter()
                            .map(|(kind, count)| {
                                format!("{} \u{00D7}{}", kind.profile().glyph, count)
                            })
                            .collect::<Vec<_>>()
                            .join("  ");
                        tally_el.set_text_content(Some(&summary));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }

        /// Space/Enter and the play-again button land here
        fn primary_action(&mut self) {
            match self.state.phase {
                RoundPhase::NotStarted => {
                    self.state.start();
                    log::info!("Round started (seed {})", self.state.seed);
                }
                RoundPhase::Over => self.reset_round(),
                RoundPhase::Running => {}
            }
        }

        /// Explicit reset signal (R key, play-again after a round):
        /// abandons whatever is in progress and starts fresh
        fn reset_round(&mut self) {
            let seed = js_sys::Date::now() as u64;
            self.state.reset(seed);
            self.new_best_this_round = false;
            log::info!("Round reset (seed {seed})");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("School Rush starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // High-DPI setup: backing store scaled up, drawing in CSS pixels
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width() as f32;
        let client_h = canvas.client_height() as f32;
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("context request failed")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        let _ = ctx.scale(dpr, dpr);

        let seed = js_sys::Date::now() as u64;
        let playfield = Vec2::new(client_w, client_h);
        let game = Rc::new(RefCell::new(Game::new(seed, playfield)));
        game.borrow_mut().renderer = Some(CanvasRenderer::new(ctx, client_w, client_h));

        log::info!("Game initialized with seed: {seed}");

        setup_keyboard(game.clone());
        setup_play_again_button(game.clone());
        setup_blur_mute(game.clone());
        setup_resize(&canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("School Rush running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key-down latches movement; Space/Enter drives the lifecycle
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.move_left = true,
                    "ArrowRight" | "d" | "D" => g.input.move_right = true,
                    " " | "Enter" => g.primary_action(),
                    "r" | "R" => g.reset_round(),
                    "m" | "M" => {
                        g.settings.muted = !g.settings.muted;
                        g.audio.set_muted(g.settings.muted);
                        g.settings.save();
                        log::info!("Audio muted: {}", g.settings.muted);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key-up clears the latches
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => g.input.move_left = false,
                    "ArrowRight" | "d" | "D" => g.input.move_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_play_again_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        if let Some(btn) = document.get_element_by_id("play-again-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().primary_action();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Mute while the window is unfocused (when enabled in settings)
    fn setup_blur_mute(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                // Drop any stuck movement latches while unfocused
                g.input = TickInput::default();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    // Back to whatever the player had chosen
                    let muted = g.settings.muted;
                    g.audio.set_muted(muted);
                }
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Track window resizes: new backing store, new playfield, catcher
    /// re-parked at the bottom center
    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width() as f32;
            let client_h = canvas.client_height() as f32;
            canvas.set_width((client_w as f64 * dpr) as u32);
            canvas.set_height((client_h as f64 * dpr) as u32);

            let mut g = game.borrow_mut();
            g.state.set_playfield(Vec2::new(client_w, client_h));
            if let Some(renderer) = g.renderer.as_mut() {
                renderer.resize(client_w, client_h, dpr);
            }
            log::info!("Resized playfield to {client_w}x{client_h}");
        });
        let _ =
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // First frame has no previous sample; a zero dt tick is a no-op
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt, time);
            g.render();
            g.update_hud();
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
    log::info!("School Rush (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    demo_round();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a simple chase policy plays one full round
#[cfg(not(target_arch = "wasm32"))]
fn demo_round() {
    use glam::Vec2;
    use school_rush::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
    use school_rush::sim::{KindClass, RoundState, TickInput, tick};

    let mut state = RoundState::new(0xC0FFEE, Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT));
    state.start();

    let dt = 1.0 / 60.0;
    while !state.is_over() {
        // Chase the lowest non-penalty item
        let target = state
            .items
            .iter()
            .filter(|item| item.kind.class() != KindClass::Penalty)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|item| item.pos.x);

        let center = state.catcher.pos.x + state.catcher.size.x / 2.0;
        let input = match target {
            Some(x) if x < center - 2.0 => TickInput {
                move_left: true,
                move_right: false,
            },
            Some(x) if x > center + 2.0 => TickInput {
                move_left: false,
                move_right: true,
            },
            _ => TickInput::default(),
        };

        tick(&mut state, &input, dt);
        let _ = state.drain_events();
    }

    println!(
        "Demo round over: score {}, items caught {}, lives left {}",
        state.score,
        state.tally.total(),
        state.lives
    );
}
