//! Cactus Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

    use cactus_dash::{InputEvent, InputHandler, Session, Surface, Tuning, present};

    /// Frames longer than this are clamped (tab switches, breakpoints)
    const MAX_FRAME_MS: f64 = 100.0;

    /// The page's DOM as a rendering surface
    struct DomSurface {
        document: Document,
        container: Element,
        dino: Element,
        score: Element,
        instructions: HtmlElement,
        game_over: HtmlElement,
        obstacles: HashMap<u32, HtmlElement>,
    }

    impl DomSurface {
        fn set_display(el: &HtmlElement, visible: bool) {
            let value = if visible { "block" } else { "none" };
            let _ = el.style().set_property("display", value);
        }
    }

    impl Surface for DomSurface {
        fn create_obstacle_view(&mut self, id: u32, width: f32, height: f32) {
            let Some(el) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                log::warn!("Could not create view for obstacle {}", id);
                return;
            };
            let _ = el.class_list().add_1("obstacle");
            let style = el.style();
            let _ = style.set_property("width", &format!("{}px", width));
            let _ = style.set_property("height", &format!("{}px", height));
            let _ = style.set_property("right", &format!("{}px", -width));
            let _ = self.container.append_child(&el);
            self.obstacles.insert(id, el);
        }

        fn destroy_obstacle_view(&mut self, id: u32) {
            if let Some(el) = self.obstacles.remove(&id) {
                el.remove();
            }
        }

        fn set_obstacle_offset(&mut self, id: u32, right_offset: f32) {
            if let Some(el) = self.obstacles.get(&id) {
                let _ = el
                    .style()
                    .set_property("right", &format!("{}px", right_offset));
            }
        }

        fn set_player_jumping(&mut self, jumping: bool) {
            let classes = self.dino.class_list();
            let _ = if jumping {
                classes.add_1("jump")
            } else {
                classes.remove_1("jump")
            };
        }

        fn set_score_text(&mut self, score: u64) {
            self.score.set_text_content(Some(&format!("Score: {}", score)));
        }

        fn set_game_over_visible(&mut self, visible: bool) {
            Self::set_display(&self.game_over, visible);
        }

        fn set_instructions_visible(&mut self, visible: bool) {
            Self::set_display(&self.instructions, visible);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        input: InputHandler,
        surface: DomSurface,
        last_time: f64,
        /// Sub-millisecond remainder carried between frames
        carry_ms: f64,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            self.carry_ms += dt;
            let whole_ms = self.carry_ms.floor();
            self.carry_ms -= whole_ms;
            self.session.advance(whole_ms as u64);

            present(&mut self.surface, &mut self.session);
        }

        fn handle_input(&mut self, event: &InputEvent) {
            self.input.handle(&mut self.session, event);
            present(&mut self.surface, &mut self.session);
        }

        fn restart(&mut self) {
            self.session.restart();
            present(&mut self.surface, &mut self.session);
        }
    }

    /// Tuning from `<script id="tuning" type="application/json">`, sized to the container
    fn load_tuning(document: &Document, container: &Element) -> Tuning {
        let mut tuning = match document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        {
            Some(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from page");
                    tuning
                }
                Err(e) => {
                    log::warn!("Ignoring tuning block: {}", e);
                    Tuning::default()
                }
            },
            None => Tuning::default(),
        };

        let width = container.client_width();
        let height = container.client_height();
        if width > 0 && height > 0 {
            tuning.playfield_width = width as f32;
            tuning.playfield_height = height as f32;
        }
        tuning
    }

    fn html_element(document: &Document, id: &str) -> HtmlElement {
        document
            .get_element_by_id(id)
            .unwrap_or_else(|| panic!("missing #{}", id))
            .dyn_into()
            .unwrap_or_else(|_| panic!("#{} is not an HTML element", id))
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Cactus Dash starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let container: Element = html_element(&document, "game-container").into();
        let dino: Element = html_element(&document, "dino").into();
        let score: Element = html_element(&document, "score").into();
        let instructions = html_element(&document, "instructions");
        let game_over = html_element(&document, "game-over");

        instructions.set_text_content(Some("Press Space or click to start and jump"));

        let tuning = load_tuning(&document, &container);
        let seed = js_sys::Date::now() as u64;
        log::info!("Session seeded with {}", seed);

        let surface = DomSurface {
            document: document.clone(),
            container: container.clone(),
            dino,
            score,
            instructions,
            game_over,
            obstacles: HashMap::new(),
        };
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(seed, tuning),
            input: InputHandler::new(),
            surface,
            last_time: 0.0,
            carry_ms: 0.0,
        }));

        setup_input_handlers(&document, &container, game.clone());
        setup_restart_button(&document, game.clone());

        request_animation_frame(game);

        log::info!("Cactus Dash running!");
    }

    fn setup_input_handlers(document: &Document, container: &Element, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let input = InputEvent::key(event.code());
                if input.is_jump() {
                    // Keep Space from scrolling the page
                    event.prevent_default();
                }
                game.borrow_mut().handle_input(&input);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click/tap on the playfield
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle_input(&InputEvent::PointerActivate);
            });
            let _ = container
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                // Don't let the click reach the container and count as a jump
                event.stop_propagation();
                game.borrow_mut().restart();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        game.borrow_mut().update(time);
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
    log::info!("Cactus Dash (native) starting...");
    log::info!("Native mode runs a headless autopilot demo - build for wasm32 to play");

    run_autopilot_demo(120_000);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Let the bot play for up to `duration_ms` of simulated time
#[cfg(not(target_arch = "wasm32"))]
fn run_autopilot_demo(duration_ms: u64) {
    use cactus_dash::sim::Playfield;
    use cactus_dash::sim::autopilot::should_jump;
    use cactus_dash::{InputEvent, InputHandler, Session, Tuning};

    const FRAME_MS: u64 = 16;

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let mut session = Session::new(seed, Tuning::classic_random_cactus());
    let mut input = InputHandler::new();
    let playfield = Playfield::from_tuning(session.tuning());

    input.handle(&mut session, &InputEvent::key("Space"));
    while session.now_ms() < duration_ms && !session.is_over() {
        if should_jump(&session, &playfield) {
            input.handle(&mut session, &InputEvent::PointerActivate);
        }
        session.advance(FRAME_MS);
        session.drain_events();
    }

    let outcome = if session.is_over() { "crashed" } else { "survived" };
    log::info!(
        "Autopilot {} after {:.1}s with score {} (speed {}, spawn every {} ms)",
        outcome,
        session.now_ms() as f64 / 1000.0,
        session.score(),
        session.speed(),
        session.spawn_interval_ms()
    );
    match serde_json::to_string(&session.stats()) {
        Ok(json) => println!("{}", json),
        Err(e) => log::warn!("Could not serialize stats: {}", e),
    }
}
