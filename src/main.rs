//! Pixel Realm entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

    use pixel_realm::consts::*;
    use pixel_realm::renderer::CanvasRenderer;
    use pixel_realm::sim::{HudSnapshot, Viewport};
    use pixel_realm::{GameError, GameLoop, Settings};

    const CANVAS_ID: &str = "gameCanvas";

    /// Game instance holding all state
    struct Game {
        game_loop: GameLoop,
        renderer: CanvasRenderer,
        document: Document,
        /// Last values written to the page
        shown: Option<HudSnapshot>,
    }

    impl Game {
        /// Update score/health elements; absent elements are skipped
        fn update_hud(&mut self) {
            let hud = self.game_loop.hud();
            if self.shown == Some(hud) {
                return;
            }

            if let Some(el) = self.document.get_element_by_id("scoreDisplay") {
                el.set_text_content(Some(&hud.player_points.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("healthDisplay") {
                el.set_text_content(Some(&hud.life_points.to_string()));
            }
            self.shown = Some(hud);
        }
    }

    /// Host clock in ms; every frame is measured against the same source
    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn surface(what: &str) -> GameError {
        GameError::SurfaceMissing(what.to_string())
    }

    pub fn run() -> Result<(), GameError> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"logger already initialised".into());
        }

        log::info!("Pixel Realm starting...");

        let window = web_sys::window().ok_or_else(|| surface("no window"))?;
        let document = window.document().ok_or_else(|| surface("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| surface("canvas element with id \"gameCanvas\" not found"))?
            .dyn_into()
            .map_err(|_| surface("#gameCanvas is not a canvas"))?;

        canvas.set_width(DEFAULT_VIEWPORT_WIDTH as u32);
        canvas.set_height(DEFAULT_VIEWPORT_HEIGHT as u32);
        let renderer = CanvasRenderer::new(&canvas)?;

        let settings =
            Settings::from_json(&canvas.get_attribute("data-settings").unwrap_or_default())?;

        let seed = js_sys::Date::now() as u64;
        let started_at = now_ms();
        let game_loop = GameLoop::new(
            settings,
            Viewport::default(),
            Box::new(Pcg32::seed_from_u64(seed)),
            started_at,
        );
        log::info!("Game initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            game_loop,
            renderer,
            document,
            shown: None,
        }));

        setup_input_handlers(&window, game.clone());
        setup_resize(&window, &canvas, game.clone());

        request_animation_frame(game);

        log::info!("Pixel Realm running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) {
        // Key press
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.code();
                if g.game_loop.captures_key(&code) {
                    event.prevent_default();
                }
                g.game_loop.key_down(&code);
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key release
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().game_loop.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Focus loss: key-up events never arrive, so forget everything held
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().game_loop.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(window: &web_sys::Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (w, h) = (canvas.client_width(), canvas.client_height());
            if w <= 0 || h <= 0 {
                return;
            }
            canvas.set_width(w as u32);
            canvas.set_height(h as u32);
            game.borrow_mut().game_loop.resize(w as f32, h as f32);
            log::debug!("Viewport resized to {}x{}", w, h);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game, now_ms());
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let Game {
                game_loop,
                renderer,
                ..
            } = &mut *g;

            if let Err(e) = game_loop.frame(time, renderer) {
                log::error!("Frame failed, stopping: {}", e);
                return;
            }
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use pixel_realm::renderer::{Frame, Renderer};
    use pixel_realm::sim::{GamePhase, Viewport};
    use pixel_realm::{GameError, GameLoop, Settings};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const FRAMES: u32 = 1800;

    /// Counts frames instead of drawing them
    #[derive(Default)]
    struct FrameCounter {
        frames: u64,
        tiles: usize,
    }

    impl Renderer for FrameCounter {
        fn draw(&mut self, frame: &Frame) -> Result<(), GameError> {
            self.frames += 1;
            self.tiles += frame.tiles.len();
            Ok(())
        }
    }

    /// Scripted run: walk right, hopping, swinging and dashing on a rhythm
    pub fn run() -> Result<(), GameError> {
        let mut game = GameLoop::new(
            Settings::default(),
            Viewport::default(),
            Box::new(Pcg32::seed_from_u64(42)),
            0.0,
        );
        let mut out = FrameCounter::default();

        game.key_down("Enter");
        game.key_down("KeyD");
        for n in 0..FRAMES {
            let beat = |period: u32, length: u32| n % period < length;
            for (code, held) in [
                ("Space", beat(45, 10)),
                ("KeyK", beat(30, 1)),
                ("ShiftLeft", beat(120, 1)),
                ("KeyR", game.state().phase == GamePhase::GameOver),
            ] {
                if held {
                    game.key_down(code);
                } else {
                    game.key_up(code);
                }
            }

            game.frame(f64::from(n + 1) * FRAME_MS, &mut out)?;
            if n == 0 {
                game.key_up("Enter");
            }

            if (n + 1) % 300 == 0 {
                let hud = game.hud();
                log::info!(
                    "frame {}: {} points, {} life, hero x {:.0}",
                    n + 1,
                    hud.player_points,
                    hud.life_points,
                    game.state().hero.pos.x
                );
            }
        }

        let hud = game.hud();
        println!(
            "{} frames, {:.1} tiles/frame, {} points, {} life",
            out.frames,
            out.tiles as f64 / out.frames.max(1) as f64,
            hud.player_points,
            hud.life_points
        );
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pixel Realm (native) starting headless run...");
    log::info!("The playable build targets wasm32 - run with `trunk serve` for the web version");

    if let Err(e) = headless::run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
