//! Mini Arcade entry point
//!
//! On wasm32 every game whose canvas exists in the page is mounted and driven
//! by `requestAnimationFrame`. Natively, each game gets a short headless run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlButtonElement, HtmlCanvasElement,
        HtmlSelectElement, KeyboardEvent, MouseEvent,
    };

    use mini_arcade::games::GameKind;
    use mini_arcade::renderer::{RenderCommands, canvas};
    use mini_arcade::sim::{Bounds, GamePhase, InputEvent, Key, PointerButton};
    use mini_arcade::{ControlCommand, Difficulty, FrameDriver, Settings};

    /// Element ids used by one game's page section
    struct DomIds {
        canvas: &'static str,
        start: Option<&'static str>,
        pause: Option<&'static str>,
        reset: &'static str,
        difficulty: Option<&'static str>,
        score: Option<&'static str>,
    }

    fn dom_ids(kind: GameKind) -> DomIds {
        match kind {
            GameKind::Collector => DomIds {
                canvas: "game",
                start: Some("startBtn"),
                pause: Some("pauseBtn"),
                reset: "resetBtn",
                difficulty: Some("difficulty"),
                score: Some("score"),
            },
            GameKind::Chaser => DomIds {
                canvas: "chase",
                start: Some("chaseStart"),
                pause: Some("chasePause"),
                reset: "chaseReset",
                difficulty: Some("chaseDifficulty"),
                score: Some("chaseScore"),
            },
            GameKind::Runner => DomIds {
                canvas: "geo",
                start: None,
                pause: None,
                reset: "retry",
                difficulty: None,
                score: None,
            },
            GameKind::Stickman => DomIds {
                canvas: "stick",
                start: Some("start"),
                pause: Some("pause"),
                reset: "restart",
                difficulty: None,
                score: None,
            },
        }
    }

    /// One mounted game
    struct App {
        driver: FrameDriver,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        ids: DomIds,
        document: Document,
    }

    impl App {
        fn present(&self, frame: &RenderCommands) {
            let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
            if let Err(e) = canvas::present(&self.ctx, w, h, frame) {
                log::warn!("Render error: {:?}", e);
            }
        }

        fn button(&self, id: Option<&str>) -> Option<HtmlButtonElement> {
            id.and_then(|id| self.document.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
        }

        /// Sync button enablement and the score label with the game
        fn update_dom(&self) {
            let controls = self.driver.controls();
            if let Some(btn) = self.button(self.ids.start) {
                btn.set_disabled(!controls.start_enabled);
            }
            if let Some(btn) = self.button(self.ids.pause) {
                btn.set_disabled(!controls.pause_enabled);
            }
            if let Some(el) = self.ids.score.and_then(|id| self.document.get_element_by_id(id)) {
                let text = format!("Score: {}", self.driver.game().score() as u64);
                el.set_text_content(Some(&text));
            }
        }

        /// Re-read the difficulty selector (every frame)
        fn read_difficulty(&mut self) {
            let select = self
                .ids
                .difficulty
                .and_then(|id| self.document.get_element_by_id(id))
                .and_then(|el| el.dyn_into::<HtmlSelectElement>().ok());
            if let Some(select) = select {
                self.driver.set_difficulty(Difficulty::parse(&select.value()));
            }
        }

        /// Pointer position in world coordinates
        fn world_pos(&self, event: &MouseEvent) -> Vec2 {
            let rect = self.canvas.get_bounding_client_rect();
            let sx = if rect.width() > 0.0 {
                self.canvas.width() as f64 / rect.width()
            } else {
                1.0
            };
            let sy = if rect.height() > 0.0 {
                self.canvas.height() as f64 / rect.height()
            } else {
                1.0
            };
            Vec2::new(
                ((event.client_x() as f64 - rect.left()) * sx) as f32,
                ((event.client_y() as f64 - rect.top()) * sy) as f32,
            )
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Mini Arcade starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let settings = Settings::load();

        let mut mounted = 0;
        for kind in GameKind::ALL {
            let ids = dom_ids(kind);
            let Some(element) = document.get_element_by_id(ids.canvas) else {
                continue;
            };
            let canvas: HtmlCanvasElement = element.dyn_into()?;
            mount(kind, canvas, ids, &document, &settings)?;
            mounted += 1;
        }

        log::info!("Mini Arcade running {} game(s)", mounted);
        Ok(())
    }

    fn mount(
        kind: GameKind,
        canvas: HtmlCanvasElement,
        ids: DomIds,
        document: &Document,
        settings: &Settings,
    ) -> Result<(), JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let bounds = Bounds::new(canvas.width() as f32, canvas.height() as f32);
        let seed = settings.seed.unwrap_or(js_sys::Date::now() as u64);
        let driver = FrameDriver::new(kind, seed, bounds, settings);

        let app = Rc::new(RefCell::new(App {
            driver,
            canvas: canvas.clone(),
            ctx,
            ids,
            document: document.clone(),
        }));

        {
            let a = app.borrow();
            a.present(&a.driver.game().draw());
            a.update_dom();
        }

        setup_keyboard(app.clone())?;
        setup_pointer(&canvas, app.clone())?;
        setup_buttons(app.clone())?;
        request_animation_frame(app);
        Ok(())
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        for (event_name, down) in [("keydown", true), ("keyup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = Key::from_dom(&event.key(), &event.code()) else {
                    return;
                };
                let input = if down {
                    InputEvent::KeyDown(key)
                } else {
                    InputEvent::KeyUp(key)
                };
                let mut a = app.borrow_mut();
                let was_over = a.driver.game().phase() == GamePhase::GameOver;
                a.driver.on_input(input);
                // A restart from the keyboard needs a redraw and button sync
                if was_over && a.driver.game().phase() != GamePhase::GameOver {
                    let frame = a.driver.game().draw();
                    a.present(&frame);
                    a.update_dom();
                }
            });
            window.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_pointer(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        for (event_name, down) in [("mousedown", true), ("mouseup", false)] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                let pos = a.world_pos(&event);
                let button = PointerButton::from_dom(event.button());
                let input = if down {
                    InputEvent::PointerDown { button, pos }
                } else {
                    InputEvent::PointerUp { button, pos }
                };
                a.driver.on_input(input);
            });
            canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_buttons(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let (start, pause, reset) = {
            let a = app.borrow();
            (a.ids.start, a.ids.pause, Some(a.ids.reset))
        };
        let bindings = [
            (start, ControlCommand::Start),
            (pause, ControlCommand::Pause),
            (reset, ControlCommand::Reset),
        ];
        for (id, command) in bindings {
            let Some(btn) = app.borrow().button(id) else {
                continue;
            };
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut a = app.borrow_mut();
                let frame = a.driver.command(command);
                a.present(&frame);
                a.update_dom();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.driver.is_scheduling() {
                a.read_difficulty();
            }
            let frame = a.driver.frame(time);
            a.present(&frame);
            a.update_dom();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mini_arcade::Settings;
    use mini_arcade::games::GameKind;

    env_logger::init();
    log::info!("Mini Arcade (native) starting...");
    log::info!("Native mode runs a headless check of each game - build for wasm32 to play");

    let settings = Settings::load();
    let seed = settings.seed.unwrap_or(0x5eed);

    let kinds: Vec<GameKind> = match std::env::args().nth(1) {
        Some(name) => match GameKind::from_str(&name) {
            Some(kind) => vec![kind],
            None => {
                log::warn!("Unknown game '{}', running all", name);
                GameKind::ALL.to_vec()
            }
        },
        None => GameKind::ALL.to_vec(),
    };

    for kind in kinds {
        headless_run(kind, seed, &settings);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive a game for a few simulated seconds with scripted input
#[cfg(not(target_arch = "wasm32"))]
fn headless_run(kind: mini_arcade::games::GameKind, seed: u64, settings: &mini_arcade::Settings) {
    use glam::Vec2;
    use mini_arcade::sim::{InputEvent, Key, PointerButton};
    use mini_arcade::{ControlCommand, FrameDriver};

    const FRAMES: u32 = 60 * 20;
    const DT: f32 = 1.0 / 60.0;

    let mut driver = FrameDriver::new(kind, seed, kind.default_bounds(), settings);
    driver.command(ControlCommand::Start);

    let script = [Key::Right, Key::Down, Key::Left, Key::Up];
    let mut commands = 0;
    for frame in 0..FRAMES {
        if frame % 60 == 0 {
            let step = (frame / 60) as usize;
            let key = script[step % script.len()];
            let prev = script[(step + script.len() - 1) % script.len()];
            driver.on_input(InputEvent::KeyUp(prev));
            driver.on_input(InputEvent::KeyDown(key));
            driver.on_input(InputEvent::KeyDown(Key::Space));
            driver.on_input(InputEvent::KeyUp(Key::Space));
            let button = PointerButton::Primary;
            let pos = Vec2::new(200.0 + 40.0 * (step % 5) as f32, 80.0);
            if step % 2 == 0 {
                driver.on_input(InputEvent::PointerDown { button, pos });
            } else {
                driver.on_input(InputEvent::PointerUp { button, pos });
            }
        }
        commands += driver.step(DT).len();
    }

    let game = driver.game();
    log::info!(
        "{}: phase {:?} after {} ticks, score {}",
        game.name(),
        game.phase(),
        game.world().time_ticks,
        game.score().floor()
    );
    println!(
        "{:<10} phase={:?} ticks={} score={} draw_commands={}",
        game.name(),
        game.phase(),
        game.world().time_ticks,
        game.score().floor(),
        commands
    );
}
