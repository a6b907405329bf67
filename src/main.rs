//! Jelly Hole entry point
//!
//! Browser: wires DOM events, HUD and overlay to the controller and runs the
//! frame loop. Native: plays a headless autopilot session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use jelly_hole::input::ViewRect;
    use jelly_hole::renderer::{RenderState, build_scene};
    use jelly_hole::share::{popup_text, remaining_label, share_text};
    use jelly_hole::sim::{FoodKind, GameEvent, GameState, WinSummary};
    use jelly_hole::{GameConfig, GameController, InputState};

    /// Popups fade out via CSS, then get removed
    const POPUP_LIFETIME_MS: i32 = 900;

    // Share sheet when available, clipboard otherwise; failures are ignored
    #[wasm_bindgen(inline_js = "
        export function share_or_copy(text) {
            if (navigator.share) {
                navigator.share({ title: 'Jelly Hole', text }).catch(() => {});
                return;
            }
            if (!navigator.clipboard) return;
            navigator.clipboard.writeText(text).then(() => {
                const btn = document.getElementById('share-btn');
                if (!btn) return;
                btn.textContent = '✅ Copied!';
                setTimeout(() => {
                    const b = document.getElementById('share-btn');
                    if (b) b.textContent = '🔗 Share';
                }, 2200);
            }).catch(() => {});
        }
    ")]
    extern "C" {
        fn share_or_copy(text: &str);
    }

    /// Game instance holding all state
    struct Game {
        controller: GameController,
        input: InputState,
        render_state: Option<RenderState>,
        /// A frame callback is pending
        frame_scheduled: bool,
    }

    impl Game {
        fn new(config: GameConfig) -> Self {
            let input = InputState::new(config.playfield);
            Self {
                controller: GameController::new(config),
                input,
                render_state: None,
                frame_scheduled: false,
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(state) = self.controller.session() else {
                return;
            };
            let vertices = build_scene(state, self.input.pointer());
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    fn document() -> web_sys::Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_display(id: &str, value: &str) {
        if let Some(el) = document()
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("display", value);
        }
    }

    /// Read the optional inline JSON config
    fn load_config(canvas: &HtmlCanvasElement) -> GameConfig {
        let base = document()
            .get_element_by_id("game-config")
            .and_then(|el| el.text_content())
            .map(|json| match GameConfig::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded config from page");
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring page config: {}", e);
                    GameConfig::default()
                }
            })
            .unwrap_or_default();
        base.with_playfield(canvas.width() as f32, canvas.height() as f32)
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Jelly Hole starting...");

        let canvas: HtmlCanvasElement = document()
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let config = load_config(&canvas);
        if let Err(e) = config.validate() {
            log::error!("Canvas cannot host the game: {}", e);
            return;
        }
        let playfield = config.playfield;
        let game = Rc::new(RefCell::new(Game::new(config)));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, canvas.width(), canvas.height(), playfield).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());

        if let Some(btn) = document().get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_game(&game, false);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        log::info!("Jelly Hole ready");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if game.borrow_mut().input.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = view_rect(&canvas_clone);
                game.borrow_mut().input.pointer_move(
                    event.client_x() as f32,
                    event.client_y() as f32,
                    rect,
                );
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = view_rect(&canvas_clone);
                    game.borrow_mut().input.pointer_move(
                        touch.client_x() as f32,
                        touch.client_y() as f32,
                        rect,
                    );
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn view_rect(canvas: &HtmlCanvasElement) -> ViewRect {
        let rect = canvas.get_bounding_client_rect();
        ViewRect {
            left: rect.left() as f32,
            top: rect.top() as f32,
            width: rect.width() as f32,
            height: rect.height() as f32,
        }
    }

    /// Start (or replay) a session and make sure the loop is running
    fn start_game(game: &Rc<RefCell<Game>>, replay: bool) {
        set_display("overlay-screen", "none");
        let seed = js_sys::Date::now() as u64;
        let schedule = {
            let mut g = game.borrow_mut();
            let now = now_ms();
            if replay {
                g.controller.replay(seed, now);
            } else {
                g.controller.start(seed, now);
            }
            if let Some(state) = g.controller.session() {
                refresh_hud(state);
            }
            !std::mem::replace(&mut g.frame_scheduled, true)
        };
        if schedule {
            request_animation_frame(game.clone());
        }
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
        let keep_running = {
            let mut g = game.borrow_mut();
            let input = g.input.tick_input();
            match g.controller.frame(time, &input) {
                Ok(outcome) => {
                    g.render();
                    if let Some(state) = g.controller.session() {
                        for event in &outcome.events {
                            dispatch_event(state, event);
                        }
                    }
                    outcome.keep_running
                }
                Err(e) => {
                    log::error!("Stopping game loop: {}", e);
                    false
                }
            }
        };

        if keep_running {
            request_animation_frame(game);
        } else {
            game.borrow_mut().frame_scheduled = false;
            bind_overlay_buttons(&game);
        }
    }

    /// HUD counters, remaining label and size badge from scratch
    fn refresh_hud(state: &GameState) {
        for kind in FoodKind::ALL {
            set_text(counter_id(kind), &state.counts[kind].to_string());
        }
        set_text("cnt-score", &state.score.to_string());
        set_text("food-remaining", &remaining_label(state.remaining()));
        set_text("size-num", &state.hole.size_level().to_string());
    }

    fn counter_id(kind: FoodKind) -> &'static str {
        match kind {
            FoodKind::Burger => "cnt-burger",
            FoodKind::Pizza => "cnt-pizza",
            FoodKind::Sushi => "cnt-sushi",
            FoodKind::Chicken => "cnt-chicken",
        }
    }

    fn dispatch_event(state: &GameState, event: &GameEvent) {
        match event {
            GameEvent::ItemConsumed {
                pos,
                hole_radius,
                value,
                ..
            } => {
                refresh_hud(state);
                spawn_popup(pos.x, pos.y - hole_radius, &popup_text(*value));
                pulse_badge();
            }
            GameEvent::SessionWon(summary) => show_win_overlay(summary),
        }
    }

    fn spawn_popup(x: f32, y: f32, text: &str) {
        let document = document();
        let Ok(el) = document.create_element("div") else {
            return;
        };
        el.set_class_name("eat-popup");
        el.set_text_content(Some(text));
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            let style = html.style();
            let _ = style.set_property("left", &format!("{}px", x - 18.0));
            let _ = style.set_property("top", &format!("{}px", y - 30.0));
        }
        if let Some(wrapper) = document.get_element_by_id("game-wrapper") {
            let _ = wrapper.append_child(&el);
        }

        let closure = Closure::once(move || el.remove());
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                POPUP_LIFETIME_MS,
            );
        }
        closure.forget();
    }

    /// Restart the badge's CSS pulse animation
    fn pulse_badge() {
        if let Some(badge) = document()
            .get_element_by_id("size-badge")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let classes = badge.class_list();
            let _ = classes.remove_1("pulse");
            // Force a reflow so re-adding the class restarts the animation
            let _ = badge.offset_width();
            let _ = classes.add_1("pulse");
        }
    }

    fn show_win_overlay(summary: &WinSummary) {
        let c = &summary.counts;
        let html = format!(
            r#"
    <h1>🎉 You Win!</h1>
    <p class="subtitle">All {total} food items devoured!</p>
    <div class="score-card">
      <span class="big-score">{score} pts</span>
      <div class="breakdown">🍔{b} &nbsp; 🍕{p} &nbsp; 🍣{s} &nbsp; 🍗{ch}</div>
      <div class="meta">Final Size: {size} &nbsp;|&nbsp; Total eaten: {total}</div>
    </div>
    <div class="btn-row">
      <button class="big-btn btn-share" id="share-btn">🔗 Share</button>
      <button class="big-btn btn-play"  id="replay-btn">🔄 Replay</button>
    </div>
  "#,
            total = summary.total_items,
            score = summary.score,
            b = c[FoodKind::Burger],
            p = c[FoodKind::Pizza],
            s = c[FoodKind::Sushi],
            ch = c[FoodKind::Chicken],
            size = summary.final_size_level,
        );
        if let Some(overlay) = document().get_element_by_id("overlay-screen") {
            overlay.set_inner_html(&html);
        }
        set_display("overlay-screen", "flex");
    }

    /// Hook up the buttons the win overlay just created
    fn bind_overlay_buttons(game: &Rc<RefCell<Game>>) {
        let summary = match game.borrow().controller.session() {
            Some(state) if state.is_won() => state.summary(),
            _ => return,
        };
        let document = document();

        if let Some(btn) = document.get_element_by_id("replay-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_game(&game, true);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("share-btn") {
            let text = share_text(&summary);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                share_or_copy(&text);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use jelly_hole::GameConfig;

    env_logger::init();
    log::info!("Jelly Hole (native) starting...");

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let json =
                std::fs::read_to_string(&path).with_context(|| format!("reading {}", path))?;
            let config = GameConfig::from_json(&json)?;
            log::info!("Loaded config from {}", path);
            config
        }
        None => GameConfig::default(),
    };
    let seed = match args.next() {
        Some(s) => s.parse::<u64>().context("seed must be an unsigned integer")?,
        None => std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
    };

    autopilot::run(config, seed)
}

/// Headless play-through: the pointer always aims at the nearest item
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use anyhow::bail;
    use glam::Vec2;

    use jelly_hole::share::share_text;
    use jelly_hole::sim::{GameEvent, GameState, TickInput};
    use jelly_hole::{GameConfig, GameController};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of play
    const MAX_FRAMES: u32 = 60 * 600;

    fn nearest_target(state: &GameState) -> Vec2 {
        state
            .items
            .iter()
            .filter(|it| !it.eaten)
            .map(|it| it.pos)
            .min_by(|a, b| {
                a.distance_squared(state.hole.pos)
                    .partial_cmp(&b.distance_squared(state.hole.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(state.hole.pos)
    }

    pub fn run(config: GameConfig, seed: u64) -> anyhow::Result<()> {
        let mut controller = GameController::new(config);
        let mut now = 0.0;
        controller.start(seed, now);

        for frame in 0..MAX_FRAMES {
            let Some(state) = controller.session() else {
                bail!("session vanished");
            };
            let input = TickInput::pointer(nearest_target(state));
            now += FRAME_MS;
            let outcome = controller.frame(now, &input)?;

            for event in outcome.events {
                match event {
                    GameEvent::ItemConsumed {
                        kind,
                        value,
                        size_level,
                        ..
                    } => log::debug!("frame {}: {:?} +{} (size {})", frame, kind, value, size_level),
                    GameEvent::SessionWon(summary) => {
                        log::info!("Won after {} frames", frame + 1);
                        println!("{}", share_text(&summary));
                    }
                }
            }
            if !outcome.keep_running {
                return Ok(());
            }
        }

        bail!("autopilot did not finish within {} frames", MAX_FRAMES)
    }
}
