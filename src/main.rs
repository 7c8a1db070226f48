//! Rocket Lander entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::f64::consts::PI;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use rocket_lander::audio::{AudioManager, SoundEffect};
    use rocket_lander::levels::Theme;
    use rocket_lander::platform::InputState;
    use rocket_lander::sim::{
        FrameClock, FuelBand, GameEvent, GamePhase, GameState, HudSnapshot, SpeedBand, TickInput,
        Viewport, tick,
    };
    use rocket_lander::{LEVEL_COUNT, Progress, Settings, consts::SIM_DT, get_level};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        clock: FrameClock,
        last_time: f64,
        /// One-shot pause request for the next tick
        pause: bool,
        settings: Settings,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
    }

    impl Game {
        /// Run as many fixed ticks as the elapsed time allows
        fn update(&mut self, elapsed: f32, now: f64) {
            let steps = self.clock.advance(elapsed);
            for _ in 0..steps {
                let input = TickInput {
                    controls: self.input.controls(),
                    pause: std::mem::take(&mut self.pause),
                };
                tick(&mut self.state, &input, now);
            }

            for event in self.state.drain_events() {
                self.audio.handle_event(&event);
                match event {
                    GameEvent::LevelLoaded { level } => {
                        hide("result");
                        hide("menu");
                        show("hud");
                        if let Some(document) = document() {
                            let info = get_level(level);
                            set_text(&document, "ready-title", info.name);
                            set_text(&document, "ready-description", info.description);
                        }
                        log::debug!("Showing level {level}");
                    }
                    GameEvent::ProgressUnlocked { .. } => self.state.progress.save(),
                    GameEvent::ShowResult { level, outcome } => {
                        show_result(level, outcome, &self.state.progress)
                    }
                    GameEvent::GameComplete => {
                        hide("result");
                        show("complete");
                    }
                    _ => {}
                }
            }
        }

        /// Space/Enter or thrust on a result screen moves on
        fn confirm(&mut self) {
            let phase = self.state.phase;
            if matches!(phase, GamePhase::Won | GamePhase::Lost) && self.state.pending_result().is_none() {
                self.audio.play(SoundEffect::Click);
                self.state.continue_after_result();
            }
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else { return };
            let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            self.canvas.set_width(width as u32);
            self.canvas.set_height(height as u32);
            self.state.resize(width as f32, height as f32);
            log::info!("Resized to {}x{}", width, height);
        }

        /// Draw the current frame
        fn render(&self) {
            let ctx = &self.ctx;
            let state = &self.state;
            let view = &state.viewport;
            let (w, h) = (view.width as f64, view.height as f64);
            let ground_y = view.ground_y() as f64;

            let (sky, ground) = match state.level.theme {
                Theme::Moon => ("#0b0d21", "#8e8e93"),
                Theme::Mars => ("#3d1c1c", "#b5523b"),
                Theme::Earth => ("#74b9ff", "#55a35d"),
            };
            ctx.set_fill_style_str(sky);
            ctx.fill_rect(0.0, 0.0, w, h);
            ctx.set_fill_style_str(ground);
            ctx.fill_rect(0.0, ground_y, w, h - ground_y);

            let scenery = state.level.scenery;
            if scenery.mountains {
                ctx.set_fill_style_str("rgba(0, 0, 0, 0.15)");
                ctx.begin_path();
                ctx.move_to(0.0, ground_y);
                for i in 0..=8 {
                    let x = w * i as f64 / 8.0;
                    let peak = if i % 2 == 0 { 0.0 } else { 60.0 + 30.0 * (i % 3) as f64 };
                    ctx.line_to(x, ground_y - peak);
                }
                ctx.line_to(w, ground_y);
                ctx.close_path();
                ctx.fill();
            }
            if scenery.clouds {
                ctx.set_fill_style_str("rgba(255, 255, 255, 0.7)");
                for i in 0..4 {
                    let x = w * (0.15 + 0.25 * i as f64);
                    let y = 60.0 + 30.0 * (i % 2) as f64;
                    ctx.begin_path();
                    let _ = ctx.ellipse(x, y, 50.0, 18.0, 0.0, 0.0, 2.0 * PI);
                    ctx.fill();
                }
            }
            if scenery.trees {
                for i in 0..6 {
                    let x = w * (0.05 + 0.18 * i as f64);
                    ctx.set_fill_style_str("#6d4c41");
                    ctx.fill_rect(x - 3.0, ground_y - 20.0, 6.0, 20.0);
                    ctx.set_fill_style_str("#2e7d32");
                    ctx.begin_path();
                    ctx.move_to(x - 14.0, ground_y - 18.0);
                    ctx.line_to(x, ground_y - 50.0);
                    ctx.line_to(x + 14.0, ground_y - 18.0);
                    ctx.close_path();
                    ctx.fill();
                }
            }
            if scenery.craters {
                ctx.set_fill_style_str("rgba(0, 0, 0, 0.2)");
                for i in 0..5 {
                    let x = w * (0.1 + 0.2 * i as f64);
                    ctx.begin_path();
                    let _ = ctx.ellipse(x, ground_y + 25.0, 30.0, 8.0, 0.0, 0.0, 2.0 * PI);
                    ctx.fill();
                }
            }

            // Pad
            let pad = &state.pad;
            ctx.set_fill_style_str(if pad.is_moving() { "#fdcb6e" } else { "#00b894" });
            ctx.fill_rect(pad.x as f64, pad.y as f64, pad.width as f64, pad.height as f64);

            if let Some((from, to)) = state.guide_line() {
                ctx.set_stroke_style_str("rgba(255, 255, 255, 0.25)");
                ctx.set_line_width(2.0);
                let _ = ctx.set_line_dash(&js_sys::Array::of2(&8.0.into(), &8.0.into()));
                ctx.begin_path();
                ctx.move_to(from.x as f64, from.y as f64);
                ctx.line_to(to.x as f64, to.y as f64);
                ctx.stroke();
                let _ = ctx.set_line_dash(&js_sys::Array::new());
            }

            if !state.explosion.is_active() && state.phase != GamePhase::Menu {
                self.draw_ship();
                if state.vehicle.bounds().bottom < 0.0 {
                    self.draw_offscreen_arrow();
                }
            }

            for p in state.explosion.particles() {
                ctx.set_global_alpha(p.life.clamp(0.0, 1.0) as f64);
                ctx.set_fill_style_str(&format!("#{:06x}", p.color));
                let half = p.size as f64 / 2.0;
                if p.debris {
                    ctx.fill_rect(p.pos.x as f64 - half, p.pos.y as f64 - half, p.size as f64, p.size as f64);
                } else {
                    ctx.begin_path();
                    let _ = ctx.arc(p.pos.x as f64, p.pos.y as f64, half, 0.0, 2.0 * PI);
                    ctx.fill();
                }
            }
            ctx.set_global_alpha(1.0);
        }

        /// Marker at the top edge while the ship is above the view
        fn draw_offscreen_arrow(&self) {
            let ctx = &self.ctx;
            let ship = &self.state.vehicle;
            let x = ship.pos.x as f64;
            ctx.set_fill_style_str("#ffffff");
            ctx.begin_path();
            ctx.move_to(x, 8.0);
            ctx.line_to(x - 10.0, 24.0);
            ctx.line_to(x + 10.0, 24.0);
            ctx.close_path();
            ctx.fill();
            ctx.set_font("12px sans-serif");
            ctx.set_text_align("center");
            let _ = ctx.fill_text(&format!("{:.0}", -ship.pos.y), x, 40.0);
        }

        fn draw_ship(&self) {
            let ctx = &self.ctx;
            let ship = &self.state.vehicle;
            let (w, h) = (ship.width as f64, ship.height as f64);

            ctx.save();
            let _ = ctx.translate(ship.pos.x as f64, ship.pos.y as f64);
            let _ = ctx.rotate((ship.angle as f64).to_radians());

            if ship.flame > 0.0 {
                ctx.set_fill_style_str("#ff9f43");
                ctx.begin_path();
                ctx.move_to(-w * 0.25, h / 2.0);
                ctx.line_to(0.0, h / 2.0 + ship.flame as f64 * 2.0);
                ctx.line_to(w * 0.25, h / 2.0);
                ctx.close_path();
                ctx.fill();
            }

            // Hull
            ctx.set_fill_style_str(if ship.distressed { "#b2bec3" } else { "#dfe6e9" });
            ctx.begin_path();
            ctx.move_to(0.0, -h / 2.0);
            ctx.line_to(w / 2.0, h * 0.3);
            ctx.line_to(w / 2.0, h / 2.0);
            ctx.line_to(-w / 2.0, h / 2.0);
            ctx.line_to(-w / 2.0, h * 0.3);
            ctx.close_path();
            ctx.fill();

            // Eyes follow horizontal motion
            let gaze = ship.gaze as f64;
            ctx.set_fill_style_str("#2d3436");
            for side in [-1.0, 1.0] {
                ctx.begin_path();
                let _ = ctx.arc(side * w * 0.18 + gaze, 0.0, w * 0.08, 0.0, 2.0 * PI);
                ctx.fill();
            }
            if ship.distressed {
                ctx.set_stroke_style_str("#2d3436");
                ctx.set_line_width(2.0);
                ctx.begin_path();
                let _ = ctx.arc(0.0, h * 0.25, w * 0.15, PI * 1.15, PI * 1.85);
                ctx.stroke();
            }

            ctx.restore();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = document() else { return };
            let hud = HudSnapshot::capture(&self.state);

            set_text(&document, "hud-level", &format!("{} - {}", hud.level, hud.level_name));
            set_text(&document, "hud-speed", &hud.speed_readout.to_string());
            set_text(&document, "hud-fuel", &format!("{:.0}%", hud.fuel_percent));
            set_text(&document, "hud-altitude", &format!("{:.0}%", hud.altitude * 100.0));

            if let Some(el) = document.get_element_by_id("hud-speed") {
                let class = match hud.speed_band {
                    SpeedBand::Safe => "hud-value",
                    SpeedBand::Warning => "hud-value warning",
                    SpeedBand::Danger => "hud-value danger",
                };
                el.set_class_name(class);
            }
            if let Some(el) = document.get_element_by_id("hud-fuel") {
                let class = match hud.fuel_band {
                    FuelBand::Ok => "hud-value",
                    FuelBand::Low => "hud-value warning",
                    FuelBand::Critical => "hud-value danger",
                };
                el.set_class_name(class);
            }

            if let Some(el) = document.get_element_by_id("pause-menu") {
                let _ = el
                    .class_list()
                    .toggle_with_force("hidden", self.state.phase != GamePhase::Paused);
            }
            if let Some(el) = document.get_element_by_id("ready-prompt") {
                let _ = el
                    .class_list()
                    .toggle_with_force("hidden", self.state.phase != GamePhase::Ready);
            }
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

    fn show(id: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().remove_1("hidden");
        }
    }

    fn hide(id: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.class_list().add_1("hidden");
        }
    }

    fn show_result(level: u32, outcome: rocket_lander::sim::LandingOutcome, progress: &Progress) {
        let Some(document) = document() else { return };
        let (title, message) = if outcome.is_success() {
            ("Landed!", get_level(level).success_message)
        } else {
            ("Try again", outcome.reason())
        };
        set_text(&document, "result-title", title);
        set_text(&document, "result-message", message);

        // After a loss, offer every unlocked level next to retry
        if outcome.is_success() {
            hide("result-levels");
        } else {
            for id in 1..=LEVEL_COUNT {
                if let Some(btn) = document.get_element_by_id(&format!("result-level-{id}")) {
                    let _ = btn
                        .class_list()
                        .toggle_with_force("hidden", !progress.is_unlocked(id));
                }
            }
            show("result-levels");
        }
        show("result");
    }

    /// Fill the loss overlay with one button per level
    fn build_result_level_grid(game: &Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(document) = document() else { return Ok(()) };
        let Some(grid) = document.get_element_by_id("result-levels") else {
            return Ok(());
        };
        for id in 1..=LEVEL_COUNT {
            let btn = document.create_element("button")?;
            btn.set_id(&format!("result-level-{id}"));
            btn.set_class_name("level-btn hidden");
            btn.set_text_content(Some(&id.to_string()));
            grid.append_child(&btn)?;

            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                if g.state.select_level(id) {
                    g.audio.play(SoundEffect::Click);
                }
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Refresh the level buttons' locked state
    fn refresh_level_buttons(progress: &Progress) {
        let Some(document) = document() else { return };
        for level in 1..=LEVEL_COUNT {
            if let Some(btn) = document.get_element_by_id(&format!("level-{level}")) {
                let _ = btn
                    .class_list()
                    .toggle_with_force("locked", !progress.is_unlocked(level));
            }
        }
    }

    fn is_mobile(window: &web_sys::Window) -> bool {
        let agent = window.navigator().user_agent().unwrap_or_default();
        let narrow = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .is_some_and(|w| w < 768.0);
        narrow || ["Mobi", "Android", "iPhone", "iPad"].iter().any(|m| agent.contains(m))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Rocket Lander starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let viewport = Viewport::new(width as f32, height as f32, is_mobile(&window));
        let progress = Progress::load();
        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;

        refresh_level_buttons(&progress);
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, viewport, progress),
            input: InputState::new(),
            clock: FrameClock::new(),
            last_time: 0.0,
            pause: false,
            audio: AudioManager::new(settings.sound_enabled),
            settings,
            canvas: canvas.clone(),
            ctx,
        }));
        log::info!("Game initialized with seed: {}", seed);

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.class_list().add_1("hidden");
        }

        setup_keyboard(game.clone())?;
        setup_touch(&canvas, game.clone())?;
        setup_tilt(game.clone())?;
        setup_buttons(game.clone())?;
        build_result_level_grid(&game)?;
        setup_window_events(game.clone())?;

        request_animation_frame(game);
        log::info!("Rocket Lander running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let key = event.key();
                match key.as_str() {
                    "Escape" | "p" | "P" => g.pause = true,
                    " " | "Enter" => g.confirm(),
                    _ => {
                        if g.input.apply_key(&key, true) {
                            event.prevent_default();
                            g.audio.resume();
                            if g.input.controls().thrust && g.state.phase == GamePhase::Lost {
                                g.confirm();
                            }
                        }
                    }
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.apply_key(&event.key(), false);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_touch(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                g.audio.resume();
                if matches!(g.state.phase, GamePhase::Won | GamePhase::Lost) {
                    g.confirm();
                } else {
                    g.input.set_touch_thrust(true);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        for name in ["touchend", "touchcancel"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().input.set_touch_thrust(false);
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    fn setup_tilt(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::DeviceOrientationEvent| {
            let mut g = game.borrow_mut();
            if !g.settings.tilt_control {
                return;
            }
            let dead_zone = g.settings.tilt_dead_zone;
            let gamma = event.gamma().unwrap_or(0.0) as f32;
            g.input.apply_tilt(gamma, dead_zone);
        });
        window.add_event_listener_with_callback("deviceorientation", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    /// Attach a click handler to an element, if present
    fn on_click(id: &str, handler: impl FnMut(web_sys::MouseEvent) + 'static) -> Result<(), JsValue> {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            return Ok(());
        };
        let closure = Closure::<dyn FnMut(_)>::new(handler);
        el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        {
            let game = game.clone();
            on_click("start-btn", move |_| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.audio.play(SoundEffect::Click);
                g.state.start_game();
            })?;
        }

        for level in 1..=LEVEL_COUNT {
            let game = game.clone();
            on_click(&format!("level-{level}"), move |_| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                if g.state.select_level(level) {
                    g.audio.play(SoundEffect::Click);
                }
            })?;
        }

        {
            let game = game.clone();
            on_click("continue-btn", move |_| game.borrow_mut().confirm())?;
        }

        {
            let game = game.clone();
            on_click("resume-btn", move |_| game.borrow_mut().pause = true)?;
        }

        {
            let game = game.clone();
            on_click("menu-btn", move |_| {
                let mut g = game.borrow_mut();
                g.audio.play(SoundEffect::Click);
                g.state.return_to_menu();
                refresh_level_buttons(&g.state.progress);
                hide("result");
                hide("complete");
                hide("hud");
                show("menu");
            })?;
        }

        {
            let game = game.clone();
            on_click("sound-btn", move |_| {
                let mut g = game.borrow_mut();
                let enabled = g.settings.toggle_sound();
                g.audio.set_enabled(enabled);
                g.settings.save();
                if let Some(document) = document() {
                    set_text(&document, "sound-btn", if enabled { "Sound: On" } else { "Sound: Off" });
                }
            })?;
        }

        on_click("tilt-btn", move |_| {
            let mut g = game.borrow_mut();
            g.settings.tilt_control = !g.settings.tilt_control;
            if !g.settings.tilt_control {
                g.input.clear_tilt();
            }
            g.settings.save();
            log::info!("Tilt control: {}", g.settings.tilt_control);
        })?;
        Ok(())
    }

    fn setup_window_events(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Release everything held and pause when focus is lost
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = game.borrow_mut();
            g.input.release_all();
            if g.state.phase == GamePhase::Playing {
                g.pause = true;
                log::info!("Auto-paused (window blur)");
            }
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
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

            let elapsed = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(elapsed, time / 1000.0);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Rocket Lander (native) starting...");
    log::info!("Native mode runs a headless autopilot; serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    autopilot::fly_all_levels(seed);
}

/// Scripted flights through every level, logging each verdict
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use rocket_lander::consts::SIM_DT;
    use rocket_lander::sim::{Controls, GameEvent, GamePhase, GameState, TickInput, Viewport, tick};
    use rocket_lander::{LEVEL_COUNT, Progress};

    /// Give up on a flight after this many frames
    const MAX_FRAMES: u32 = 60 * 120;

    pub fn fly_all_levels(seed: u64) {
        let mut state = GameState::new(
            seed,
            Viewport::default(),
            Progress::with_highest(LEVEL_COUNT),
        );

        let mut landed = 0;
        for level in 1..=LEVEL_COUNT {
            if !state.select_level(level) {
                continue;
            }
            if fly(&mut state) {
                landed += 1;
            }
        }
        log::info!("Autopilot landed {landed}/{LEVEL_COUNT} levels");
    }

    /// Fly the loaded level; true on a successful landing
    fn fly(state: &mut GameState) -> bool {
        for frame in 0..MAX_FRAMES {
            let input = TickInput {
                controls: steer(state),
                pause: false,
            };
            tick(state, &input, frame as f64 * SIM_DT as f64);

            for event in state.drain_events() {
                if let GameEvent::Landed(report) = event {
                    log::info!(
                        "Level {}: {:?} (speed {:.2}, tilt {:.1}, fuel left {:.1})",
                        report.level,
                        report.outcome,
                        report.touchdown.speed,
                        report.touchdown.tilt,
                        state.vehicle.fuel
                    );
                    return report.outcome.is_success();
                }
            }
            if state.phase == GamePhase::Lost {
                return false;
            }
        }
        log::warn!("Level {}: autopilot timed out", state.level_id);
        false
    }

    /// Drift over the pad, then hold a slow descent
    fn steer(state: &GameState) -> Controls {
        let ship = &state.vehicle;
        let env = &state.level.env;
        let offset = state.pad.center_x() - ship.pos.x;
        let altitude = state.viewport.ground_y() - ship.bounds().bottom;

        let want_vx = (offset / 60.0).clamp(-2.0, 2.0);
        let left = ship.vel.x > want_vx + 0.2 && ship.angle > -10.0;
        let right = ship.vel.x < want_vx - 0.2 && ship.angle < 10.0;

        let target_vy = if altitude > 150.0 {
            2.5
        } else {
            env.max_landing_speed * 0.5
        };
        let thrust = ship.vel.y > target_vy || (state.phase == GamePhase::Ready);

        Controls { thrust, left, right }
    }
}
