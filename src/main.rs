//! Petal Slides entry point
//!
//! Wires browser events to the slide controller and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Event, EventTarget, HtmlCanvasElement, HtmlElement,
        KeyboardEvent, TouchEvent, WheelEvent, Window,
    };

    use petal_slides::confetti::{self, ConfettiPiece};
    use petal_slides::countdown::{CountdownTarget, Elapsed};
    use petal_slides::platform::SlideDom;
    use petal_slides::renderer::CanvasSurface;
    use petal_slides::slides::{
        EnterHook, NavIntent, SlideController, SwipeTracker, WheelGate, indicator_target,
        key_intent,
    };
    use petal_slides::{PetalField, Settings};

    thread_local! {
        static APP: RefCell<Option<Rc<RefCell<App>>>> = const { RefCell::new(None) };
    }

    /// Page instance holding all state
    struct App {
        slides: SlideController,
        dom: SlideDom,
        petals: Option<(PetalField, CanvasSurface)>,
        swipe: SwipeTracker,
        wheel: WheelGate,
        countdowns: Vec<(CountdownTarget, f64)>,
        countdown_interval: Option<i32>,
        confetti_rng: Pcg32,
        settings: Settings,
        running: bool,
    }

    impl App {
        fn new(document: &Document, window: &Window, settings: Settings, seed: u64) -> Self {
            let dom = SlideDom::query(document);
            let total = dom.slide_count();

            let mut slides = SlideController::new(total).with_settle_delay(settings.settle_ms);
            if let Some(index) = settings.timeline_slide {
                slides = slides.with_hook(index, EnterHook::timeline(dom.timeline_len()));
            }
            if let Some(index) = settings.letter_slide {
                slides = slides.with_hook(
                    index,
                    EnterHook::letter(dom.letter_len(), dom.has_signature()),
                );
            }

            let petals = if settings.petals {
                init_petals(document, window, seed)
            } else {
                None
            };

            let countdowns = settings
                .countdowns
                .iter()
                .map(|target| (target.clone(), target.since.to_millis()))
                .collect();

            log::info!(
                "{} slides, {} indicators, petals {}",
                total,
                dom.dots().len(),
                if petals.is_some() { "on" } else { "off" }
            );

            Self {
                slides,
                dom,
                petals,
                swipe: SwipeTracker::new(settings.swipe_threshold),
                wheel: WheelGate::new(settings.wheel_lock_ms, settings.wheel_threshold),
                countdowns,
                countdown_interval: None,
                confetti_rng: Pcg32::seed_from_u64(seed.wrapping_add(1)),
                settings,
                running: true,
            }
        }

        fn start(&mut self, now: f64) {
            let effects = self.slides.start(now);
            self.dom.apply_all(&effects);
            self.refresh_countdowns(now);
        }

        fn navigate(&mut self, intent: NavIntent, now: f64) {
            let effects = match intent {
                NavIntent::Next => self.slides.next(now),
                NavIntent::Previous => self.slides.previous(now),
            };
            self.dom.apply_all(&effects);
        }

        fn go_to(&mut self, target: usize, now: f64) {
            let effects = self.slides.go_to(target, now);
            self.dom.apply_all(&effects);
        }

        /// One display frame: fire slide timers, move and draw petals
        fn frame(&mut self, now: f64) {
            let effects = self.slides.advance(now);
            self.dom.apply_all(&effects);

            if let Some((field, surface)) = &mut self.petals {
                field.tick();
                field.render(surface);
            }
        }

        fn resize(&mut self, width: f32, height: f32) {
            if let Some((field, surface)) = &mut self.petals {
                field.resize(surface, width, height);
            }
        }

        fn refresh_countdowns(&self, now: f64) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            for (target, start) in &self.countdowns {
                let Some(elapsed) = Elapsed::since(*start, now) else {
                    continue;
                };
                for (id, text) in target.field_texts(&elapsed) {
                    if let Some(el) = document.get_element_by_id(&id) {
                        el.set_text_content(Some(&text));
                    }
                }
            }
        }

        fn confetti_burst(&mut self) -> Vec<ConfettiPiece> {
            confetti::burst(&mut self.confetti_rng, self.settings.confetti_count)
        }

        fn stop(&mut self) {
            self.running = false;
            if let Some((field, _)) = &mut self.petals {
                field.stop();
            }
            if let (Some(id), Some(window)) = (self.countdown_interval.take(), web_sys::window()) {
                window.clear_interval_with_handle(id);
            }
            log::info!("Petal Slides stopped");
        }
    }

    fn viewport_size(window: &Window) -> (f32, f32) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        (w as f32, h as f32)
    }

    fn init_petals(
        document: &Document,
        window: &Window,
        seed: u64,
    ) -> Option<(PetalField, CanvasSurface)> {
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("petals-canvas")?
            .dyn_into()
            .ok()?;
        let mut surface = CanvasSurface::new(canvas)?;
        let mut field = PetalField::new(seed);
        let (width, height) = viewport_size(window);
        field.initialize(&mut surface, width, height);
        Some((field, surface))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Petal Slides starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(&document, &window, settings, seed)));
        app.borrow_mut().start(js_sys::Date::now());

        setup_touch(&document, app.clone())?;
        setup_keyboard(&document, app.clone())?;
        setup_wheel(&document, app.clone())?;
        setup_indicators(app.clone())?;
        setup_resize(&window, app.clone())?;
        setup_surprise(&document, app.clone())?;
        setup_countdowns(&window, app.clone())?;

        APP.with(|slot| *slot.borrow_mut() = Some(app.clone()));

        request_animation_frame(app);

        log::info!("Petal Slides running!");
        Ok(())
    }

    /// Stop the frame loop, petals and counters
    pub fn teardown() {
        APP.with(|slot| {
            if let Some(app) = slot.borrow_mut().take() {
                app.borrow_mut().stop();
            }
        });
    }

    fn listen<F>(target: &EventTarget, event: &str, passive: bool, handler: F) -> Result<(), JsValue>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        let options = AddEventListenerOptions::new();
        options.set_passive(passive);
        target.add_event_listener_with_callback_and_add_event_listener_options(
            event,
            closure.as_ref().unchecked_ref(),
            &options,
        )?;
        closure.forget();
        Ok(())
    }

    fn setup_touch(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        {
            let app = app.clone();
            listen(document, "touchstart", true, move |event: Event| {
                let event: TouchEvent = event.unchecked_into();
                if let Some(touch) = event.changed_touches().get(0) {
                    app.borrow_mut()
                        .swipe
                        .begin(touch.screen_x() as f32, touch.screen_y() as f32);
                }
            })?;
        }

        listen(document, "touchend", true, move |event: Event| {
            let event: TouchEvent = event.unchecked_into();
            let Some(touch) = event.changed_touches().get(0) else {
                return;
            };
            let mut a = app.borrow_mut();
            if let Some(intent) = a.swipe.end(touch.screen_x() as f32, touch.screen_y() as f32) {
                a.navigate(intent, js_sys::Date::now());
            }
        })
    }

    fn setup_keyboard(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        listen(document, "keydown", false, move |event: Event| {
            let event: KeyboardEvent = event.unchecked_into();
            if let Some(intent) = key_intent(&event.key()) {
                event.prevent_default();
                app.borrow_mut().navigate(intent, js_sys::Date::now());
            }
        })
    }

    fn setup_wheel(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        listen(document, "wheel", true, move |event: Event| {
            let event: WheelEvent = event.unchecked_into();
            let now = js_sys::Date::now();
            let mut a = app.borrow_mut();
            if let Some(intent) = a.wheel.on_wheel(event.delta_y(), now) {
                a.navigate(intent, now);
            }
        })
    }

    fn setup_indicators(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let dots: Vec<HtmlElement> = app.borrow().dom.dots().to_vec();
        for dot in dots {
            let app = app.clone();
            let target_attr = dot.get_attribute("data-slide");
            listen(&dot, "click", false, move |_event: Event| {
                match indicator_target(target_attr.as_deref()) {
                    Some(target) => app.borrow_mut().go_to(target, js_sys::Date::now()),
                    None => log::debug!("Indicator without a usable data-slide"),
                }
            })?;
        }
        Ok(())
    }

    fn setup_resize(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window_clone = window.clone();
        listen(window, "resize", false, move |_event: Event| {
            let (width, height) = viewport_size(&window_clone);
            app.borrow_mut().resize(width, height);
        })
    }

    fn setup_surprise(document: &Document, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let (Some(heart), Some(message)) = (
            document.get_element_by_id("surprise-heart"),
            document.get_element_by_id("surprise-message"),
        ) else {
            return Ok(());
        };

        let heart_clone = heart.clone();
        listen(&heart, "click", false, move |_event: Event| {
            let _ = heart_clone.class_list().add_1("hidden");
            let _ = message.class_list().add_1("visible");

            let (pieces, lifetime_ms) = {
                let mut a = app.borrow_mut();
                (a.confetti_burst(), a.settings.confetti_lifetime_ms)
            };
            if let Err(e) = launch_confetti(&pieces, lifetime_ms) {
                log::warn!("Confetti failed: {:?}", e);
            }
        })
    }

    fn launch_confetti(pieces: &[ConfettiPiece], lifetime_ms: i32) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

        let container = document.create_element("div")?;
        container.class_list().add_1("confetti-container")?;
        body.append_child(&container)?;

        for piece in pieces {
            let span: HtmlElement = document.create_element("span")?.dyn_into()?;
            span.class_list().add_1("confetti")?;
            span.set_text_content(Some(piece.emoji));
            for (property, value) in piece.style() {
                span.style().set_property(property, &value)?;
            }
            container.append_child(&span)?;
        }

        let cleanup = Closure::once(move || container.remove());
        window.set_timeout_with_callback_and_timeout_and_arguments_0(
            cleanup.as_ref().unchecked_ref(),
            lifetime_ms,
        )?;
        cleanup.forget();

        log::debug!("Launched {} confetti pieces", pieces.len());
        Ok(())
    }

    fn setup_countdowns(window: &Window, app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        if app.borrow().countdowns.is_empty() {
            return Ok(());
        }
        let app_clone = app.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            app_clone.borrow().refresh_countdowns(js_sys::Date::now());
        });
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            petal_slides::consts::COUNTDOWN_PERIOD_MS,
        )?;
        closure.forget();
        app.borrow_mut().countdown_interval = Some(id);
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame_loop(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            if !a.running {
                return;
            }
            a.frame(js_sys::Date::now());
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_app::run() {
        log::error!("Petal Slides failed to start: {:?}", e);
    }
}

/// Stop the slideshow's frame loop and timers
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn teardown() {
    wasm_app::teardown();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Petal Slides (native) starting...");
    log::info!("The slideshow runs in the browser - build with `trunk serve`");

    println!("\nRunning headless walkthrough...");
    headless_walkthrough();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the controller and petal field without a browser
#[cfg(not(target_arch = "wasm32"))]
fn headless_walkthrough() {
    use petal_slides::petals::PetalPath;
    use petal_slides::slides::{EnterHook, NavIntent, SlideController, WheelGate};
    use petal_slides::{PetalField, PetalSurface, Settings};

    /// Counts draw calls
    #[derive(Default)]
    struct CountingSurface {
        fills: usize,
    }

    impl PetalSurface for CountingSurface {
        fn set_size(&mut self, _width: f32, _height: f32) {}
        fn clear(&mut self) {
            self.fills = 0;
        }
        fn fill_petal(&mut self, _: glam::Vec2, _: f32, _: f32, _: &PetalPath, _: &str) {
            self.fills += 1;
        }
    }

    let settings = Settings::load();
    let mut slides = SlideController::new(6)
        .with_settle_delay(settings.settle_ms)
        .with_hook(1, EnterHook::timeline(4))
        .with_hook(4, EnterHook::letter(5, true));
    let mut wheel = WheelGate::new(settings.wheel_lock_ms, settings.wheel_threshold);

    let mut now = 0.0;
    slides.start(now);
    for _ in 0..8 {
        now += 300.0;
        if let Some(NavIntent::Next) = wheel.on_wheel(40.0, now) {
            let effects = slides.next(now);
            println!("t={:>5}ms slide {} ({} effects)", now, slides.current() + 1, effects.len());
        }
    }

    let mut surface = CountingSurface::default();
    let mut field = PetalField::new(2025);
    field.initialize(&mut surface, 1024.0, 768.0);
    for _ in 0..600 {
        field.tick();
    }
    field.render(&mut surface);
    println!("✓ {} petals drawn after 600 frames", surface.fills);
}
