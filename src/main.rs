//! MetaVerse Arcade entry point
//!
//! Browser: plays the intro, then mounts the three toys and routes keys.
//! Native: runs the simulations headlessly with the demo autopilots.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::JsCast;
    use web_sys::{HtmlVideoElement, KeyboardEvent};

    use metaverse_arcade::error::Result;
    use metaverse_arcade::input::{GameKey, KeyRouter, KeyTarget};
    use metaverse_arcade::page::{IntroPhase, IntroSequence, Section};
    use metaverse_arcade::platform::hero_view::HeroView;
    use metaverse_arcade::platform::shooter_view::ShooterView;
    use metaverse_arcade::platform::snake_view::SnakeView;
    use metaverse_arcade::platform::timers::FrameLoop;
    use metaverse_arcade::platform::{
        self, EventListener, document, now_ms, section_visibility, set_body_class, set_hidden,
        window,
    };
    use metaverse_arcade::Settings;

    const LOADING_ID: &str = "loading";
    const INTRO_VIDEO_ID: &str = "intro-video";
    const FLASH_CLASS: &str = "white-flash";
    const CONTENT_ID: &str = "content";

    /// Everything mounted after the intro
    struct Arcade {
        snake: Option<SnakeView>,
        shooter: Option<ShooterView>,
        hero: Option<HeroView>,
        router: KeyRouter,
    }

    impl Arcade {
        fn mount(settings: &Settings) -> Self {
            // A missing section only disables its toy; the rest of the page keeps going
            let snake = SnakeView::mount(&settings.snake)
                .inspect_err(|e| log::error!("Snake not mounted: {}", e))
                .ok();
            let shooter = ShooterView::mount(&settings.shooter)
                .inspect_err(|e| log::error!("Shooter not mounted: {}", e))
                .ok();
            let hero = if settings.hero.enabled && !settings.reduced_motion {
                HeroView::mount(&settings.hero)
                    .inspect_err(|e| log::error!("Hero animation not mounted: {}", e))
                    .ok()
            } else {
                None
            };
            Self {
                snake,
                shooter,
                hero,
                router: KeyRouter::default(),
            }
        }

        fn target(&self) -> KeyTarget {
            // A running shooter session keeps the keyboard
            if self.shooter.as_ref().is_some_and(|s| s.is_active()) {
                return KeyTarget::Shooter;
            }
            self.router.route(
                section_visibility(Section::About.id()),
                section_visibility(Section::Tracks.id()),
            )
        }

        fn key_down(&mut self, key: GameKey) -> bool {
            match self.target() {
                KeyTarget::Snake => self.snake.as_mut().is_some_and(|s| s.handle_key(key)),
                KeyTarget::Shooter => self.shooter.as_mut().is_some_and(|s| s.key_down(key)),
                KeyTarget::None => false,
            }
        }

        fn key_up(&mut self, key: GameKey) -> bool {
            self.shooter.as_mut().is_some_and(|s| s.key_up(key))
        }

        fn resize(&mut self) {
            if let Some(s) = &self.snake {
                s.resize();
            }
            if let Some(s) = &self.shooter {
                s.resize();
            }
            if let Some(h) = &mut self.hero {
                h.resize();
            }
        }
    }

    fn install_listeners(arcade: Rc<RefCell<Arcade>>) -> Result<()> {
        let window = window()?;

        {
            let arcade = arcade.clone();
            EventListener::new(&window, "keydown", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let Some(key) = GameKey::from_key_name(&event.key()) else {
                    return;
                };
                // Keep arrows and space from scrolling the page while a game uses them
                if arcade.borrow_mut().key_down(key) {
                    event.prevent_default();
                }
            })?
            .forget();
        }

        {
            let arcade = arcade.clone();
            EventListener::new(&window, "keyup", move |event| {
                let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if let Some(key) = GameKey::from_key_name(&event.key()) {
                    if arcade.borrow_mut().key_up(key) {
                        event.prevent_default();
                    }
                }
            })?
            .forget();
        }

        EventListener::new(&window, "resize", move |_| {
            arcade.borrow_mut().resize();
        })?
        .forget();

        Ok(())
    }

    fn show_content(settings: &Settings) {
        set_hidden(LOADING_ID, true);
        set_hidden(CONTENT_ID, false);
        set_body_class(FLASH_CLASS, false);

        let arcade = Rc::new(RefCell::new(Arcade::mount(settings)));
        if let Err(e) = install_listeners(arcade) {
            log::error!("Input listeners not installed: {}", e);
        }
        log::info!("MetaVerse Arcade running");
    }

    /// Drive the intro on the frame clock, then hand over to the page
    fn play_intro(settings: Settings) -> Result<()> {
        let now = now_ms();
        if settings.reduced_motion {
            log::debug!("Reduced motion, intro {:?}", IntroSequence::skipped(now).phase);
            show_content(&settings);
            return Ok(());
        }

        let intro = Rc::new(RefCell::new(IntroSequence::new(now)));
        let video = document()?
            .get_element_by_id(INTRO_VIDEO_ID)
            .and_then(|el| el.dyn_into::<HtmlVideoElement>().ok());

        let frame_loop = FrameLoop::start(move |time| {
            let mut intro = intro.borrow_mut();
            let changed = match &video {
                Some(v) => intro.video_time(v.current_time(), time),
                None => None,
            }
            .or_else(|| intro.update(time));

            match changed {
                Some(IntroPhase::WhiteFlash) => {
                    if let Some(Err(e)) = video.as_ref().map(|v| v.pause()) {
                        log::warn!("Intro video pause failed: {:?}", e);
                    }
                    set_body_class(FLASH_CLASS, true);
                    true
                }
                Some(IntroPhase::Complete) => {
                    show_content(&settings);
                    false
                }
                _ => true,
            }
        })?;
        // Runs once per page load and stops itself on Complete
        std::mem::forget(frame_loop);
        Ok(())
    }

    pub fn run() {
        console_error_panic_hook::set_once();

        let settings = match Settings::load() {
            Ok(settings) => settings,
            Err(e) => {
                // Logger isn't up yet; the console still shows it
                web_sys::console::error_1(&format!("Bad arcade config, using defaults: {}", e).into());
                Settings::default()
            }
        };
        let level = settings.level_filter().to_level().unwrap_or(log::Level::Info);
        if console_log::init_with_level(level).is_err() {
            web_sys::console::warn_1(&"Logger already initialised".into());
        }

        log::info!("MetaVerse Arcade starting...");
        log::debug!("Touch device: {}", platform::is_touch_device());

        if let Err(e) = play_intro(settings) {
            log::error!("Intro failed: {}", e);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use metaverse_arcade::Settings;

    env_logger::init();
    log::info!("MetaVerse Arcade (native) starting...");
    log::info!("The page runs in the browser - use `trunk serve`; running headless demos");

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("{}; using defaults", e);
            Settings::default()
        }
    };

    demo::snake(&settings, 5_000);
    demo::shooter(&settings, 20_000);
    demo::hero(&settings, 600);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use glam::Vec2;

    use metaverse_arcade::Settings;
    use metaverse_arcade::sim::autopilot::{shooter_input, snake_direction};
    use metaverse_arcade::sim::{FrameOutcome, PursuitState, ShooterState, SnakeState, TickOutcome};

    const SEED: u64 = 0x4d45_5441;

    pub fn snake(settings: &Settings, ticks: u32) {
        let mut state = SnakeState::new(&settings.snake, SEED);
        let (mut runs, mut best, mut eaten) = (0u32, 0u32, 0u32);
        for _ in 0..ticks {
            state.steer(snake_direction(&state));
            match state.tick() {
                TickOutcome::Ate => {
                    eaten += 1;
                    best = best.max(state.score);
                }
                TickOutcome::Crashed(_) => runs += 1,
                TickOutcome::Moved | TickOutcome::Idle => {}
            }
        }
        log::info!(
            "Snake: {} ticks, {} food eaten, {} crashes, best score {}",
            ticks,
            eaten,
            runs,
            best
        );
    }

    pub fn shooter(settings: &Settings, max_frames: u32) {
        let mut state = ShooterState::new(800.0, 600.0, SEED, 0.0);
        state.normalize_frame_rate = settings.shooter.normalize_frame_rate;
        let mut fired = false;
        let mut outcome = FrameOutcome::Continue;
        for frame in 1..=max_frames {
            let input = shooter_input(&state, fired);
            fired = input.fire;
            outcome = state.frame(&input, frame as f64 * 1000.0 / 60.0);
            if outcome != FrameOutcome::Continue {
                break;
            }
        }
        log::info!(
            "Shooter: {:?} after {} frames, {} kills, score {}",
            outcome,
            state.frames,
            state.kills,
            state.score
        );
    }

    pub fn hero(settings: &Settings, frames: u32) {
        let mut state = PursuitState::new(1280.0, 720.0, false, settings.hero.ghost_count, SEED);
        let total = state.pellets.len();
        // Sweep the pointer across the field in a zigzag
        for f in 0..frames {
            let t = f as f32 / frames as f32;
            let row = (t * 6.0).floor();
            let along = (t * 6.0).fract();
            let x = if row as u32 % 2 == 0 { along } else { 1.0 - along } * 1280.0;
            let y = 100.0 + row * 100.0 + 15.0;
            state.pointer_moved(Vec2::new(x, y));
            state.frame();
        }
        log::info!(
            "Hero: {} of {} pellets eaten over {} frames",
            state.eaten,
            total,
            frames
        );
    }
}
