//! Hero background pursuit animation
//!
//! Ghosts run on a frame loop for as long as the view lives. The tracked
//! point follows the pointer, or on touch devices a wanderer driven by two
//! interval timers (retarget and step).

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::MouseEvent;

use super::timers::{FrameLoop, IntervalTimer};
use super::{EventListener, canvas, element, fit_canvas, fresh_seed, is_touch_device, set_text, window};
use crate::consts::{WANDER_RETARGET_MS, WANDER_STEP_MS};
use crate::error::Result;
use crate::page::Section;
use crate::renderer::{Canvas2d, hero};
use crate::settings::HeroSettings;
use crate::sim::PursuitState;

pub const CANVAS_ID: &str = "hero-canvas";
pub const SCORE_ID: &str = "hero-score";

pub struct HeroView {
    state: Rc<RefCell<PursuitState>>,
    canvas: Canvas2d,
    _frame_loop: FrameLoop,
    _pointer: EventListener,
    wander_timers: Option<(IntervalTimer, IntervalTimer)>,
}

fn show_score(state: &PursuitState) {
    set_text(SCORE_ID, &state.eaten.to_string());
}

fn start_wander_timers(state: &Rc<RefCell<PursuitState>>) -> Result<(IntervalTimer, IntervalTimer)> {
    let retarget = {
        let state = state.clone();
        IntervalTimer::start(WANDER_RETARGET_MS, move || {
            state.borrow_mut().retarget_wanderer();
        })?
    };
    let step = {
        let state = state.clone();
        IntervalTimer::start(WANDER_STEP_MS, move || {
            let mut s = state.borrow_mut();
            if s.wander_step() > 0 {
                show_score(&s);
            }
        })?
    };
    Ok((retarget, step))
}

impl HeroView {
    pub fn mount(settings: &HeroSettings) -> Result<Self> {
        let canvas = Canvas2d::new(canvas(CANVAS_ID)?)?;
        let (w, h) = fit_canvas(&canvas.canvas);
        let wander = is_touch_device();

        let state = Rc::new(RefCell::new(PursuitState::new(
            w,
            h,
            wander,
            settings.ghost_count,
            fresh_seed(),
        )));
        show_score(&state.borrow());

        let frame_loop = {
            let state = state.clone();
            let canvas = canvas.clone();
            FrameLoop::start(move |time| {
                let mut s = state.borrow_mut();
                s.frame();
                hero::draw(&canvas, &s, time);
                true
            })?
        };

        // Pointer coordinates come in viewport space; the sim wants section space
        let pointer = {
            let state = state.clone();
            let section = element(Section::Hero.id())?;
            EventListener::new(&window()?, "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = section.get_bounding_client_rect();
                let pos = Vec2::new(
                    (event.client_x() as f64 - rect.left()) as f32,
                    (event.client_y() as f64 - rect.top()) as f32,
                );
                let mut s = state.borrow_mut();
                if s.pointer_moved(pos) > 0 {
                    show_score(&s);
                }
            })?
        };

        let wander_timers = if wander {
            Some(start_wander_timers(&state)?)
        } else {
            None
        };

        log::info!(
            "Hero mounted ({} mode), {} pellets",
            if wander { "wander" } else { "pointer" },
            state.borrow().pellets.len()
        );

        Ok(Self {
            state,
            canvas,
            _frame_loop: frame_loop,
            _pointer: pointer,
            wander_timers,
        })
    }

    /// Viewport changed: rebuild the point set, re-check the device mode
    pub fn resize(&mut self) {
        let (w, h) = fit_canvas(&self.canvas.canvas);
        let wander = is_touch_device();
        {
            let mut s = self.state.borrow_mut();
            s.resize(w, h);
            s.set_wander(wander);
            show_score(&s);
        }

        match (wander, self.wander_timers.is_some()) {
            (true, false) => match start_wander_timers(&self.state) {
                Ok(timers) => self.wander_timers = Some(timers),
                Err(e) => log::error!("Hero wander timers failed: {}", e),
            },
            (false, true) => self.wander_timers = None,
            _ => {}
        }
    }
}
