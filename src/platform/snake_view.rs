//! Snake game layered into the About section
//!
//! The tick timer exists only while the snake is running: it starts on the
//! first accepted direction and cancels itself on a crash. Exit cancels it
//! from the key handler.

use std::cell::RefCell;
use std::rc::Rc;

use super::timers::IntervalTimer;
use super::{canvas, fit_canvas, fresh_seed, set_text};
use crate::error::Result;
use crate::input::GameKey;
use crate::renderer::{Canvas2d, snake};
use crate::settings::SnakeSettings;
use crate::sim::{SnakeState, TickOutcome};

pub const CANVAS_ID: &str = "snake-canvas";
pub const SCORE_ID: &str = "snake-score";

pub struct SnakeView {
    state: Rc<RefCell<SnakeState>>,
    canvas: Canvas2d,
    tick_ms: u32,
    timer: Option<IntervalTimer>,
}

fn redraw(canvas: &Canvas2d, state: &SnakeState) {
    snake::draw(canvas, state);
    set_text(SCORE_ID, &state.score.to_string());
}

impl SnakeView {
    pub fn mount(settings: &SnakeSettings) -> Result<Self> {
        let canvas = Canvas2d::new(canvas(CANVAS_ID)?)?;
        fit_canvas(&canvas.canvas);

        let state = SnakeState::new(settings, fresh_seed());
        redraw(&canvas, &state);
        log::info!(
            "Snake mounted: {}x{} board, {} ms tick",
            state.board.width,
            state.board.height,
            settings.tick_ms
        );

        Ok(Self {
            state: Rc::new(RefCell::new(state)),
            canvas,
            tick_ms: settings.tick_ms,
            timer: None,
        })
    }

    fn ticking(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| t.is_active())
    }

    fn start_timer(&mut self) -> Result<()> {
        // Any previous timer cancelled itself on a crash; drop it here, outside its callback
        self.timer = None;

        let state = self.state.clone();
        let canvas = self.canvas.clone();
        let timer = IntervalTimer::start_cancellable(self.tick_ms, move |canceller| {
            let mut s = state.borrow_mut();
            let outcome = s.tick();
            redraw(&canvas, &s);
            match outcome {
                TickOutcome::Crashed(_) | TickOutcome::Idle => canceller.cancel(),
                TickOutcome::Moved | TickOutcome::Ate => {}
            }
        })?;
        self.timer = Some(timer);
        Ok(())
    }

    /// Feed a key press. Returns true if the snake used it.
    pub fn handle_key(&mut self, key: GameKey) -> bool {
        match key {
            GameKey::Move(dir) => {
                let accepted = self.state.borrow_mut().steer(dir);
                if accepted && !self.ticking() {
                    if let Err(e) = self.start_timer() {
                        log::error!("Snake timer failed to start: {}", e);
                    }
                }
                accepted
            }
            GameKey::Exit => {
                let mut state = self.state.borrow_mut();
                if !state.is_running() {
                    return false;
                }
                state.exit();
                if let Some(timer) = &self.timer {
                    timer.cancel();
                }
                redraw(&self.canvas, &state);
                log::debug!("Snake exited at score {}", state.score);
                true
            }
            GameKey::Fire => false,
        }
    }

    /// Viewport changed
    pub fn resize(&self) {
        fit_canvas(&self.canvas.canvas);
        redraw(&self.canvas, &self.state.borrow());
    }
}
