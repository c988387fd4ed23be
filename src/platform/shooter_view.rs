//! Shooter game layered into the Tracks section
//!
//! Idle until an activation key. A session owns its state and controls; it
//! is created on activation and dropped when the ship is lost or the player
//! exits. The frame loop stops itself at that point and is released on the
//! next activation or when the view goes away.

use std::cell::RefCell;
use std::rc::Rc;

use super::timers::FrameLoop;
use super::{canvas, fit_canvas, fresh_seed, now_ms, set_body_class, set_hidden, set_text};
use crate::error::Result;
use crate::input::{GameKey, ShooterControls};
use crate::renderer::{Canvas2d, shooter};
use crate::settings::ShooterSettings;
use crate::sim::{FrameOutcome, ShooterState};

pub const CANVAS_ID: &str = "shooter-canvas";
pub const SCORE_ID: &str = "shooter-score";
/// Marketing content shown while no session runs
pub const IDLE_ID: &str = "tracks-idle";
/// Full-screen game mode class on `<body>`
pub const GAME_ACTIVE_CLASS: &str = "game-active";

struct ShooterSession {
    state: ShooterState,
    controls: ShooterControls,
}

pub struct ShooterView {
    session: Rc<RefCell<Option<ShooterSession>>>,
    canvas: Canvas2d,
    settings: ShooterSettings,
    frame_loop: Option<FrameLoop>,
}

fn show_game(on: bool) {
    set_body_class(GAME_ACTIVE_CLASS, on);
    set_hidden(IDLE_ID, on);
    set_hidden(CANVAS_ID, !on);
}

impl ShooterView {
    pub fn mount(settings: &ShooterSettings) -> Result<Self> {
        let canvas = Canvas2d::new(canvas(CANVAS_ID)?)?;
        show_game(false);
        Ok(Self {
            session: Rc::new(RefCell::new(None)),
            canvas,
            settings: settings.clone(),
            frame_loop: None,
        })
    }

    pub fn is_active(&self) -> bool {
        self.session.borrow().is_some()
    }

    fn activate(&mut self) -> Result<()> {
        // Previous loop already stopped itself; release it outside its callback
        self.frame_loop = None;

        show_game(true);
        let (w, h) = fit_canvas(&self.canvas.canvas);
        let mut state = ShooterState::new(w, h, fresh_seed(), now_ms());
        state.normalize_frame_rate = self.settings.normalize_frame_rate;
        *self.session.borrow_mut() = Some(ShooterSession {
            state,
            controls: ShooterControls::default(),
        });
        log::info!("Shooter session started on {}x{} playfield", w, h);

        let session = self.session.clone();
        let canvas = self.canvas.clone();
        let frame_loop = FrameLoop::start(move |time| {
            let mut slot = session.borrow_mut();
            let Some(active) = slot.as_mut() else {
                return false;
            };

            let input = active.controls.take_frame_input();
            let outcome = active.state.frame(&input, time);
            shooter::draw(&canvas, &active.state, time);
            set_text(SCORE_ID, &active.state.score.to_string());

            if outcome == FrameOutcome::Continue {
                return true;
            }
            // Session over: state goes away with it
            *slot = None;
            show_game(false);
            false
        })?;
        self.frame_loop = Some(frame_loop);
        Ok(())
    }

    /// Key press. Returns true if the shooter used it.
    pub fn key_down(&mut self, key: GameKey) -> bool {
        if let Some(active) = self.session.borrow_mut().as_mut() {
            return active.controls.key_down(key);
        }
        if !key.activates_shooter() {
            return false;
        }
        if let Err(e) = self.activate() {
            log::error!("Shooter failed to start: {}", e);
            *self.session.borrow_mut() = None;
            show_game(false);
            return false;
        }
        true
    }

    pub fn key_up(&mut self, key: GameKey) -> bool {
        match self.session.borrow_mut().as_mut() {
            Some(active) => active.controls.key_up(key),
            None => false,
        }
    }

    pub fn resize(&self) {
        if let Some(active) = self.session.borrow_mut().as_mut() {
            let (w, h) = fit_canvas(&self.canvas.canvas);
            active.state.resize(w, h);
        }
    }
}

impl Drop for ShooterView {
    fn drop(&mut self) {
        self.frame_loop = None;
        self.session.borrow_mut().take();
        show_game(false);
    }
}
