//! Host-scheduled loops with lifecycle-bound teardown
//!
//! A loop's callback must never drop its own handle. It stops itself by
//! returning `false` (frame loop) or cancelling (interval); the owner drops
//! the handle later, from outside the callback.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::window;
use crate::error::Result;

/// Cancels an interval from inside (or outside) its own callback
#[derive(Clone)]
pub struct IntervalCanceller {
    handle: Rc<Cell<Option<i32>>>,
}

impl IntervalCanceller {
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(id);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.get().is_some()
    }
}

/// `setInterval` handle, cleared on drop
pub struct IntervalTimer {
    canceller: IntervalCanceller,
    _closure: Closure<dyn FnMut()>,
}

impl IntervalTimer {
    pub fn start<F>(period_ms: u32, callback: F) -> Result<Self>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut()>::new(callback);
        let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(Self {
            canceller: IntervalCanceller {
                handle: Rc::new(Cell::new(Some(id))),
            },
            _closure: closure,
        })
    }

    /// Start a timer whose callback gets its own canceller
    pub fn start_cancellable<F>(period_ms: u32, mut callback: F) -> Result<Self>
    where
        F: FnMut(&IntervalCanceller) + 'static,
    {
        let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let inner = IntervalCanceller {
            handle: handle.clone(),
        };
        let closure = Closure::<dyn FnMut()>::new(move || callback(&inner));
        let id = window()?.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        handle.set(Some(id));
        Ok(Self {
            canceller: IntervalCanceller { handle },
            _closure: closure,
        })
    }

    pub fn is_active(&self) -> bool {
        self.canceller.is_active()
    }

    pub fn cancel(&self) {
        self.canceller.cancel();
    }
}

impl Drop for IntervalTimer {
    fn drop(&mut self) {
        self.canceller.cancel();
    }
}

struct FrameShared {
    closure: Option<Closure<dyn FnMut(f64)>>,
    handle: Option<i32>,
    stopped: bool,
}

/// `requestAnimationFrame` chain, cancelled on drop
pub struct FrameLoop {
    shared: Rc<RefCell<FrameShared>>,
}

fn request_frame(closure: &Closure<dyn FnMut(f64)>) -> Option<i32> {
    match web_sys::window().map(|w| w.request_animation_frame(closure.as_ref().unchecked_ref())) {
        Some(Ok(id)) => Some(id),
        Some(Err(e)) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
        None => None,
    }
}

impl FrameLoop {
    /// Run `step(timestamp_ms)` once per display frame until it returns false
    pub fn start<F>(mut step: F) -> Result<Self>
    where
        F: FnMut(f64) -> bool + 'static,
    {
        window()?;
        let shared = Rc::new(RefCell::new(FrameShared {
            closure: None,
            handle: None,
            stopped: false,
        }));
        let weak: Weak<RefCell<FrameShared>> = Rc::downgrade(&shared);

        let closure = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            {
                let mut s = shared.borrow_mut();
                s.handle = None;
                if s.stopped {
                    return;
                }
            }

            let keep_going = step(time);

            let mut s = shared.borrow_mut();
            if keep_going && !s.stopped {
                s.handle = s.closure.as_ref().and_then(request_frame);
            } else {
                s.stopped = true;
            }
        });

        let handle = request_frame(&closure);
        {
            let mut s = shared.borrow_mut();
            s.handle = handle;
            s.closure = Some(closure);
        }
        Ok(Self { shared })
    }

    /// True once the step returned false or the loop was stopped
    pub fn is_stopped(&self) -> bool {
        self.shared.borrow().stopped
    }

    /// Stop scheduling frames; the closure stays alive until drop
    pub fn stop(&self) {
        let mut s = self.shared.borrow_mut();
        s.stopped = true;
        if let Some(id) = s.handle.take() {
            if let Some(w) = web_sys::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
        self.shared.borrow_mut().closure.take();
    }
}
