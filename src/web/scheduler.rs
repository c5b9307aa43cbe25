//! `requestAnimationFrame` as a `FrameScheduler`

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Window;

use crate::core::FrameScheduler;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Clones share one callback slot, so the renderer can hold a scheduler
/// whose callback is installed after the renderer exists.
#[derive(Clone)]
pub struct AnimationFrameScheduler {
    window: Window,
    callback: FrameCallback,
}

impl AnimationFrameScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: Rc::new(RefCell::new(None)),
        }
    }

    /// Set the function run on every requested frame
    pub fn install(&self, on_frame: impl FnMut() + 'static) {
        let closure = Closure::wrap(Box::new(on_frame) as Box<dyn FnMut()>);
        *self.callback.borrow_mut() = Some(closure);
    }
}

impl FrameScheduler for AnimationFrameScheduler {
    fn request_frame(&self) {
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            warn!("Frame requested before a callback was installed");
            return;
        };
        if let Err(e) = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
        {
            error!(?e, "requestAnimationFrame failed");
        }
    }
}
