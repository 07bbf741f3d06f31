//! Click handlers and the navigation interface they drive.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::step::Step;

/// Navigation operations available to a click handler.
///
/// Handlers run after the click has been dispatched and receive the tour
/// mutably, so a handler can never start a render while another one is still
/// in progress.
pub trait TourControl {
    /// Show the next queued step, or terminate after the last one.
    fn advance(&mut self) -> Result<()>;

    /// Show the previous queued step (stays on the first one).
    fn retreat(&mut self) -> Result<()>;

    /// Remove every region and listener and reset the tour.
    fn terminate(&mut self);

    /// Show a single step outside the queue.
    fn focus_single(&mut self, step: &Step) -> Result<()>;
}

type HandlerFn = dyn Fn(&mut dyn TourControl) -> Result<()>;

/// A cloneable click callback.
#[derive(Clone)]
pub struct ClickHandler {
    label: &'static str,
    func: Rc<HandlerFn>,
}

impl ClickHandler {
    /// Wrap an arbitrary callback.
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&mut dyn TourControl) -> Result<()> + 'static,
    {
        Self {
            label: "custom",
            func: Rc::new(func),
        }
    }

    /// Handler that ends the tour. This is the default dismiss action.
    pub fn terminate() -> Self {
        Self {
            label: "terminate",
            func: Rc::new(|tour| {
                tour.terminate();
                Ok(())
            }),
        }
    }

    /// Handler that moves to the next step.
    pub fn advance() -> Self {
        Self {
            label: "advance",
            func: Rc::new(|tour| tour.advance()),
        }
    }

    /// Handler that moves to the previous step.
    pub fn retreat() -> Self {
        Self {
            label: "retreat",
            func: Rc::new(|tour| tour.retreat()),
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Run the handler against a tour.
    pub fn call(&self, tour: &mut dyn TourControl) -> Result<()> {
        (self.func)(tour)
    }
}

impl Default for ClickHandler {
    fn default() -> Self {
        Self::terminate()
    }
}

impl fmt::Debug for ClickHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClickHandler").field(&self.label).finish()
    }
}
