//! A readiness signal fired by hand.

use std::cell::RefCell;
use std::fmt;

use crate::backend::ReadySignal;

/// A [`ReadySignal`] fired explicitly by the host.
///
/// Useful for environments without a native readiness notification: the host calls
/// [`fire()`][Self::fire] once it is ready to be observed.
#[derive(Default)]
pub struct ManualReady {
    pending: RefCell<Vec<Box<dyn FnOnce()>>>,
}

impl ManualReady {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback subscribed since the last call, in subscription order.
    ///
    /// Returns the number of callbacks that ran.
    pub fn fire(&self) -> usize {
        // Take the callbacks out first, they may subscribe again.
        let pending = self.pending.take();
        let count = pending.len();
        for callback in pending {
            callback();
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }
}

impl ReadySignal for ManualReady {
    fn subscribe(&self, callback: Box<dyn FnOnce()>) {
        self.pending.borrow_mut().push(callback);
    }
}

impl fmt::Debug for ManualReady {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManualReady").field("pending", &self.pending()).finish()
    }
}
