use std::cell::RefCell;
use std::fmt;

/// Storage for an optional user callback, allowing it to be invoked through a shared reference.
///
/// User callbacks may call back into the tracker (e.g. destroy it from `on_appear`), which can in
/// turn invoke a different callback. Invoking the *same* callback while it is already running is
/// refused and logged instead of panicking.
pub(crate) struct Callback<F: ?Sized> {
    name: &'static str,
    /// This can be in the following states:
    /// - Not provided by the user (None).
    /// - Present (Some(callback)).
    /// - Currently executing the callback (RefCell borrowed).
    inner: RefCell<Option<Box<F>>>,
}

impl<F: ?Sized> fmt::Debug for Callback<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.inner.try_borrow().as_deref() {
            Ok(Some(_)) => "<available>",
            Ok(None) => "<not set>",
            Err(_) => "<in use>",
        };
        f.debug_struct("Callback").field("name", &self.name).field("state", &state).finish()
    }
}

impl<F: ?Sized> Callback<F> {
    pub fn new(name: &'static str, callback: Option<Box<F>>) -> Self {
        Self { name, inner: RefCell::new(callback) }
    }

    #[cfg(test)]
    pub fn in_use(&self) -> bool {
        self.inner.try_borrow().is_err()
    }

    /// Try to call the callback.
    ///
    /// Returns `false` if no callback was provided, or if it is currently running (re-entrant
    /// call). A missing callback is a silent no-op.
    pub fn handle(&self, call: impl FnOnce(&mut F)) -> bool {
        match self.inner.try_borrow_mut().as_deref_mut() {
            Ok(Some(callback)) => {
                call(&mut **callback);
                true
            },
            Ok(None) => false,
            Err(_) => {
                tracing::error!(
                    "tried to run the `{}` callback while it is already running",
                    self.name
                );
                false
            },
        }
    }
}
