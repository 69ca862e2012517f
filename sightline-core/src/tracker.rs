//! The observation lifecycle.
//!
//! A [`Tracker`] starts [`Idle`] and begins [`Observing`] once the environment signals it is ready.
//! From there it can be paused and resumed any number of times, and destroyed. A destroyed tracker
//! can be brought back with [`Tracker::resume()`], which reinitializes it from scratch.
//!
//! | From                    | Operation    | To          |
//! |-------------------------|--------------|-------------|
//! | `Idle`                  | ready signal | `Observing` |
//! | `Observing`             | `pause()`    | `Paused`    |
//! | `Paused`                | `resume()`   | `Observing` |
//! | `Idle`/`Observing`/`Paused` | `destroy()` | `Destroyed` |
//! | `Destroyed`             | `resume()`   | `Observing` |
//!
//! Every other combination is a no-op.
//!
//! [`Idle`]: TrackerState::Idle
//! [`Observing`]: TrackerState::Observing

use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::num::NonZeroU32;
use std::rc::Rc;

use crate::backend::{
    Backend, EntrySink, ObserverOptions, ReadySignal, VisibilityEntry, VisibilityObserver,
};
use crate::error::TrackerError;
use crate::handler::Callback;
use crate::margin::Margin;
use crate::options::TrackerOptions;
use crate::targets::Targets;
use crate::threshold::thresholds;

/// The lifecycle state of a [`Tracker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackerState {
    /// Waiting for the environment to become ready.
    Idle,
    /// Watching elements and reporting appearances.
    Observing,
    /// Not watching anything, the observer is kept for [`Tracker::resume()`].
    Paused,
    /// Torn down, only [`Tracker::resume()`] leaves this state.
    Destroyed,
}

/// Everything created by a single activation.
struct Activation<O> {
    observer: O,
    thresholds: Vec<f64>,
}

enum State<O> {
    Idle,
    Observing(Activation<O>),
    /// The observer is disconnected but retained.
    Paused(Activation<O>),
    Destroyed,
}

impl<O> State<O> {
    fn kind(&self) -> TrackerState {
        match self {
            State::Idle => TrackerState::Idle,
            State::Observing(_) => TrackerState::Observing,
            State::Paused(_) => TrackerState::Paused,
            State::Destroyed => TrackerState::Destroyed,
        }
    }

    fn activation(&self) -> Option<&Activation<O>> {
        match self {
            State::Observing(activation) | State::Paused(activation) => Some(activation),
            State::Idle | State::Destroyed => None,
        }
    }
}

struct Shared<B: Backend> {
    backend: B,
    state: RefCell<State<B::Observer>>,
    targets: RefCell<Targets<B::Element>>,
    /// Elements that already appeared while `repeat` is off. They are not watched again until the
    /// tracker is destroyed.
    consumed: RefCell<Vec<B::Element>>,
    container: Option<B::Element>,
    margin: Margin,
    fidelity: NonZeroU32,
    trigger: f64,
    repeat: bool,
    on_init: Callback<dyn FnMut()>,
    on_appear: Callback<dyn FnMut(&B::Element, &B::Entry)>,
    on_disappear: Callback<dyn FnMut(&B::Element, &B::Entry)>,
    on_done: Callback<dyn FnMut()>,
}

impl<B: Backend> Shared<B> {
    fn kind(&self) -> TrackerState {
        self.state.borrow().kind()
    }

    fn ready(self: &Rc<Self>) {
        match self.kind() {
            TrackerState::Idle => self.activate(),
            state => tracing::trace!("ready signal received while {state:?}, ignoring"),
        }
    }

    /// Runs `on_init`, creates a fresh observer and starts watching.
    fn activate(self: &Rc<Self>) {
        let from = self.kind();

        self.on_init.handle(|on_init| on_init());
        if self.kind() != from {
            tracing::debug!("`on_init` moved the tracker out of {from:?}, skipping activation");
            return;
        }

        let thresholds = thresholds(self.fidelity);
        let sink: EntrySink<B::Entry> = {
            let shared = Rc::downgrade(self);
            Box::new(move |entries: Vec<B::Entry>| match shared.upgrade() {
                Some(shared) => shared.classify(entries),
                None => tracing::trace!("visibility entries delivered to a dropped tracker"),
            })
        };
        let options = ObserverOptions {
            container: self.container.as_ref(),
            margin: &self.margin,
            thresholds: &thresholds,
        };
        let observer = match self.backend.observe(options, sink) {
            Ok(observer) => observer,
            Err(error) => {
                tracing::error!("{error}, tracker stays {from:?}");
                return;
            },
        };

        *self.state.borrow_mut() = State::Observing(Activation { observer, thresholds });
        tracing::debug!("tracker {from:?} -> Observing");
        self.watch_targets();
    }

    /// Resolves the targets and watches every one that wasn't consumed.
    fn watch_targets(&self) {
        let elements = self.targets.borrow_mut().resolve();
        let consumed = self.consumed.borrow();
        let state = self.state.borrow();
        let Some(activation) = state.activation() else {
            return;
        };

        let mut watched = 0;
        for element in elements.iter().filter(|element| !consumed.contains(element)) {
            activation.observer.watch(element);
            watched += 1;
        }
        tracing::debug!("watching {watched} of {} resolved elements", elements.len());
    }

    /// Turns a delivered batch into `on_appear`/`on_disappear` calls.
    ///
    /// Every entry is classified on its own, in delivery order. Nothing is deduplicated: entries
    /// the backend already queued for a consumed single-shot element are reported like any other.
    fn classify(&self, entries: Vec<B::Entry>) {
        for entry in entries {
            // The observer may still deliver a batch after a pause or destroy.
            if self.kind() != TrackerState::Observing {
                tracing::trace!("dropping visibility entries delivered while not observing");
                return;
            }

            let target = entry.target();
            let ratio = entry.intersection_ratio();
            if !entry.is_intersecting() {
                tracing::trace!(ratio, "element disappeared");
                self.on_disappear.handle(|on_disappear| on_disappear(&target, &entry));
            } else if ratio >= self.trigger {
                tracing::trace!(ratio, "element appeared");
                self.on_appear.handle(|on_appear| on_appear(&target, &entry));
                if !self.repeat {
                    self.consume(target);
                }
            } else {
                tracing::trace!(ratio, trigger = self.trigger, "intersection below trigger");
            }
        }
    }

    fn consume(&self, element: B::Element) {
        let state = self.state.borrow();
        // Nothing to do if `on_appear` destroyed the tracker.
        if let Some(activation) = state.activation() {
            activation.observer.unwatch(&element);
            let mut consumed = self.consumed.borrow_mut();
            if !consumed.contains(&element) {
                consumed.push(element);
            }
        }
    }
}

/// Tracks when elements appear in, and disappear from, a container.
///
/// This is a cheap handle: clones refer to the same tracker. Observation stops once every handle
/// is dropped.
///
/// All operations are total: calling them in a state where they have no meaning does nothing.
pub struct Tracker<B: Backend> {
    shared: Rc<Shared<B>>,
}

impl<B: Backend> Clone for Tracker<B> {
    fn clone(&self) -> Self {
        Self { shared: self.shared.clone() }
    }
}

impl<B: Backend> Tracker<B> {
    /// Creates an [`Idle`] tracker that starts observing once `ready` fires.
    ///
    /// Only fails if no elements were given.
    ///
    /// [`Idle`]: TrackerState::Idle
    pub fn new(
        backend: B,
        ready: &dyn ReadySignal,
        options: TrackerOptions<B>,
    ) -> Result<Self, TrackerError> {
        let targets = options.elements.ok_or(TrackerError::MissingElements)?;

        let shared = Rc::new(Shared {
            backend,
            state: RefCell::new(State::Idle),
            targets: RefCell::new(targets),
            consumed: RefCell::new(Vec::new()),
            container: options.container,
            margin: options.margin,
            fidelity: options.fidelity,
            trigger: options.trigger,
            repeat: options.repeat,
            on_init: Callback::new("on_init", options.on_init),
            on_appear: Callback::new("on_appear", options.on_appear),
            on_disappear: Callback::new("on_disappear", options.on_disappear),
            on_done: Callback::new("on_done", options.on_done),
        });

        let weak = Rc::downgrade(&shared);
        ready.subscribe(Box::new(move || match weak.upgrade() {
            Some(shared) => shared.ready(),
            None => tracing::trace!("ready signal received by a dropped tracker"),
        }));

        Ok(Self { shared })
    }

    /// Stops watching every element, keeping the observer for [`resume()`][Self::resume].
    ///
    /// Only has an effect while observing.
    pub fn pause(&self) {
        let mut state = self.shared.state.borrow_mut();
        match mem::replace(&mut *state, State::Idle) {
            State::Observing(activation) => {
                activation.observer.disconnect();
                *state = State::Paused(activation);
                tracing::debug!("tracker Observing -> Paused");
            },
            other => {
                tracing::trace!("pause() while {:?} is a no-op", other.kind());
                *state = other;
            },
        }
    }

    /// Starts watching again.
    ///
    /// From [`Paused`], the existing observer is reused and `on_init` is not run again. From
    /// [`Destroyed`], the tracker is reinitialized as if the environment just became ready. The
    /// elements are resolved again in both cases.
    ///
    /// [`Paused`]: TrackerState::Paused
    /// [`Destroyed`]: TrackerState::Destroyed
    pub fn resume(&self) {
        match self.state() {
            TrackerState::Paused => {
                {
                    let mut state = self.shared.state.borrow_mut();
                    if let State::Paused(activation) = mem::replace(&mut *state, State::Idle) {
                        *state = State::Observing(activation);
                    }
                }
                tracing::debug!("tracker Paused -> Observing");
                self.shared.watch_targets();
            },
            TrackerState::Destroyed => self.shared.activate(),
            state @ (TrackerState::Idle | TrackerState::Observing) => {
                tracing::trace!("resume() while {state:?} is a no-op");
            },
        }
    }

    /// Releases the observer and runs `on_done`.
    ///
    /// Elements consumed by single-shot appearances are forgotten, so a following
    /// [`resume()`][Self::resume] watches them again.
    pub fn destroy(&self) {
        let previous = mem::replace(&mut *self.shared.state.borrow_mut(), State::Destroyed);
        let from = previous.kind();
        match previous {
            State::Destroyed => {
                tracing::trace!("destroy() while Destroyed is a no-op");
                return;
            },
            State::Observing(activation) | State::Paused(activation) => {
                activation.observer.disconnect();
            },
            State::Idle => (),
        }

        self.shared.consumed.borrow_mut().clear();
        tracing::debug!("tracker {from:?} -> Destroyed");
        self.shared.on_done.handle(|on_done| on_done());
    }

    /// The current lifecycle state.
    pub fn state(&self) -> TrackerState {
        self.shared.kind()
    }

    /// The minimum intersection ratio classified as an appearance.
    pub fn trigger(&self) -> f64 {
        self.shared.trigger
    }

    /// The number of visibility steps the threshold table is built from.
    pub fn fidelity(&self) -> NonZeroU32 {
        self.shared.fidelity
    }

    /// Whether elements keep being watched after they first appear.
    pub fn repeat(&self) -> bool {
        self.shared.repeat
    }

    /// The margin applied to the container's bounds.
    pub fn margin(&self) -> &Margin {
        &self.shared.margin
    }

    /// The bounding element, or `None` for the viewport.
    pub fn container(&self) -> Option<&B::Element> {
        self.shared.container.as_ref()
    }

    /// The threshold table of the current activation, if the tracker holds an observer.
    pub fn thresholds(&self) -> Option<Vec<f64>> {
        self.shared.state.borrow().activation().map(|activation| activation.thresholds.clone())
    }
}

impl<B: Backend> fmt::Debug for Tracker<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.shared.state.try_borrow() {
            Ok(state) => format!("{:?}", state.kind()),
            Err(_) => "<in transition>".to_owned(),
        };
        f.debug_struct("Tracker")
            .field("state", &state)
            .field("margin", &self.shared.margin)
            .field("fidelity", &self.shared.fidelity)
            .field("trigger", &self.shared.trigger)
            .field("repeat", &self.shared.repeat)
            .finish_non_exhaustive()
    }
}
