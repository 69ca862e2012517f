//! The host capabilities a [`Tracker`] is built on top of.
//!
//! A backend provides two things: a way to create visibility observers, which report what fraction
//! of each watched element intersects a container, and a one-shot signal telling the tracker that
//! the environment is ready to be observed. `sightline-web` implements both on top of
//! `IntersectionObserver` and `DOMContentLoaded`.
//!
//! [`Tracker`]: crate::tracker::Tracker

use crate::error::ObserveError;
use crate::margin::Margin;

/// A single visibility change reported by a [`VisibilityObserver`].
///
/// This is the raw event handed to user callbacks.
pub trait VisibilityEntry {
    type Element;

    /// The element whose visibility changed.
    fn target(&self) -> Self::Element;

    /// Whether the element intersects the (margin-adjusted) container.
    fn is_intersecting(&self) -> bool;

    /// The visible fraction of the element, in `[0, 1]`.
    fn intersection_ratio(&self) -> f64;
}

/// A live observation handle.
///
/// Dropping the observer must stop any further delivery of entries.
pub trait VisibilityObserver {
    type Element;

    /// Start reporting visibility changes for `element`.
    ///
    /// Entries must be delivered asynchronously, never from within this call.
    fn watch(&self, element: &Self::Element);

    /// Stop reporting visibility changes for `element`.
    fn unwatch(&self, element: &Self::Element);

    /// Stop reporting visibility changes for every watched element.
    ///
    /// The observer stays usable: elements can be watched again afterwards.
    fn disconnect(&self);
}

/// Receives every batch of entries delivered by an observer.
pub type EntrySink<T> = Box<dyn FnMut(Vec<T>)>;

/// The parameters a visibility observer is created with.
#[derive(Debug)]
pub struct ObserverOptions<'a, E> {
    /// The bounding element, or `None` for the viewport.
    pub container: Option<&'a E>,
    pub margin: &'a Margin,
    /// Intersection ratios at which entries are delivered.
    pub thresholds: &'a [f64],
}

/// Creates visibility observers.
pub trait Backend: 'static {
    type Element: Clone + PartialEq + 'static;
    type Entry: VisibilityEntry<Element = Self::Element> + 'static;
    type Observer: VisibilityObserver<Element = Self::Element> + 'static;

    /// Create an observer configured with `options`, delivering entry batches to `sink`.
    ///
    /// The observer must not watch anything until [`VisibilityObserver::watch()`] is called.
    fn observe(
        &self,
        options: ObserverOptions<'_, Self::Element>,
        sink: EntrySink<Self::Entry>,
    ) -> Result<Self::Observer, ObserveError>;
}

/// A one-shot notification that the environment is ready to be observed.
pub trait ReadySignal {
    /// Run `callback` once the environment is ready.
    ///
    /// If the environment is already ready, the callback may run at any later point, but must not
    /// run before `subscribe` returns.
    fn subscribe(&self, callback: Box<dyn FnOnce()>);
}
