//! # Web
//!
//! Visibility tracking in browsers, on top of [`IntersectionObserver`][observer] through
//! [`wasm-bindgen`][wasm_bindgen].
//!
//! Elements are plain `web_sys::Element`s, and user callbacks receive a [`WebEntry`] which
//! dereferences to the raw [`IntersectionObserverEntry`][entry]. Trackers start observing once the
//! document has been parsed, see [`DocumentReady`].
//!
//! ```no_run
//! use sightline_core::error::TrackerError;
//! use sightline_core::options::TrackerOptions;
//! use sightline_core::targets::Targets;
//! use sightline_core::tracker::Tracker;
//! use sightline_web::WebBackend;
//!
//! // Observation stops once the returned tracker is dropped.
//! fn reveal(hero: web_sys::Element) -> Result<Tracker<WebBackend>, TrackerError> {
//!     sightline_web::track(
//!         TrackerOptions::<WebBackend>::new()
//!             .with_elements(Targets::single(hero))
//!             .with_repeat(false)
//!             .with_on_appear(|element, _| element.set_class_name("visible")),
//!     )
//! }
//! ```
//!
//! [observer]: https://developer.mozilla.org/en-US/docs/Web/API/IntersectionObserver
//! [entry]: https://developer.mozilla.org/en-US/docs/Web/API/IntersectionObserverEntry
//! [wasm_bindgen]: https://docs.rs/wasm-bindgen

pub(crate) mod web_sys;

use ::web_sys::Element;
use sightline_core::backend::{Backend, EntrySink, ObserverOptions};
use sightline_core::error::{ObserveError, TrackerError};
use sightline_core::options::TrackerOptions;
use sightline_core::tracker::Tracker;

pub use self::web_sys::{DocumentReady, WebEntry, WebObserver};

/// Creates `IntersectionObserver`s.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WebBackend;

impl Backend for WebBackend {
    type Element = Element;
    type Entry = WebEntry;
    type Observer = WebObserver;

    fn observe(
        &self,
        options: ObserverOptions<'_, Element>,
        sink: EntrySink<WebEntry>,
    ) -> Result<WebObserver, ObserveError> {
        WebObserver::new(options, sink)
    }
}

/// Creates a tracker for the current document.
///
/// Fails when called outside of a window context, e.g. from a worker.
pub fn track(options: TrackerOptions<WebBackend>) -> Result<Tracker<WebBackend>, TrackerError> {
    let ready = DocumentReady::current()
        .ok_or_else(|| ObserveError::new("no document found, trackers need a window"))?;
    Tracker::new(WebBackend, &ready, options)
}
