use std::ops::Deref;

use js_sys::Array;
use sightline_core::backend::{EntrySink, ObserverOptions, VisibilityEntry, VisibilityObserver};
use sightline_core::error::ObserveError;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

/// An [`IntersectionObserverEntry`] delivered to user callbacks.
///
/// Dereferences to the raw entry, giving access to the bounding rectangles and timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebEntry(IntersectionObserverEntry);

impl WebEntry {
    pub fn into_inner(self) -> IntersectionObserverEntry {
        self.0
    }
}

impl Deref for WebEntry {
    type Target = IntersectionObserverEntry;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl VisibilityEntry for WebEntry {
    type Element = Element;

    fn target(&self) -> Element {
        self.0.target()
    }

    fn is_intersecting(&self) -> bool {
        self.0.is_intersecting()
    }

    fn intersection_ratio(&self) -> f64 {
        self.0.intersection_ratio()
    }
}

/// An `IntersectionObserver` together with the closure it reports to.
///
/// Disconnects when dropped.
#[derive(Debug)]
pub struct WebObserver {
    observer: IntersectionObserver,
    _closure: Closure<dyn FnMut(Array)>,
}

impl WebObserver {
    pub(crate) fn new(
        options: ObserverOptions<'_, Element>,
        mut sink: EntrySink<WebEntry>,
    ) -> Result<Self, ObserveError> {
        let closure = Closure::new(move |entries: Array| {
            let entries =
                entries.iter().map(|entry| WebEntry(entry.unchecked_into())).collect();
            sink(entries);
        });

        let init = IntersectionObserverInit::new();
        let thresholds: Array = options.thresholds.iter().copied().map(JsValue::from_f64).collect();
        init.set_threshold(&thresholds);
        init.set_root_margin(&options.margin.to_string());
        init.set_root(options.container);

        let observer =
            IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &init)
                .map_err(js_error)?;

        Ok(Self { observer, _closure: closure })
    }

    pub fn raw(&self) -> &IntersectionObserver {
        &self.observer
    }
}

impl VisibilityObserver for WebObserver {
    type Element = Element;

    fn watch(&self, element: &Element) {
        self.observer.observe(element);
    }

    fn unwatch(&self, element: &Element) {
        self.observer.unobserve(element);
    }

    fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for WebObserver {
    fn drop(&mut self) {
        self.observer.disconnect()
    }
}

fn js_error(error: JsValue) -> ObserveError {
    match error.as_string() {
        Some(message) => ObserveError::new(message),
        None => ObserveError::new(format!("{error:?}")),
    }
}
