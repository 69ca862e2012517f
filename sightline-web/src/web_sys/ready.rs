use sightline_core::backend::ReadySignal;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen::JsCast;
use web_sys::Document;

/// Fires once the document has finished parsing.
///
/// If the document is already interactive or complete, subscribers run on the next turn of the
/// event loop instead.
#[derive(Debug, Clone)]
pub struct DocumentReady {
    document: Document,
}

impl DocumentReady {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Readiness of the current window's document, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }
}

impl ReadySignal for DocumentReady {
    fn subscribe(&self, callback: Box<dyn FnOnce()>) {
        if !self.is_loading() {
            wasm_bindgen_futures::spawn_local(async move { callback() });
            return;
        }

        let listener = Closure::once_into_js(move || callback());
        if let Err(error) = self
            .document
            .add_event_listener_with_callback("DOMContentLoaded", listener.unchecked_ref())
        {
            tracing::error!("failed to listen for `DOMContentLoaded`: {error:?}");
        }
    }
}
