//! An in-memory host driving trackers from tests.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sightline_core::backend::{
    Backend, EntrySink, ObserverOptions, VisibilityEntry, VisibilityObserver,
};
use sightline_core::error::ObserveError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element(pub &'static str);

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub target: Element,
    pub intersecting: bool,
    pub ratio: f64,
}

impl Entry {
    pub fn visible(target: &'static str, ratio: f64) -> Self {
        Self { target: Element(target), intersecting: true, ratio }
    }

    pub fn hidden(target: &'static str) -> Self {
        Self { target: Element(target), intersecting: false, ratio: 0.0 }
    }
}

impl VisibilityEntry for Entry {
    type Element = Element;

    fn target(&self) -> Element {
        self.target.clone()
    }

    fn is_intersecting(&self) -> bool {
        self.intersecting
    }

    fn intersection_ratio(&self) -> f64 {
        self.ratio
    }
}

pub struct ObserverRecord {
    sink: RefCell<EntrySink<Entry>>,
    pub container: Option<Element>,
    pub margin: String,
    pub thresholds: Vec<f64>,
    pub watched: RefCell<Vec<Element>>,
    pub disconnects: Cell<usize>,
    pub dropped: Cell<bool>,
}

pub struct MockObserver(Rc<ObserverRecord>);

impl VisibilityObserver for MockObserver {
    type Element = Element;

    fn watch(&self, element: &Element) {
        let mut watched = self.0.watched.borrow_mut();
        if !watched.contains(element) {
            watched.push(element.clone());
        }
    }

    fn unwatch(&self, element: &Element) {
        self.0.watched.borrow_mut().retain(|watched| watched != element);
    }

    fn disconnect(&self) {
        self.0.watched.borrow_mut().clear();
        self.0.disconnects.set(self.0.disconnects.get() + 1);
    }
}

impl Drop for MockObserver {
    fn drop(&mut self) {
        self.0.watched.borrow_mut().clear();
        self.0.dropped.set(true);
    }
}

#[derive(Default)]
pub struct Host {
    observers: RefCell<Vec<Rc<ObserverRecord>>>,
    fail_next: RefCell<Option<String>>,
}

impl Host {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn backend(self: &Rc<Self>) -> MockBackend {
        MockBackend { host: self.clone() }
    }

    pub fn observers_created(&self) -> usize {
        self.observers.borrow().len()
    }

    pub fn current(&self) -> Rc<ObserverRecord> {
        self.observers.borrow().last().cloned().expect("no observer was created")
    }

    pub fn watched(&self) -> Vec<Element> {
        self.current().watched.borrow().clone()
    }

    pub fn fail_next(&self, message: &str) {
        *self.fail_next.borrow_mut() = Some(message.to_owned());
    }

    /// Deliver a batch through the most recent observer, whether or not it watches the targets.
    pub fn deliver(&self, entries: Vec<Entry>) {
        let record = self.current();
        let mut sink = record.sink.borrow_mut();
        (*sink)(entries);
    }
}

pub struct MockBackend {
    host: Rc<Host>,
}

impl Backend for MockBackend {
    type Element = Element;
    type Entry = Entry;
    type Observer = MockObserver;

    fn observe(
        &self,
        options: ObserverOptions<'_, Element>,
        sink: EntrySink<Entry>,
    ) -> Result<MockObserver, ObserveError> {
        if let Some(message) = self.host.fail_next.borrow_mut().take() {
            return Err(ObserveError::new(message));
        }

        let record = Rc::new(ObserverRecord {
            sink: RefCell::new(sink),
            container: options.container.cloned(),
            margin: options.margin.to_string(),
            thresholds: options.thresholds.to_vec(),
            watched: RefCell::new(Vec::new()),
            disconnects: Cell::new(0),
            dropped: Cell::new(false),
        });
        self.host.observers.borrow_mut().push(record.clone());
        Ok(MockObserver(record))
    }
}

/// A log of every user callback, in invocation order.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<String>>>);

impl Journal {
    pub fn push(&self, line: impl Into<String>) {
        self.0.borrow_mut().push(line.into());
    }

    pub fn take(&self) -> Vec<String> {
        self.0.take()
    }

    pub fn count(&self, line: &str) -> usize {
        self.0.borrow().iter().filter(|entry| *entry == line).count()
    }
}
