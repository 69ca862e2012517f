#![cfg(all(target_family = "wasm", target_os = "unknown"))]

use std::cell::RefCell;
use std::rc::Rc;

use sightline::error::TrackerError;
use sightline::margin::Margin;
use sightline::targets::Targets;
use sightline::web::WebBackend;
use sightline::{TrackerOptions, TrackerState};
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_web::MakeWebConsoleWriter;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{Element, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn init() {
    console_error_panic_hook::set_once();

    let layer =
        fmt::layer().with_ansi(false).without_time().with_writer(MakeWebConsoleWriter::new());
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn block(style: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let element: HtmlElement = document.create_element("div").unwrap().unchecked_into();
    element.style().set_css_text(style);
    document.body().unwrap().append_child(&element).unwrap();
    element.into()
}

fn visible_block() -> Element {
    block("position: fixed; top: 0; left: 0; width: 100px; height: 100px;")
}

fn hidden_block() -> Element {
    block("position: absolute; top: 10000px; left: 0; width: 100px; height: 100px;")
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[derive(Clone, Default)]
struct Journal(Rc<RefCell<Vec<&'static str>>>);

impl Journal {
    fn push(&self, line: &'static str) {
        self.0.borrow_mut().push(line);
    }

    fn count(&self, line: &str) -> usize {
        self.0.borrow().iter().filter(|entry| **entry == line).count()
    }
}

fn journaled(journal: &Journal, element: &Element) -> TrackerOptions<WebBackend> {
    let on_init = journal.clone();
    let on_appear = journal.clone();
    let on_disappear = journal.clone();
    let on_done = journal.clone();
    TrackerOptions::<WebBackend>::new()
        .with_elements(Targets::single(element.clone()))
        .with_on_init(move || on_init.push("init"))
        .with_on_appear(move |_, entry| {
            assert!(entry.is_intersecting());
            on_appear.push("appear")
        })
        .with_on_disappear(move |_, _| on_disappear.push("disappear"))
        .with_on_done(move || on_done.push("done"))
}

#[wasm_bindgen_test]
async fn appears_once_ready() {
    init();
    let element = visible_block();
    let journal = Journal::default();

    let tracker = sightline::track(journaled(&journal, &element)).unwrap();
    // The document is already loaded, readiness is still reported asynchronously.
    assert_eq!(tracker.state(), TrackerState::Idle);

    sleep(100).await;
    assert_eq!(tracker.state(), TrackerState::Observing);
    assert_eq!(journal.count("init"), 1);
    assert_eq!(journal.count("appear"), 1);
    assert_eq!(journal.count("disappear"), 0);
    assert_eq!(tracker.thresholds().map(|table| table.len()), Some(22));

    tracker.destroy();
    assert_eq!(journal.count("done"), 1);
    element.remove();
}

#[wasm_bindgen_test]
async fn offscreen_element_disappears() {
    init();
    let element = hidden_block();
    let journal = Journal::default();

    let tracker = sightline::track(journaled(&journal, &element)).unwrap();
    sleep(100).await;
    assert_eq!(journal.count("appear"), 0);
    assert_eq!(journal.count("disappear"), 1);

    tracker.destroy();
    element.remove();
}

#[wasm_bindgen_test]
async fn resume_rewatches_without_init() {
    init();
    let element = visible_block();
    let journal = Journal::default();

    let tracker = sightline::track(journaled(&journal, &element)).unwrap();
    sleep(100).await;
    assert_eq!(journal.count("appear"), 1);

    tracker.pause();
    assert_eq!(tracker.state(), TrackerState::Paused);
    sleep(50).await;
    assert_eq!(journal.count("appear"), 1);

    tracker.resume();
    sleep(100).await;
    assert_eq!(tracker.state(), TrackerState::Observing);
    assert_eq!(journal.count("appear"), 2);
    assert_eq!(journal.count("init"), 1);

    tracker.destroy();
    element.remove();
}

#[wasm_bindgen_test]
async fn single_shot_is_not_rewatched() {
    init();
    let element = visible_block();
    let journal = Journal::default();

    let tracker =
        sightline::track(journaled(&journal, &element).with_repeat(false)).unwrap();
    sleep(100).await;
    assert_eq!(journal.count("appear"), 1);

    tracker.pause();
    tracker.resume();
    sleep(100).await;
    assert_eq!(journal.count("appear"), 1);

    tracker.destroy();
    element.remove();
}

#[wasm_bindgen_test]
async fn destroy_then_resume_reinitializes() {
    init();
    let element = visible_block();
    let journal = Journal::default();

    let tracker = sightline::track(journaled(&journal, &element)).unwrap();
    sleep(100).await;

    tracker.destroy();
    tracker.pause();
    assert_eq!(tracker.state(), TrackerState::Destroyed);
    assert_eq!(journal.count("done"), 1);

    tracker.resume();
    assert_eq!(tracker.state(), TrackerState::Observing);
    assert_eq!(journal.count("init"), 2);
    sleep(100).await;
    assert_eq!(journal.count("appear"), 2);

    tracker.destroy();
    element.remove();
}

#[wasm_bindgen_test]
async fn trigger_above_one_never_appears() {
    init();
    let element = visible_block();
    let journal = Journal::default();

    assert_eq!("1em".parse::<Margin>(), Err(TrackerError::InvalidMargin("1em".into())));

    let options =
        journaled(&journal, &element).with_margin("10px".parse().unwrap()).with_trigger(1.5);
    let tracker = sightline::track(options).unwrap();
    sleep(100).await;
    assert_eq!(tracker.state(), TrackerState::Observing);
    assert_eq!(journal.count("init"), 1);
    assert_eq!(journal.count("appear"), 0);

    tracker.destroy();
    element.remove();
}
