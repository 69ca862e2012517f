//! Sightline tells you when elements appear in, and disappear from, a viewport or container.
//!
//! # Building a tracker
//!
//! A [`Tracker`] is created from [`TrackerOptions`]. Only the elements to watch are mandatory:
//!
//! - `container`: the element intersections are computed against, the viewport by default.
//! - `margin`: grows (or shrinks, with negative values) the container's bounds, `0px` by default.
//! - `fidelity`: how many evenly spaced visibility steps are reported, `20` by default.
//! - `trigger`: the visible fraction at which an element counts as appeared, `0.85` by default.
//! - `repeat`: whether elements are still watched after they first appeared, `true` by default.
//!
//! plus the optional `on_init`, `on_appear`, `on_disappear` and `on_done` callbacks. The scalar
//! options can also be loaded as a [`TrackerConfig`].
//!
//! The tracker stays idle until the environment signals it is ready, then starts observing. It can
//! be paused, resumed and destroyed at will; see [`tracker`] for the complete lifecycle.
//!
//! # Backends
//!
//! The actual observation is done by a [`Backend`]. On the Web (`wasm32-unknown-unknown`), the
//! `web` module provides one on top of `IntersectionObserver`, and `track()` creates a tracker for
//! the current document. Other hosts implement [`Backend`] and [`ReadySignal`] themselves,
//! [`ManualReady`] being available for hosts without a readiness notification.
//!
//! # Features
//!
//! - `serde`: implements `Serialize`/`Deserialize` for [`TrackerConfig`] and [`Margin`].
//!
//! [`Backend`]: backend::Backend
//! [`ReadySignal`]: backend::ReadySignal
//! [`ManualReady`]: ready::ManualReady
//! [`Margin`]: margin::Margin

pub use sightline_core::{backend, error, margin, options, ready, targets, threshold, tracker};

#[doc(inline)]
pub use self::options::{TrackerConfig, TrackerOptions};
#[doc(inline)]
pub use self::tracker::{Tracker, TrackerState};

/// The Web backend.
#[cfg(web_platform)]
pub mod web {
    pub use sightline_web::*;
}

#[cfg(web_platform)]
#[doc(inline)]
pub use sightline_web::track;
