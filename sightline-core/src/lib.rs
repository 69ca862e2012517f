//! Base types for visibility tracking.
//!
//! This crate contains the platform independent part of [`sightline`]: the [`Tracker`] lifecycle,
//! the threshold table construction and the classification of raw visibility entries into
//! appearances and disappearances. Hosts plug in through the traits in [`backend`], which allows
//! the tracker to be driven by `IntersectionObserver` on the Web, or by anything else able to
//! report intersection ratios.
//!
//! [`sightline`]: https://docs.rs/sightline
//! [`Tracker`]: tracker::Tracker

pub mod backend;
pub mod error;
mod handler;
pub mod margin;
pub mod options;
pub mod ready;
pub mod targets;
pub mod threshold;
pub mod tracker;
