//! Everything a [`Tracker`] is constructed from.
//!
//! [`Tracker`]: crate::tracker::Tracker

use std::fmt;
use std::num::NonZeroU32;

use crate::backend::Backend;
use crate::error::TrackerError;
use crate::margin::Margin;
use crate::targets::Targets;
use crate::threshold::DEFAULT_FIDELITY;

/// The default minimum intersection ratio classified as an appearance.
pub const DEFAULT_TRIGGER: f64 = 0.85;

/// Run before the tracker starts watching, and again on every reactivation after a destroy.
pub type InitCallback = Box<dyn FnMut()>;

/// Run with the target element and the raw entry reported by the backend.
pub type VisibilityCallback<B> =
    Box<dyn FnMut(&<B as Backend>::Element, &<B as Backend>::Entry)>;

/// Run after the tracker has been destroyed.
pub type DoneCallback = Box<dyn FnMut()>;

impl TryFrom<&str> for Margin {
    type Error = TrackerError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for Margin {
    type Error = TrackerError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The plain, serializable part of the tracker options.
///
/// With the `serde` feature enabled, this can be loaded from any serde format. Missing fields take
/// their default values and the margin is written in its CSS shorthand form.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Expansion or contraction of the container's bounds.
    ///
    /// The default is `0px`.
    pub margin: Margin,
    /// Number of evenly spaced visibility steps reported by the backend.
    ///
    /// The default is `20`.
    pub fidelity: NonZeroU32,
    /// Minimum intersection ratio classified as an appearance.
    ///
    /// The default is `0.85`.
    pub trigger: f64,
    /// Whether an element keeps being watched after its first appearance.
    ///
    /// The default is `true`.
    pub repeat: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            fidelity: DEFAULT_FIDELITY,
            trigger: DEFAULT_TRIGGER,
            repeat: true,
        }
    }
}

/// Options used when creating a [`Tracker`].
///
/// Only the elements are mandatory, everything else has a default.
///
/// [`Tracker`]: crate::tracker::Tracker
pub struct TrackerOptions<B: Backend> {
    pub(crate) elements: Option<Targets<B::Element>>,
    pub(crate) container: Option<B::Element>,
    pub(crate) margin: Margin,
    pub(crate) fidelity: NonZeroU32,
    pub(crate) trigger: f64,
    pub(crate) repeat: bool,
    pub(crate) on_init: Option<InitCallback>,
    pub(crate) on_appear: Option<VisibilityCallback<B>>,
    pub(crate) on_disappear: Option<VisibilityCallback<B>>,
    pub(crate) on_done: Option<DoneCallback>,
}

impl<B: Backend> Default for TrackerOptions<B> {
    fn default() -> Self {
        let config = TrackerConfig::default();
        Self {
            elements: None,
            container: None,
            margin: config.margin,
            fidelity: config.fidelity,
            trigger: config.trigger,
            repeat: config.repeat,
            on_init: None,
            on_appear: None,
            on_disappear: None,
            on_done: None,
        }
    }
}

impl<B: Backend> TrackerOptions<B> {
    /// Options without any elements, which must be provided with [`with_elements()`].
    ///
    /// [`with_elements()`]: Self::with_elements
    pub fn new() -> Self {
        Self::default()
    }

    /// Options with every field given in order.
    ///
    /// Construction fails with [`TrackerError::MissingElements`] if `elements` is `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn positional(
        elements: Option<Targets<B::Element>>,
        container: Option<B::Element>,
        on_init: Option<InitCallback>,
        on_appear: Option<VisibilityCallback<B>>,
        on_disappear: Option<VisibilityCallback<B>>,
        on_done: Option<DoneCallback>,
        repeat: bool,
        margin: Margin,
        fidelity: NonZeroU32,
        trigger: f64,
    ) -> Self {
        Self {
            elements,
            container,
            margin,
            fidelity,
            trigger,
            repeat,
            on_init,
            on_appear,
            on_disappear,
            on_done,
        }
    }

    /// Sets the elements to watch.
    #[inline]
    pub fn with_elements(mut self, elements: impl Into<Targets<B::Element>>) -> Self {
        self.elements = Some(elements.into());
        self
    }

    /// Sets a producer invoked on every activation to obtain the elements to watch.
    #[inline]
    pub fn with_element_producer(
        mut self,
        producer: impl FnMut() -> Vec<B::Element> + 'static,
    ) -> Self {
        self.elements = Some(Targets::producer(producer));
        self
    }

    /// Sets the bounding element intersections are computed against.
    ///
    /// The default is the viewport.
    #[inline]
    pub fn with_container(mut self, container: B::Element) -> Self {
        self.container = Some(container);
        self
    }

    /// Sets the margin applied to the container's bounds.
    ///
    /// Margins are usually parsed from their CSS form, e.g. `"10px 5%".parse()?`.
    ///
    /// The default is `0px`.
    #[inline]
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    #[inline]
    pub fn with_fidelity(mut self, fidelity: NonZeroU32) -> Self {
        self.fidelity = fidelity;
        self
    }

    /// Sets the minimum intersection ratio classified as an appearance.
    ///
    /// Ratios never exceed `1`, so a larger trigger (or `NaN`) never reports an appearance.
    #[inline]
    pub fn with_trigger(mut self, trigger: f64) -> Self {
        self.trigger = trigger;
        self
    }

    /// Sets whether elements keep being watched after they first appear.
    #[inline]
    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    /// Applies every field of `config`.
    pub fn with_config(self, config: TrackerConfig) -> Self {
        self.with_margin(config.margin)
            .with_fidelity(config.fidelity)
            .with_trigger(config.trigger)
            .with_repeat(config.repeat)
    }

    #[inline]
    pub fn with_on_init(mut self, on_init: impl FnMut() + 'static) -> Self {
        self.on_init = Some(Box::new(on_init));
        self
    }

    #[inline]
    pub fn with_on_appear(
        mut self,
        on_appear: impl FnMut(&B::Element, &B::Entry) + 'static,
    ) -> Self {
        self.on_appear = Some(Box::new(on_appear));
        self
    }

    #[inline]
    pub fn with_on_disappear(
        mut self,
        on_disappear: impl FnMut(&B::Element, &B::Entry) + 'static,
    ) -> Self {
        self.on_disappear = Some(Box::new(on_disappear));
        self
    }

    #[inline]
    pub fn with_on_done(mut self, on_done: impl FnMut() + 'static) -> Self {
        self.on_done = Some(Box::new(on_done));
        self
    }
}

impl<B: Backend> fmt::Debug for TrackerOptions<B>
where
    B::Element: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerOptions")
            .field("elements", &self.elements)
            .field("container", &self.container)
            .field("margin", &self.margin)
            .field("fidelity", &self.fidelity)
            .field("trigger", &self.trigger)
            .field("repeat", &self.repeat)
            .field("on_init", &self.on_init.is_some())
            .field("on_appear", &self.on_appear.is_some())
            .field("on_disappear", &self.on_disappear.is_some())
            .field("on_done", &self.on_done.is_some())
            .finish()
    }
}
