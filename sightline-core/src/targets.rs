//! The set of elements a tracker watches.

use std::fmt;

/// The elements watched by a [`Tracker`], resolved every time observation starts.
///
/// [`Tracker`]: crate::tracker::Tracker
pub enum Targets<E> {
    /// A fixed list, watched as-is on every activation.
    Fixed(Vec<E>),
    /// A producer invoked on every activation, allowing the watched set to change between a
    /// pause and the following resume.
    Producer(Box<dyn FnMut() -> Vec<E>>),
}

impl<E> Targets<E> {
    /// Watch a single element.
    pub fn single(element: E) -> Self {
        Self::Fixed(vec![element])
    }

    /// Watch a fixed collection of elements.
    pub fn list(elements: impl IntoIterator<Item = E>) -> Self {
        Self::Fixed(elements.into_iter().collect())
    }

    /// Watch whatever `producer` returns at activation time.
    pub fn producer(producer: impl FnMut() -> Vec<E> + 'static) -> Self {
        Self::Producer(Box::new(producer))
    }
}

impl<E: Clone> Targets<E> {
    /// Returns the concrete list of elements to watch right now.
    pub fn resolve(&mut self) -> Vec<E> {
        match self {
            Targets::Fixed(elements) => elements.clone(),
            Targets::Producer(producer) => producer(),
        }
    }
}

impl<E> From<Vec<E>> for Targets<E> {
    fn from(elements: Vec<E>) -> Self {
        Self::Fixed(elements)
    }
}

impl<E: fmt::Debug> fmt::Debug for Targets<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Targets::Fixed(elements) => f.debug_tuple("Fixed").field(elements).finish(),
            Targets::Producer(_) => f.debug_struct("Producer").finish_non_exhaustive(),
        }
    }
}
