mod intersection_handle;
mod ready;

pub use self::intersection_handle::{WebEntry, WebObserver};
pub use self::ready::DocumentReady;
