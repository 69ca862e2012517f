//! Construction of the threshold table handed to the visibility observer.

use std::num::NonZeroU32;

/// The default number of evenly spaced steps between `0.0` and `1.0`.
pub const DEFAULT_FIDELITY: NonZeroU32 = match NonZeroU32::new(20) {
    Some(fidelity) => fidelity,
    None => unreachable!(),
};

/// Builds the intersection ratios at which the host reports visibility changes.
///
/// The table holds `fidelity + 1` evenly spaced ratios from `0.0` to `1.0` inclusive, followed by
/// a trailing `0.0`. The duplicated zero makes the host report the exact moment an element stops
/// intersecting, even when its ratio decays through steps that don't land on zero.
///
/// ```
/// # use std::num::NonZeroU32;
/// # use sightline_core::threshold::thresholds;
/// let table = thresholds(NonZeroU32::new(4).unwrap());
/// assert_eq!(table, [0.0, 0.25, 0.5, 0.75, 1.0, 0.0]);
/// ```
pub fn thresholds(fidelity: NonZeroU32) -> Vec<f64> {
    let steps = fidelity.get();
    let mut table = Vec::with_capacity(steps as usize + 2);
    // Divide instead of accumulating so the last step is exactly `1.0`.
    table.extend((0..=steps).map(|step| f64::from(step) / f64::from(steps)));
    table.push(0.0);
    table
}
