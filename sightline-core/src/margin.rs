//! Root margins applied to the container before intersections are computed.

use std::fmt;
use std::str::FromStr;

use crate::error::TrackerError;

/// A single side of a [`Margin`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MarginValue {
    /// An absolute offset in CSS pixels.
    Px(f64),
    /// An offset relative to the container's size along the same axis.
    Percent(f64),
}

impl MarginValue {
    fn parse(token: &str) -> Option<Self> {
        let value = if let Some(number) = token.strip_suffix("px") {
            MarginValue::Px(number.parse().ok()?)
        } else if let Some(number) = token.strip_suffix('%') {
            MarginValue::Percent(number.parse().ok()?)
        } else if token.parse::<f64>().ok()? == 0.0 {
            MarginValue::Px(0.0)
        } else {
            return None;
        };

        match value {
            MarginValue::Px(v) | MarginValue::Percent(v) if v.is_finite() => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for MarginValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarginValue::Px(v) => write!(f, "{v}px"),
            MarginValue::Percent(v) => write!(f, "{v}%"),
        }
    }
}

/// An expansion (positive values) or contraction (negative values) of the container's bounds.
///
/// Parsed from the CSS shorthand used by `rootMargin`: one to four components, each a number
/// followed by `px` or `%`, assigned to the sides the same way `margin` assigns them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub top: MarginValue,
    pub right: MarginValue,
    pub bottom: MarginValue,
    pub left: MarginValue,
}

impl Margin {
    /// A margin of `value` on every side.
    pub const fn uniform(value: MarginValue) -> Self {
        Self { top: value, right: value, bottom: value, left: value }
    }

    pub fn is_zero(&self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .iter()
            .all(|side| matches!(side, MarginValue::Px(v) | MarginValue::Percent(v) if *v == 0.0))
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::uniform(MarginValue::Px(0.0))
    }
}

impl FromStr for Margin {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || TrackerError::InvalidMargin(s.to_owned());

        let mut values = [MarginValue::Px(0.0); 4];
        let mut count = 0;
        for token in s.split_whitespace() {
            if count == values.len() {
                return Err(invalid());
            }
            values[count] = MarginValue::parse(token).ok_or_else(invalid)?;
            count += 1;
        }

        let [a, b, c, d] = values;
        match count {
            1 => Ok(Self::uniform(a)),
            2 => Ok(Self { top: a, right: b, bottom: a, left: b }),
            3 => Ok(Self { top: a, right: b, bottom: c, left: b }),
            4 => Ok(Self { top: a, right: b, bottom: c, left: d }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Margin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.top, self.right, self.bottom, self.left)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Margin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Margin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <std::borrow::Cow<'de, str>>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
