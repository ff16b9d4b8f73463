//! Ordered banded-lookup primitive.
//!
//! A schedule is an ascending sequence of `(limit, value)` pairs scanned
//! low-to-high; the first matching band wins. Boundaries live in the data,
//! not in cascaded conditionals.

/// One band of a schedule, keyed by its upper limit.
#[derive(Debug, Clone, Copy)]
pub struct Band {
    /// Upper limit of the band.
    pub limit: f64,
    /// Whether a key equal to `limit` falls inside the band.
    pub inclusive: bool,
    /// Value the schedule yields inside the band.
    pub value: f64,
}

impl Band {
    pub const fn below(limit: f64, value: f64) -> Self {
        Self {
            limit,
            inclusive: false,
            value,
        }
    }

    pub const fn at_or_below(limit: f64, value: f64) -> Self {
        Self {
            limit,
            inclusive: true,
            value,
        }
    }

    fn contains(&self, key: f64) -> bool {
        if self.inclusive {
            key <= self.limit
        } else {
            key < self.limit
        }
    }
}

/// First band containing `key`, scanning low-to-high.
pub fn lookup(bands: &[Band], key: f64) -> Option<f64> {
    bands.iter().find(|b| b.contains(key)).map(|b| b.value)
}
