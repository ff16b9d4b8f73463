//! Price-banded fixed fee.
//!
//! The marketplace charges a flat per-order fee selected by the sale price.
//! Above the R$79.00 threshold the fee drops to zero; the schedule is
//! non-monotonic and callers must not assume otherwise.

use common::{Error, Result};

use crate::band::{lookup, Band};

/// Fixed fee bands by sale price. First match wins.
const FIXED_FEE_BANDS: [Band; 4] = [
    Band::below(12.50, 0.50),
    Band::below(29.00, 6.25),
    Band::below(50.00, 6.50),
    Band::at_or_below(79.00, 6.75),
];

/// Fee above the final band.
const ABOVE_THRESHOLD_FEE: f64 = 0.0;

/// Fixed fee for a sale price.
///
/// Negative prices are a caller contract violation and are rejected before
/// any lookup.
pub fn fixed_fee_for_price(price: f64) -> Result<f64> {
    if price < 0.0 {
        return Err(Error::InvalidInput("price is negative".into()));
    }
    Ok(lookup(&FIXED_FEE_BANDS, price).unwrap_or(ABOVE_THRESHOLD_FEE))
}
