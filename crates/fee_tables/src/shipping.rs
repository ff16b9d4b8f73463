//! Price×weight shipping rate matrix.
//!
//! Between R$19.00 and R$78.99 the marketplace absorbs the freight and the
//! seller pays nothing. Outside that band the cost comes from a fixed 6×22
//! rate matrix: the sale price selects a column, the weight selects a row.
//! Values are literal currency amounts from the published table.

use common::{Error, Result};
use tracing::warn;

/// Absorbed band: the marketplace pays the freight.
const ABSORBED_MIN_PRICE: f64 = 19.0;
const ABSORBED_MAX_PRICE: f64 = 78.99;

/// Ascending weight limits in grams; a weight maps to the first row whose
/// limit it does not exceed. The last row is unbounded.
const WEIGHT_LIMITS_G: [f64; 22] = [
    300.0, 500.0, 1000.0, 2000.0, 3000.0, 4000.0, 5000.0, 9000.0, 13000.0, 17000.0, 23000.0,
    30000.0, 40000.0, 50000.0, 60000.0, 70000.0, 80000.0, 90000.0, 100000.0, 125000.0, 150000.0,
    f64::INFINITY,
];

/// Rates per price column: `<19`, `[79,100)`, `[100,120)`, `[120,150)`,
/// `[150,200)`, `≥200`.
const SHIPPING_RATES: [[f64; 22]; 6] = [
    [
        39.9, 42.9, 44.9, 46.9, 49.9, 53.9, 56.9, 88.9, 131.9, 146.9, 171.9, 197.9, 203.9, 210.9,
        224.9, 240.9, 251.9, 279.9, 319.9, 357.9, 379.9, 498.9,
    ],
    [
        11.97, 12.87, 13.47, 14.07, 14.97, 16.17, 17.07, 26.67, 39.57, 44.07, 51.57, 59.37, 61.17,
        63.27, 67.47, 72.27, 75.57, 83.97, 95.97, 107.37, 113.97, 149.67,
    ],
    [
        13.97, 15.02, 15.72, 16.42, 17.47, 18.87, 19.92, 31.12, 46.17, 51.42, 60.17, 69.27, 71.37,
        73.82, 78.72, 84.32, 88.17, 97.97, 111.97, 125.27, 132.97, 174.62,
    ],
    [
        15.96, 17.16, 17.96, 18.76, 19.96, 21.56, 22.76, 35.56, 52.76, 58.76, 68.76, 79.16, 81.56,
        84.36, 89.96, 96.36, 100.76, 111.96, 127.96, 143.16, 151.96, 199.56,
    ],
    [
        17.96, 19.31, 20.21, 21.11, 22.46, 24.26, 25.61, 40.01, 59.36, 66.11, 77.36, 89.06, 91.76,
        94.91, 101.21, 108.41, 113.36, 125.96, 143.96, 161.06, 170.96, 224.51,
    ],
    [
        19.95, 21.45, 22.45, 23.45, 24.95, 26.95, 28.45, 44.45, 65.95, 73.45, 85.95, 98.95, 101.95,
        105.45, 112.45, 120.45, 125.95, 139.95, 159.95, 178.95, 189.95, 249.45,
    ],
];

/// Upper price limits for columns 1–4; prices at or above the last limit
/// fall in the final column.
const PRICE_COLUMN_LIMITS: [f64; 4] = [100.0, 120.0, 150.0, 200.0];

fn rate_column(price: f64) -> Option<usize> {
    if price < ABSORBED_MIN_PRICE {
        return Some(0);
    }
    if price < 79.0 {
        // Only the sliver (78.99, 79.00) lands here; the absorbed band is
        // handled before column selection.
        return None;
    }
    let offset = PRICE_COLUMN_LIMITS
        .iter()
        .position(|limit| price < *limit)
        .unwrap_or(PRICE_COLUMN_LIMITS.len());
    Some(1 + offset)
}

fn weight_row(weight_grams: f64) -> usize {
    WEIGHT_LIMITS_G
        .iter()
        .position(|limit| weight_grams <= *limit)
        .unwrap_or(WEIGHT_LIMITS_G.len() - 1)
}

/// Seller-side shipping cost for a sale price and weight.
///
/// Negative inputs are a caller contract violation and are rejected before
/// any lookup.
pub fn shipping_cost(price: f64, weight_grams: f64) -> Result<f64> {
    if price < 0.0 {
        return Err(Error::InvalidInput("price is negative".into()));
    }
    if weight_grams < 0.0 {
        return Err(Error::InvalidInput("weight_grams is negative".into()));
    }

    if (ABSORBED_MIN_PRICE..=ABSORBED_MAX_PRICE).contains(&price) {
        return Ok(0.0);
    }

    match rate_column(price) {
        Some(col) => Ok(SHIPPING_RATES[col][weight_row(weight_grams)]),
        None => {
            // Only the half-cent sliver above the absorbed band lands here;
            // the published table charges nothing for it.
            warn!(price, "price outside every shipping band; charging zero");
            Ok(0.0)
        }
    }
}
