//! Volumetric-weight intervention fee.
//!
//! The billable weight is derived from package dimensions with the
//! standard 6000 divisor, then mapped through ascending cubic-weight
//! thresholds. Weights above the top threshold clamp to the ceiling fee
//! rather than erroring.

use common::{Error, Result};

use crate::band::{lookup, Band};

/// Cubic-weight divisor for dimensions in centimeters.
const CUBIC_DIVISOR: f64 = 6000.0;

/// Fee bands by cubic weight in kilograms, limits inclusive.
const VOLUMETRIC_FEE_BANDS: [Band; 12] = [
    Band::at_or_below(0.3, 4.00),
    Band::at_or_below(0.6, 5.00),
    Band::at_or_below(0.9, 6.00),
    Band::at_or_below(1.2, 8.00),
    Band::at_or_below(1.5, 10.00),
    Band::at_or_below(2.0, 12.00),
    Band::at_or_below(5.0, 15.00),
    Band::at_or_below(9.0, 32.00),
    Band::at_or_below(13.0, 63.00),
    Band::at_or_below(17.0, 73.00),
    Band::at_or_below(23.0, 89.00),
    Band::at_or_below(30.0, 106.00),
];

/// Ceiling fee for cubic weights above 30 kg.
const CEILING_FEE: f64 = 106.00;

/// Billable cubic weight in kg for dimensions in cm.
pub fn cubic_weight_kg(height_cm: f64, width_cm: f64, length_cm: f64) -> f64 {
    height_cm * width_cm * length_cm / CUBIC_DIVISOR
}

/// Intervention fee for a package of the given dimensions.
///
/// Negative dimensions are a caller contract violation and are rejected
/// before any lookup.
pub fn volumetric_fee(height_cm: f64, width_cm: f64, length_cm: f64) -> Result<f64> {
    if height_cm < 0.0 || width_cm < 0.0 || length_cm < 0.0 {
        return Err(Error::InvalidInput("package dimension is negative".into()));
    }
    let kg = cubic_weight_kg(height_cm, width_cm, length_cm);
    Ok(lookup(&VOLUMETRIC_FEE_BANDS, kg).unwrap_or(CEILING_FEE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cubic_weight() {
        // 10 × 10 × 18 cm = 1800 cm³ → 0.3 kg.
        let kg = cubic_weight_kg(10.0, 10.0, 18.0);
        assert!((kg - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // Exactly 0.3 kg stays in the cheapest band; just above moves up.
        assert_eq!(volumetric_fee(10.0, 10.0, 18.0).unwrap(), 4.00);
        assert_eq!(volumetric_fee(10.0, 10.0, 18.1).unwrap(), 5.00);
    }

    #[test]
    fn test_mid_bands() {
        // 30 × 30 × 6 = 5400 cm³ → 0.9 kg.
        assert_eq!(volumetric_fee(30.0, 30.0, 6.0).unwrap(), 6.00);
        // 20 kg → (17, 23] band.
        assert_eq!(volumetric_fee(40.0, 50.0, 60.0).unwrap(), 89.00);
    }

    #[test]
    fn test_ceiling_clamp() {
        // 45 kg cubic weight clamps to the 30 kg ceiling fee.
        let at_top = volumetric_fee(30.0, 30.0, 200.0).unwrap(); // 30 kg
        let above = volumetric_fee(30.0, 30.0, 300.0).unwrap(); // 45 kg
        assert_eq!(at_top, 106.00);
        assert_eq!(above, 106.00);
    }

    #[test]
    fn test_rejects_negative_dimension() {
        assert!(volumetric_fee(-1.0, 10.0, 10.0).is_err());
    }
}
