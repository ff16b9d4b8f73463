//! Fee schedule lookup tables.
//!
//! Pure, stateless banded lookups: a price-banded fixed fee, a
//! price×weight shipping rate matrix, and a volumetric-weight intervention
//! fee. All values are literal currency amounts reproduced from the
//! published marketplace tables; nothing is interpolated.

pub mod band;
pub mod fixed_fee;
pub mod shipping;
pub mod volumetric;

pub use fixed_fee::fixed_fee_for_price;
pub use shipping::shipping_cost;
pub use volumetric::{cubic_weight_kg, volumetric_fee};
