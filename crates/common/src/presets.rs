//! Per-marketplace commission and fee presets.
//!
//! These mirror the published seller terms each marketplace advertises and
//! seed the cost inputs before the user overrides anything. They are
//! defaults, not schedule lookups; the banded tables live in `fee_tables`.

use serde::{Deserialize, Serialize};

use crate::types::Marketplace;

/// Mercado Livre listing tier; commission differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MlListingType {
    Classic,
    Premium,
}

/// Default commission and flat fee for a marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketplacePresets {
    /// Default commission percent.
    #[serde(default)]
    pub commission_percent: f64,
    /// Default flat per-order fee.
    #[serde(default)]
    pub platform_fixed_fee: f64,
}

/// Presets for a marketplace.
///
/// * Mercado Livre: 12% classic / 17% premium, fixed fee comes from the
///   price-banded schedule so the flat preset is zero.
/// * Shopee: 14%, or 20% inside the free-shipping program, plus a flat R$4.
/// * Shein: 20%; the flat fee is the volumetric intervention fee and is
///   computed from dimensions, not preset here.
pub fn presets_for(
    marketplace: Marketplace,
    free_shipping: bool,
    ml_listing: MlListingType,
) -> MarketplacePresets {
    match marketplace {
        Marketplace::MercadoLivre => MarketplacePresets {
            commission_percent: match ml_listing {
                MlListingType::Classic => default_ml_classic(),
                MlListingType::Premium => default_ml_premium(),
            },
            platform_fixed_fee: 0.0,
        },
        Marketplace::Shopee => MarketplacePresets {
            commission_percent: if free_shipping {
                default_shopee_free_shipping()
            } else {
                default_shopee()
            },
            platform_fixed_fee: default_shopee_fixed_fee(),
        },
        Marketplace::Shein => MarketplacePresets {
            commission_percent: default_shein(),
            platform_fixed_fee: 0.0,
        },
        Marketplace::Other => MarketplacePresets {
            commission_percent: 0.0,
            platform_fixed_fee: 0.0,
        },
    }
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_ml_classic() -> f64 {
    12.0
}
fn default_ml_premium() -> f64 {
    17.0
}
fn default_shopee() -> f64 {
    14.0
}
fn default_shopee_free_shipping() -> f64 {
    20.0
}
fn default_shopee_fixed_fee() -> f64 {
    4.0
}
fn default_shein() -> f64 {
    20.0
}
