//! Domain types shared across the pricing crates.

use serde::{Deserialize, Serialize};

use crate::error::Error;

// ── Marketplace Types ─────────────────────────────────────────────────

/// Supported marketplaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Marketplace {
    MercadoLivre,
    Shopee,
    Shein,
    Other,
}

impl Marketplace {
    /// The fee-schedule profile this marketplace resolves under.
    ///
    /// `free_shipping` marks listings where the seller absorbs the freight
    /// (relevant to Mercado Livre's price×weight table; for Shopee it only
    /// changes the commission preset, not the schedule set).
    pub fn profile(self, free_shipping: bool) -> MarketplaceProfile {
        match self {
            Marketplace::MercadoLivre => MarketplaceProfile {
                price_banded_fixed_fee: true,
                price_weight_shipping: true,
                volumetric_fixed_fee: false,
                free_shipping_absorbed: free_shipping,
            },
            Marketplace::Shein => MarketplaceProfile {
                price_banded_fixed_fee: false,
                price_weight_shipping: false,
                volumetric_fixed_fee: true,
                free_shipping_absorbed: free_shipping,
            },
            Marketplace::Shopee | Marketplace::Other => MarketplaceProfile {
                price_banded_fixed_fee: false,
                price_weight_shipping: false,
                volumetric_fixed_fee: false,
                free_shipping_absorbed: free_shipping,
            },
        }
    }
}

/// Which fee schedules participate in a resolution.
///
/// The resolver treats any schedule flagged here as authoritative over the
/// corresponding caller-supplied value (e.g. a price-banded fixed fee
/// replaces `CostInputs::platform_fixed_fee`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketplaceProfile {
    /// Fixed fee selected by price band.
    pub price_banded_fixed_fee: bool,
    /// Shipping cost selected by price band × weight band.
    pub price_weight_shipping: bool,
    /// Fixed intervention fee derived from package dimensions.
    pub volumetric_fixed_fee: bool,
    /// Seller absorbs the freight; schedule-driven shipping applies.
    pub free_shipping_absorbed: bool,
}

// ── Cost Inputs ───────────────────────────────────────────────────────

/// Variable fee percentages, each expressed 0–100.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct VariablePercents {
    /// Marketplace commission.
    #[serde(default)]
    pub commission: f64,
    /// Advertising (ADS) spend as a share of price.
    #[serde(default)]
    pub advertising: f64,
    /// Promotional discount.
    #[serde(default)]
    pub discount: f64,
    /// Income tax.
    #[serde(default)]
    pub income_tax: f64,
    /// Loss/breakage allowance.
    #[serde(default)]
    pub breakage: f64,
    /// Collaborator commission.
    #[serde(default)]
    pub collaborator: f64,
}

impl VariablePercents {
    /// Sum of all variable percentages.
    pub fn total(&self) -> f64 {
        self.commission
            + self.advertising
            + self.discount
            + self.income_tax
            + self.breakage
            + self.collaborator
    }

    fn negative_field(&self) -> Option<&'static str> {
        [
            (self.commission, "commission"),
            (self.advertising, "advertising"),
            (self.discount, "discount"),
            (self.income_tax, "income_tax"),
            (self.breakage, "breakage"),
            (self.collaborator, "collaborator"),
        ]
        .into_iter()
        .find(|(v, _)| *v < 0.0)
        .map(|(_, name)| name)
    }
}

/// Package dimensions in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PackageDimensions {
    pub height_cm: f64,
    pub width_cm: f64,
    pub length_cm: f64,
}

/// Validated numeric inputs for one price resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostInputs {
    /// Product acquisition cost (CMV).
    pub product_cost: f64,
    /// Seller-side fixed overhead (packaging etc.).
    #[serde(default)]
    pub fixed_overhead: f64,
    /// Explicit freight cost, used when no shipping schedule applies.
    #[serde(default)]
    pub shipping_cost: Option<f64>,
    /// Flat per-order platform fee, used when no price-banded schedule
    /// applies (e.g. Shopee's R$4).
    #[serde(default)]
    pub platform_fixed_fee: f64,
    /// Variable fee percentages.
    #[serde(default)]
    pub fees: VariablePercents,
    /// Product weight in grams, required for schedule-driven shipping.
    #[serde(default)]
    pub weight_grams: Option<f64>,
    /// Package dimensions, required for the volumetric fee.
    #[serde(default)]
    pub dimensions: Option<PackageDimensions>,
}

impl CostInputs {
    /// Reject negative monetary, percentage, weight, or dimension inputs.
    ///
    /// The engine performs no other sanitization; inputs arrive validated
    /// from the surrounding application.
    pub fn validate(&self) -> Result<(), Error> {
        if self.product_cost < 0.0 {
            return Err(Error::InvalidInput("product_cost is negative".into()));
        }
        if self.fixed_overhead < 0.0 {
            return Err(Error::InvalidInput("fixed_overhead is negative".into()));
        }
        if self.shipping_cost.is_some_and(|s| s < 0.0) {
            return Err(Error::InvalidInput("shipping_cost is negative".into()));
        }
        if self.platform_fixed_fee < 0.0 {
            return Err(Error::InvalidInput("platform_fixed_fee is negative".into()));
        }
        if let Some(name) = self.fees.negative_field() {
            return Err(Error::InvalidInput(format!("{name} percent is negative")));
        }
        if self.weight_grams.is_some_and(|w| w < 0.0) {
            return Err(Error::InvalidInput("weight_grams is negative".into()));
        }
        if let Some(d) = self.dimensions {
            if d.height_cm < 0.0 || d.width_cm < 0.0 || d.length_cm < 0.0 {
                return Err(Error::InvalidInput("package dimension is negative".into()));
            }
        }
        Ok(())
    }
}

// ── Pricing Goal ──────────────────────────────────────────────────────

/// The caller-selected pricing goal. Exactly one variant is active per
/// resolution; selecting a mode is a caller decision, never inferred.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "value")]
pub enum PricingGoal {
    /// Solve for a price that realizes this margin percent.
    TargetMargin(f64),
    /// Solve for a price that yields this absolute profit.
    TargetProfit(f64),
    /// Evaluate fees and profit at this caller-supplied price.
    ExplicitPrice(f64),
}

impl PricingGoal {
    pub fn validate(&self) -> Result<(), Error> {
        let (value, name) = match self {
            PricingGoal::TargetMargin(m) => (*m, "target margin"),
            PricingGoal::TargetProfit(p) => (*p, "target profit"),
            PricingGoal::ExplicitPrice(p) => (*p, "explicit price"),
        };
        if value < 0.0 {
            return Err(Error::InvalidInput(format!("{name} is negative")));
        }
        Ok(())
    }
}

// ── Resolution Output ─────────────────────────────────────────────────

/// The converged output of one price resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPrice {
    /// Recommended sale price.
    pub price: f64,
    /// Shipping cost borne by the seller at that price.
    pub shipping_cost: f64,
    /// Platform fixed fee at that price.
    pub fixed_fee: f64,
    /// `price × Σvariable% / 100`.
    pub total_variable_deduction: f64,
    /// Per-unit profit after all deductions.
    pub profit: f64,
    /// `100 × profit / price`; when price is zero, the requested target
    /// margin (margin goal) or zero.
    pub realized_margin_percent: f64,
}
