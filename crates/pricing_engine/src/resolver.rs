//! Fixed-point price resolution.
//!
//! Price and fees are circularly dependent: the sale price selects the fee
//! bands, and the fees feed back into the price formula. The resolver runs
//! a bounded number of rounds instead of looping to a numeric tolerance;
//! each round re-evaluates the price-tied fees at the most recent
//! candidate price, then recomputes the price. A pathological table could
//! leave a residual oscillation smaller than one fee band's width.

use common::{CostInputs, Error, MarketplaceProfile, PricingGoal, ResolvedPrice, Result};
use tracing::debug;

/// Fixed number of fee-refresh/price-recompute rounds.
pub const CONVERGENCE_ROUNDS: usize = 5;

/// Resolve a recommended sale price.
///
/// Pure function of its inputs: identical arguments yield bit-identical
/// output. All failures are synchronous and total; no partial result is
/// ever returned.
pub fn resolve(
    costs: &CostInputs,
    goal: PricingGoal,
    profile: &MarketplaceProfile,
) -> Result<ResolvedPrice> {
    costs.validate()?;
    goal.validate()?;

    let total_variable_percent = costs.fees.total();
    let rule = PriceRule::for_goal(goal, total_variable_percent)?;

    let explicit_shipping = costs.shipping_cost.unwrap_or(0.0);
    let mut shipping = explicit_shipping;
    let mut fixed_fee = initial_fixed_fee(costs, profile)?;

    let schedule_shipping = profile.price_weight_shipping
        && profile.free_shipping_absorbed
        && costs.weight_grams.is_some_and(|w| w > 0.0);
    let price_tied = profile.price_banded_fixed_fee || schedule_shipping;

    let mut price;
    if price_tied {
        let weight = costs.weight_grams.unwrap_or(0.0);
        price = 0.0;
        for round in 0..CONVERGENCE_ROUNDS {
            // Until a candidate price exists, probe the schedules at twice
            // the product cost.
            let probe = if price > 0.0 {
                price
            } else {
                costs.product_cost * 2.0
            };
            if profile.price_banded_fixed_fee {
                fixed_fee = fee_tables::fixed_fee_for_price(probe)?;
            }
            if schedule_shipping {
                shipping = fee_tables::shipping_cost(probe, weight)?;
            }
            price = rule.candidate_price(total_fixed_costs(costs, shipping, fixed_fee));
            debug!(round, price, shipping, fixed_fee, "convergence round");
        }
        // The last lookup used the previous iterate; settle the banded fee
        // on the final price.
        if profile.price_banded_fixed_fee {
            fixed_fee = fee_tables::fixed_fee_for_price(price)?;
        }
    } else {
        price = rule.candidate_price(total_fixed_costs(costs, shipping, fixed_fee));
    }

    let total_variable_deduction = price * total_variable_percent / 100.0;
    let profit = price
        - costs.product_cost
        - costs.fixed_overhead
        - shipping
        - fixed_fee
        - total_variable_deduction;
    let realized_margin_percent = if price > 0.0 {
        100.0 * profit / price
    } else {
        match goal {
            // A degenerate zero price cannot realize any margin; report the
            // request unchanged so callers can tell it apart from a solved
            // zero-margin plan.
            PricingGoal::TargetMargin(m) => m,
            _ => 0.0,
        }
    };

    Ok(ResolvedPrice {
        price,
        shipping_cost: shipping,
        fixed_fee,
        total_variable_deduction,
        profit,
        realized_margin_percent,
    })
}

/// The goal dispatched once into a closed price formula, so the three
/// variants stay mutually exclusive inside the convergence loop.
enum PriceRule {
    /// TargetMargin: `price = total_fixed_costs / divisor`.
    CostsOverDivisor { divisor: f64 },
    /// TargetProfit: `price = (total_fixed_costs + target) / divisor`.
    CostsPlusProfitOverDivisor { divisor: f64, target: f64 },
    /// ExplicitPrice: no solving needed.
    Fixed { price: f64 },
}

impl PriceRule {
    /// Build the formula for the goal.
    fn for_goal(goal: PricingGoal, total_variable_percent: f64) -> Result<Self> {
        match goal {
            PricingGoal::ExplicitPrice(p) => Ok(PriceRule::Fixed { price: p }),
            PricingGoal::TargetMargin(m) => Ok(PriceRule::CostsOverDivisor {
                divisor: checked_divisor(total_variable_percent + m)?,
            }),
            PricingGoal::TargetProfit(target) => Ok(PriceRule::CostsPlusProfitOverDivisor {
                divisor: checked_divisor(total_variable_percent)?,
                target,
            }),
        }
    }

    /// Candidate price for the current fixed-cost total.
    fn candidate_price(&self, total_fixed_costs: f64) -> f64 {
        match *self {
            PriceRule::CostsOverDivisor { divisor } => total_fixed_costs / divisor,
            PriceRule::CostsPlusProfitOverDivisor { divisor, target } => {
                (total_fixed_costs + target) / divisor
            }
            PriceRule::Fixed { price } => price,
        }
    }
}

/// A non-positive divisor means the variable fees (plus margin) meet or
/// exceed 100% of the price, so no finite price can satisfy the goal.
fn checked_divisor(loaded_percent: f64) -> Result<f64> {
    let divisor = 1.0 - loaded_percent / 100.0;
    if divisor <= 0.0 {
        return Err(Error::UnsolvableGoal {
            total_percent: loaded_percent,
        });
    }
    Ok(divisor)
}

fn total_fixed_costs(costs: &CostInputs, shipping: f64, fixed_fee: f64) -> f64 {
    costs.product_cost + costs.fixed_overhead + shipping + fixed_fee
}

/// Fixed fee before any price-banded refresh: the volumetric intervention
/// fee when that schedule applies and dimensions are known, otherwise the
/// caller-supplied flat fee.
fn initial_fixed_fee(costs: &CostInputs, profile: &MarketplaceProfile) -> Result<f64> {
    if profile.volumetric_fixed_fee {
        if let Some(d) = costs.dimensions {
            return fee_tables::volumetric_fee(d.height_cm, d.width_cm, d.length_cm);
        }
    }
    Ok(costs.platform_fixed_fee)
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Marketplace, PackageDimensions, VariablePercents};

    const EPS: f64 = 1e-9;

    fn ml_inputs() -> CostInputs {
        CostInputs {
            product_cost: 10.0,
            fixed_overhead: 5.0,
            shipping_cost: None,
            platform_fixed_fee: 0.0,
            fees: VariablePercents {
                commission: 17.0,
                income_tax: 12.0,
                ..Default::default()
            },
            weight_grams: Some(300.0),
            dimensions: None,
        }
    }

    fn assert_invariant(costs: &CostInputs, r: &ResolvedPrice) {
        let expected = r.price
            - costs.product_cost
            - costs.fixed_overhead
            - r.shipping_cost
            - r.fixed_fee
            - r.price * costs.fees.total() / 100.0;
        assert!(
            (r.profit - expected).abs() < 1e-6,
            "profit {} violates invariant (expected {})",
            r.profit,
            expected
        );
    }

    #[test]
    fn test_margin_goal_converges_on_banded_fees() {
        let costs = ml_inputs();
        let profile = Marketplace::MercadoLivre.profile(true);
        let r = resolve(&costs, PricingGoal::TargetMargin(20.0), &profile).unwrap();

        // 29% variable + 20% margin → divisor 0.51. The fixed point is
        // (15 + 6.50) / 0.51 with shipping absorbed in the 19–78.99 band.
        assert!((r.price - 21.5 / 0.51).abs() < EPS, "price {}", r.price);
        assert_eq!(r.fixed_fee, 6.50);
        assert_eq!(r.shipping_cost, 0.0);
        assert!((r.realized_margin_percent - 20.0).abs() < 1e-6);
        assert_invariant(&costs, &r);
    }

    #[test]
    fn test_margin_goal_converges_on_shipping_table() {
        // Heavier, pricier product: lands in the [120,150) column and the
        // ≤3000 g row → 19.96 freight, zero fixed fee above R$79.
        let costs = CostInputs {
            product_cost: 60.0,
            fixed_overhead: 10.0,
            fees: VariablePercents {
                commission: 12.0,
                ..Default::default()
            },
            weight_grams: Some(2700.0),
            ..ml_inputs()
        };
        let profile = Marketplace::MercadoLivre.profile(true);
        let r = resolve(&costs, PricingGoal::TargetMargin(20.0), &profile).unwrap();

        assert!((r.price - 89.96 / 0.68).abs() < EPS, "price {}", r.price);
        assert_eq!(r.shipping_cost, 19.96);
        assert_eq!(r.fixed_fee, 0.0);
        assert!((r.realized_margin_percent - 20.0).abs() < 1e-6);
        assert_invariant(&costs, &r);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let costs = ml_inputs();
        let profile = Marketplace::MercadoLivre.profile(true);
        let a = resolve(&costs, PricingGoal::TargetMargin(20.0), &profile).unwrap();
        let b = resolve(&costs, PricingGoal::TargetMargin(20.0), &profile).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_profit_goal_without_schedules() {
        let costs = CostInputs {
            product_cost: 10.0,
            fixed_overhead: 5.0,
            shipping_cost: Some(8.0),
            platform_fixed_fee: 2.0,
            fees: VariablePercents {
                commission: 10.0,
                ..Default::default()
            },
            weight_grams: None,
            dimensions: None,
        };
        let profile = Marketplace::Other.profile(false);
        let r = resolve(&costs, PricingGoal::TargetProfit(20.0), &profile).unwrap();

        // (10 + 5 + 8 + 2 + 20) / 0.9 = 50; profit lands exactly on target.
        assert!((r.price - 50.0).abs() < EPS);
        assert!((r.profit - 20.0).abs() < 1e-6);
        assert!((r.realized_margin_percent - 40.0).abs() < 1e-6);
        assert_invariant(&costs, &r);
    }

    #[test]
    fn test_explicit_price_still_evaluates_banded_fees() {
        let costs = CostInputs {
            shipping_cost: Some(15.0),
            weight_grams: None,
            ..ml_inputs()
        };
        // Free shipping off: freight stays at the explicit value, but the
        // fixed fee must be evaluated at the caller's price.
        let profile = Marketplace::MercadoLivre.profile(false);
        let r = resolve(&costs, PricingGoal::ExplicitPrice(45.0), &profile).unwrap();

        assert_eq!(r.price, 45.0);
        assert_eq!(r.fixed_fee, 6.50);
        assert_eq!(r.shipping_cost, 15.0);
        assert_invariant(&costs, &r);
    }

    #[test]
    fn test_volumetric_profile_uses_intervention_fee() {
        let costs = CostInputs {
            product_cost: 30.0,
            fixed_overhead: 0.0,
            shipping_cost: None,
            platform_fixed_fee: 0.0,
            fees: VariablePercents {
                commission: 20.0,
                ..Default::default()
            },
            weight_grams: None,
            dimensions: Some(PackageDimensions {
                height_cm: 10.0,
                width_cm: 10.0,
                length_cm: 18.0,
            }),
        };
        let profile = Marketplace::Shein.profile(false);
        let r = resolve(&costs, PricingGoal::TargetMargin(20.0), &profile).unwrap();

        // 0.3 kg cubic weight → R$4 intervention fee; divisor 0.6.
        assert_eq!(r.fixed_fee, 4.0);
        assert!((r.price - 34.0 / 0.6).abs() < EPS);
        assert_invariant(&costs, &r);
    }

    #[test]
    fn test_unsolvable_goal_is_an_error() {
        let costs = CostInputs {
            fees: VariablePercents {
                commission: 60.0,
                discount: 30.0,
                ..Default::default()
            },
            ..ml_inputs()
        };
        let profile = Marketplace::Other.profile(false);

        let margin = resolve(&costs, PricingGoal::TargetMargin(20.0), &profile);
        assert!(matches!(
            margin,
            Err(Error::UnsolvableGoal { total_percent }) if (total_percent - 110.0).abs() < EPS
        ));

        let costs = CostInputs {
            fees: VariablePercents {
                commission: 100.0,
                ..Default::default()
            },
            ..ml_inputs()
        };
        assert!(matches!(
            resolve(&costs, PricingGoal::TargetProfit(10.0), &profile),
            Err(Error::UnsolvableGoal { .. })
        ));
    }

    #[test]
    fn test_negative_inputs_are_rejected() {
        let costs = CostInputs {
            product_cost: -1.0,
            ..ml_inputs()
        };
        let profile = Marketplace::MercadoLivre.profile(true);
        assert!(matches!(
            resolve(&costs, PricingGoal::TargetMargin(20.0), &profile),
            Err(Error::InvalidInput(_))
        ));

        let costs = CostInputs {
            fees: VariablePercents {
                advertising: -5.0,
                ..Default::default()
            },
            ..ml_inputs()
        };
        assert!(matches!(
            resolve(&costs, PricingGoal::TargetMargin(20.0), &profile),
            Err(Error::InvalidInput(_))
        ));

        assert!(matches!(
            resolve(&ml_inputs(), PricingGoal::TargetMargin(-1.0), &profile),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_zero_price_reports_requested_margin() {
        // All-zero costs solve to a zero price; the margin echoes the
        // request instead of dividing by zero.
        let costs = CostInputs {
            product_cost: 0.0,
            fixed_overhead: 0.0,
            shipping_cost: None,
            platform_fixed_fee: 0.0,
            fees: VariablePercents::default(),
            weight_grams: None,
            dimensions: None,
        };
        let profile = Marketplace::Other.profile(false);
        let r = resolve(&costs, PricingGoal::TargetMargin(25.0), &profile).unwrap();
        assert_eq!(r.price, 0.0);
        assert_eq!(r.realized_margin_percent, 25.0);
    }

    #[test]
    fn test_missing_weight_falls_back_to_explicit_shipping() {
        let costs = CostInputs {
            shipping_cost: Some(12.0),
            weight_grams: None,
            ..ml_inputs()
        };
        let profile = Marketplace::MercadoLivre.profile(true);
        let r = resolve(&costs, PricingGoal::TargetMargin(20.0), &profile).unwrap();
        // No weight → the shipping table cannot apply even with free
        // shipping enabled.
        assert_eq!(r.shipping_cost, 12.0);
        assert_invariant(&costs, &r);
    }
}
