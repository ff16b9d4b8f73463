//! Calculation assembly and spike-day simulation.
//!
//! Packages a resolution together with the inputs that produced it, and
//! implements the what-if recomputation for promotional spike days: an
//! extra variable fee percent merged into the advertising bucket, with a
//! single-level undo.

use common::{CostInputs, Error, MarketplaceProfile, PricingGoal, ResolvedPrice, Result};
use serde::{Deserialize, Serialize};

use crate::resolver;

/// An immutable calculation record: the inputs, the goal, and the
/// converged output. Persistence keys (ids) belong to the layer that
/// stores these, not to the record itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub inputs: CostInputs,
    pub goal: PricingGoal,
    pub profile: MarketplaceProfile,
    pub outcome: ResolvedPrice,
    /// Extra variable percent applied by a spike simulation, if any.
    #[serde(default)]
    pub spike_percent: Option<f64>,
}

/// Resolve and package one calculation.
pub fn assemble(
    inputs: CostInputs,
    goal: PricingGoal,
    profile: MarketplaceProfile,
) -> Result<Calculation> {
    let outcome = resolver::resolve(&inputs, goal, &profile)?;
    Ok(Calculation {
        inputs,
        goal,
        profile,
        outcome,
        spike_percent: None,
    })
}

/// Re-run a prior calculation with an extra variable fee percent.
///
/// The addend is merged into the advertising bucket of the cost inputs so
/// downstream reporting shows the adjusted figure; it is not a separate
/// field. The prior record is untouched, and callers keep it for undo.
pub fn apply_spike(prior: &Calculation, extra_percent: f64) -> Result<Calculation> {
    if extra_percent < 0.0 {
        return Err(Error::InvalidInput("spike percent is negative".into()));
    }
    let mut inputs = prior.inputs.clone();
    inputs.fees.advertising += extra_percent;
    let outcome = resolver::resolve(&inputs, prior.goal, &prior.profile)?;
    Ok(Calculation {
        inputs,
        goal: prior.goal,
        profile: prior.profile,
        outcome,
        spike_percent: Some(prior.spike_percent.unwrap_or(0.0) + extra_percent),
    })
}

/// Single-slot undo buffer for spike simulations.
///
/// Remembers the first pre-spike calculation and restores it exactly once;
/// there is no redo and no deeper history.
#[derive(Debug, Default)]
pub struct UndoSlot {
    saved: Option<Calculation>,
}

impl UndoSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain `calc` unless a pre-spike original is already held.
    pub fn remember(&mut self, calc: &Calculation) {
        if self.saved.is_none() {
            self.saved = Some(calc.clone());
        }
    }

    /// Hand back the retained calculation, clearing the slot.
    pub fn restore(&mut self) -> Option<Calculation> {
        self.saved.take()
    }
}
