//! Shared types, presets, and error definitions for the pricing engine.

pub mod error;
pub mod presets;
pub mod types;

pub use error::Error;
pub use presets::{presets_for, MarketplacePresets, MlListingType};
pub use types::*;

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, Error>;
