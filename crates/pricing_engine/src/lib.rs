//! Price resolution engine.
//!
//! Reconciles a sale price with marketplace fees that are themselves
//! price- and weight-dependent, packages the result into an immutable
//! calculation record, and supports the spike-day what-if simulation with
//! single-level undo. Pure computation: the surrounding application owns
//! validation UI, persistence, and presentation.

pub mod assembler;
pub mod journal;
pub mod resolver;

pub use assembler::{apply_spike, assemble, Calculation, UndoSlot};
pub use journal::{CalcJournal, ResultSink};
pub use resolver::{resolve, CONVERGENCE_ROUNDS};
