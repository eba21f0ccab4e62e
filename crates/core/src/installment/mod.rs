//! Installment projection.
//!
//! Projection is recomputed on every read. Nothing projected is stored.

pub mod horizon;
pub mod projector;

#[cfg(test)]
mod projector_props;

pub use horizon::{MAX_HORIZON_MONTHS, ProjectionHorizon};
pub use projector::{InstallmentProjector, InstallmentSchedule, ProjectedEntry};
