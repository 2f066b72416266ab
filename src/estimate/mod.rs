//! Estimation - injectable pricing/duration schedules and pure estimators
//!
//! Both tables are plain values handed to their estimator at construction
//! (`Default` carries the standard schedule), so the same arithmetic is
//! testable against arbitrary schedules and nothing lives in a global.

mod cost;
mod duration;

pub use cost::{CostEstimator, ModelPricing, PricingTable};
pub use duration::DurationTable;
