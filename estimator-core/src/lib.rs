pub mod catalog;
pub mod estimate;
pub mod optimize;
pub mod ai;
pub mod session;
pub mod storage;
pub mod identity;
pub mod report;
pub mod error;
pub mod resilience;
pub mod observability;

pub use catalog::PricingCatalog;
pub use estimate::CostBreakdown;
pub use session::EstimatorState;
pub use error::{EstimatorError, Result};
