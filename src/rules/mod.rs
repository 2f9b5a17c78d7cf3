pub mod evaluator;
pub mod policy;
pub mod sync;

pub use evaluator::evaluate_interval_rules;
pub use sync::{evaluate_multi_interval_rules, evaluate_timeframe_sync};
