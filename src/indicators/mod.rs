pub mod engine;

pub mod momentum;
pub mod structure;
pub mod trend;
pub mod volatility;

pub use engine::compute_indicators;
