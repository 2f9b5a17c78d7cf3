//! External collaborators: market data vendors and AI commentary.

pub mod ai;
pub mod market_data;
pub mod providers;
pub mod symbol_cache;

pub use market_data::{MarketDataProvider, MarketService, MarketSnapshot, ProviderError};
pub use symbol_cache::SymbolCache;
