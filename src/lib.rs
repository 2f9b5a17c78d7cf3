//! marketlens: OHLCV indicator computation, rule evaluation and market
//! analysis service for equities and gold.
//!
//! The core (`aggregate`, `indicators`, `rules`) is pure, synchronous and
//! deterministic; `services` and `core` wrap it with vendor fetching, AI
//! commentary and the HTTP surface.

pub mod aggregate;
pub mod common;
pub mod config;
pub mod core;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod rules;
pub mod services;
