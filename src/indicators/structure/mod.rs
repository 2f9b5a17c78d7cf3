pub mod candle_strength;
pub mod divergence;
pub mod key_levels;
