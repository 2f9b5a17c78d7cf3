pub mod alpha_vantage;
pub mod synthetic;
pub mod twelve_data;

pub use alpha_vantage::AlphaVantageProvider;
pub use synthetic::SyntheticProvider;
pub use twelve_data::TwelveDataProvider;
