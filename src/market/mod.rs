pub(crate) mod market_view_model;

// Re-export the public interface
pub use market_view_model::{MarketUiState, MarketViewModel};
