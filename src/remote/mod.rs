pub(crate) mod coinranking_provider;
pub mod models;
pub(crate) mod provider;

// Re-export the public interface
pub use coinranking_provider::{CoinRankingProvider, ProviderConfig};
pub use provider::CoinDataProvider;
