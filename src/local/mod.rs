pub(crate) mod local_models;
pub(crate) mod local_source;

// Re-export the public interface
pub use local_models::{CachedCoin, FavouriteCoin, FavouriteCoinId};
pub use local_source::{CoinLocalDataSource, InMemoryCoinStore};
