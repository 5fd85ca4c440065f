pub(crate) mod coins_model;
pub(crate) mod coins_repository;
pub(crate) mod coins_service;

// Re-export the public interface
pub use coins_model::{map_coins, Coin};
pub use coins_repository::{CoinsRepository, CoinsRepositoryTrait, ERROR_MESSAGE_COINS};
pub use coins_service::{CoinsService, CoinsServiceTrait};
