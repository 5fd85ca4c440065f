pub(crate) mod preferences_model;
pub(crate) mod preferences_repository;
pub(crate) mod preferences_service;

// Re-export the public interface
pub use preferences_model::{CoinSort, Currency, StartScreen, UserPreferences};
pub use preferences_repository::{PreferencesRepository, PreferencesRepositoryTrait};
pub use preferences_service::{PreferencesService, PreferencesServiceTrait};
