pub(crate) mod favourites_repository;
pub(crate) mod favourites_service;
pub(crate) mod favourites_view_model;

// Re-export the public interface
pub use favourites_repository::{
    FavouritesRepository, FavouritesRepositoryTrait, ERROR_MESSAGE_FAVOURITE_COINS,
    ERROR_MESSAGE_FAVOURITE_IDS, ERROR_MESSAGE_FAVOURITE_TOGGLE,
};
pub use favourites_service::{FavouritesService, FavouritesServiceTrait};
pub use favourites_view_model::{FavouritesUiState, FavouritesViewModel};
