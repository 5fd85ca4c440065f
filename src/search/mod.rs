pub(crate) mod search_model;
pub(crate) mod search_repository;
pub(crate) mod search_service;
pub(crate) mod search_view_model;

// Re-export the public interface
pub use search_model::{map_search_coins, SearchCoin};
pub use search_repository::{SearchRepository, SearchRepositoryTrait, ERROR_MESSAGE_SEARCH};
pub use search_service::{SearchService, SearchServiceTrait};
pub use search_view_model::{SearchUiState, SearchViewModel};
