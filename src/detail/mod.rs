pub(crate) mod detail_model;
pub(crate) mod detail_repository;
pub(crate) mod detail_service;
pub(crate) mod details_view_model;

// Re-export the public interface
pub use detail_model::CoinDetail;
pub use detail_repository::{DetailRepository, DetailRepositoryTrait, ERROR_MESSAGE_DETAILS};
pub use detail_service::{DetailService, DetailServiceTrait};
pub use details_view_model::{DetailsUiState, DetailsViewModel, ERROR_MESSAGE_INVALID_COIN_ID};
