pub(crate) mod chart_model;
pub(crate) mod chart_repository;
pub(crate) mod chart_service;

// Re-export the public interface
pub use chart_model::{ChartPeriod, CoinChart};
pub use chart_repository::{ChartRepository, ChartRepositoryTrait, ERROR_MESSAGE_CHART};
pub use chart_service::{ChartService, ChartServiceTrait};
