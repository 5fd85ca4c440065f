use async_trait::async_trait;

use crate::chart::ChartPeriod;
use crate::errors::Result;
use crate::preferences::{CoinSort, Currency};

use super::models::{CoinChartApiModel, CoinDetailApiModel, CoinsApiModel, SearchApiModel};

/// Remote coin data provider.
///
/// Implementations return the raw payload models; mapping to domain models
/// and error-message collapsing happen in the repositories.
#[async_trait]
pub trait CoinDataProvider: Send + Sync {
    /// Fetches the coin list, optionally restricted to the given coin ids.
    async fn fetch_coins(
        &self,
        currency: Currency,
        coin_sort: CoinSort,
        coin_ids: Option<&[String]>,
    ) -> Result<CoinsApiModel>;

    async fn fetch_coin_detail(&self, coin_id: &str, currency: Currency)
        -> Result<CoinDetailApiModel>;

    async fn fetch_coin_chart(
        &self,
        coin_id: &str,
        chart_period: ChartPeriod,
        currency: Currency,
    ) -> Result<CoinChartApiModel>;

    async fn search_coins(&self, query: &str) -> Result<SearchApiModel>;
}
