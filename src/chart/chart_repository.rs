use std::sync::Arc;

use async_trait::async_trait;
use log::error;

use crate::errors::DataResult;
use crate::preferences::Currency;
use crate::remote::CoinDataProvider;

use super::chart_model::{ChartPeriod, CoinChart};

pub const ERROR_MESSAGE_CHART: &str = "Unable to fetch coin chart";

#[async_trait]
pub trait ChartRepositoryTrait: Send + Sync {
    async fn get_coin_chart(
        &self,
        coin_id: &str,
        chart_period: ChartPeriod,
        currency: Currency,
    ) -> DataResult<CoinChart>;
}

pub struct ChartRepository {
    provider: Arc<dyn CoinDataProvider>,
}

impl ChartRepository {
    pub fn new(provider: Arc<dyn CoinDataProvider>) -> Self {
        ChartRepository { provider }
    }
}

#[async_trait]
impl ChartRepositoryTrait for ChartRepository {
    async fn get_coin_chart(
        &self,
        coin_id: &str,
        chart_period: ChartPeriod,
        currency: Currency,
    ) -> DataResult<CoinChart> {
        match self
            .provider
            .fetch_coin_chart(coin_id, chart_period, currency)
            .await
        {
            Ok(api_model) => DataResult::Success(CoinChart::from_api_model(api_model)),
            Err(e) => {
                error!("get_coin_chart failed for {}: {}", coin_id, e);
                DataResult::Error(ERROR_MESSAGE_CHART.to_string())
            }
        }
    }
}
