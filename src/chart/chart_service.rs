use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DataResult;
use crate::preferences::Currency;

use super::chart_model::{ChartPeriod, CoinChart};
use super::chart_repository::ChartRepositoryTrait;

#[async_trait]
pub trait ChartServiceTrait: Send + Sync {
    async fn get_coin_chart(
        &self,
        coin_id: &str,
        chart_period: ChartPeriod,
        currency: Currency,
    ) -> DataResult<CoinChart>;
}

pub struct ChartService {
    chart_repository: Arc<dyn ChartRepositoryTrait>,
}

impl ChartService {
    pub fn new(chart_repository: Arc<dyn ChartRepositoryTrait>) -> Self {
        ChartService { chart_repository }
    }
}

#[async_trait]
impl ChartServiceTrait for ChartService {
    async fn get_coin_chart(
        &self,
        coin_id: &str,
        chart_period: ChartPeriod,
        currency: Currency,
    ) -> DataResult<CoinChart> {
        self.chart_repository
            .get_coin_chart(coin_id, chart_period, currency)
            .await
    }
}
