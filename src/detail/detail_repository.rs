use std::sync::Arc;

use async_trait::async_trait;
use log::error;

use crate::errors::DataResult;
use crate::preferences::Currency;
use crate::remote::CoinDataProvider;

use super::detail_model::CoinDetail;

pub const ERROR_MESSAGE_DETAILS: &str = "Unable to fetch coin details";

#[async_trait]
pub trait DetailRepositoryTrait: Send + Sync {
    async fn get_coin_details(&self, coin_id: &str, currency: Currency) -> DataResult<CoinDetail>;
}

pub struct DetailRepository {
    provider: Arc<dyn CoinDataProvider>,
}

impl DetailRepository {
    pub fn new(provider: Arc<dyn CoinDataProvider>) -> Self {
        DetailRepository { provider }
    }
}

#[async_trait]
impl DetailRepositoryTrait for DetailRepository {
    async fn get_coin_details(&self, coin_id: &str, currency: Currency) -> DataResult<CoinDetail> {
        let api_model = match self.provider.fetch_coin_detail(coin_id, currency).await {
            Ok(api_model) => api_model,
            Err(e) => {
                error!("get_coin_details failed for {}: {}", coin_id, e);
                return DataResult::Error(ERROR_MESSAGE_DETAILS.to_string());
            }
        };

        match CoinDetail::from_api_model(api_model) {
            Some(detail) => DataResult::Success(detail),
            None => {
                error!("coin detail payload for {} had no coin object", coin_id);
                DataResult::Error(ERROR_MESSAGE_DETAILS.to_string())
            }
        }
    }
}
