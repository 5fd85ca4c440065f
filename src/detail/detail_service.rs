use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DataResult;
use crate::preferences::Currency;

use super::detail_model::CoinDetail;
use super::detail_repository::DetailRepositoryTrait;

#[async_trait]
pub trait DetailServiceTrait: Send + Sync {
    async fn get_coin_details(&self, coin_id: &str, currency: Currency) -> DataResult<CoinDetail>;
}

pub struct DetailService {
    detail_repository: Arc<dyn DetailRepositoryTrait>,
}

impl DetailService {
    pub fn new(detail_repository: Arc<dyn DetailRepositoryTrait>) -> Self {
        DetailService { detail_repository }
    }
}

#[async_trait]
impl DetailServiceTrait for DetailService {
    async fn get_coin_details(&self, coin_id: &str, currency: Currency) -> DataResult<CoinDetail> {
        self.detail_repository
            .get_coin_details(coin_id, currency)
            .await
    }
}
