use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::DataResult;
use crate::preferences::{CoinSort, Currency};

use super::coins_model::Coin;
use super::coins_repository::CoinsRepositoryTrait;

#[async_trait]
pub trait CoinsServiceTrait: Send + Sync {
    async fn get_coins(&self, currency: Currency, coin_sort: CoinSort) -> DataResult<Vec<Coin>>;
    fn observe_cached_coins(&self) -> watch::Receiver<DataResult<Vec<Coin>>>;
}

pub struct CoinsService {
    coins_repository: Arc<dyn CoinsRepositoryTrait>,
}

impl CoinsService {
    pub fn new(coins_repository: Arc<dyn CoinsRepositoryTrait>) -> Self {
        CoinsService { coins_repository }
    }
}

#[async_trait]
impl CoinsServiceTrait for CoinsService {
    async fn get_coins(&self, currency: Currency, coin_sort: CoinSort) -> DataResult<Vec<Coin>> {
        self.coins_repository.get_coins(currency, coin_sort).await
    }

    fn observe_cached_coins(&self) -> watch::Receiver<DataResult<Vec<Coin>>> {
        self.coins_repository.observe_cached_coins()
    }
}
