use std::sync::Arc;

use async_trait::async_trait;
use log::error;
use tokio::sync::watch;

use crate::errors::DataResult;
use crate::local::{CachedCoin, CoinLocalDataSource};
use crate::preferences::{CoinSort, Currency};
use crate::remote::CoinDataProvider;

use super::coins_model::{map_coins, Coin};

pub const ERROR_MESSAGE_COINS: &str = "Unable to fetch coins";

#[async_trait]
pub trait CoinsRepositoryTrait: Send + Sync {
    /// Fresh remote fetch; on success the coin list is written through to
    /// the local cache. On error the stale cache is not surfaced.
    async fn get_coins(&self, currency: Currency, coin_sort: CoinSort) -> DataResult<Vec<Coin>>;

    fn observe_cached_coins(&self) -> watch::Receiver<DataResult<Vec<Coin>>>;
}

pub struct CoinsRepository {
    provider: Arc<dyn CoinDataProvider>,
    local_source: Arc<dyn CoinLocalDataSource>,
}

impl CoinsRepository {
    pub fn new(
        provider: Arc<dyn CoinDataProvider>,
        local_source: Arc<dyn CoinLocalDataSource>,
    ) -> Self {
        CoinsRepository {
            provider,
            local_source,
        }
    }
}

#[async_trait]
impl CoinsRepositoryTrait for CoinsRepository {
    async fn get_coins(&self, currency: Currency, coin_sort: CoinSort) -> DataResult<Vec<Coin>> {
        let api_model = match self.provider.fetch_coins(currency, coin_sort, None).await {
            Ok(api_model) => api_model,
            Err(e) => {
                error!("get_coins failed: {}", e);
                return DataResult::Error(ERROR_MESSAGE_COINS.to_string());
            }
        };

        let coins = map_coins(api_model);

        let cached_coins = coins.iter().cloned().map(CachedCoin::from).collect();
        if let Err(e) = self.local_source.replace_cached_coins(cached_coins).await {
            error!("replace_cached_coins failed: {}", e);
            return DataResult::Error(ERROR_MESSAGE_COINS.to_string());
        }

        DataResult::Success(coins)
    }

    fn observe_cached_coins(&self) -> watch::Receiver<DataResult<Vec<Coin>>> {
        let mut cached = self.local_source.observe_cached_coins();

        let map_snapshot = |coins: &[CachedCoin]| {
            DataResult::Success(coins.iter().cloned().map(Coin::from).collect())
        };

        let (tx, rx) = watch::channel(map_snapshot(&cached.borrow()));

        tokio::spawn(async move {
            while cached.changed().await.is_ok() {
                let snapshot = map_snapshot(&cached.borrow_and_update());

                if tx.send(snapshot).is_err() {
                    break;
                }
            }
        });

        rx
    }
}
