use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use log::error;
use tokio::sync::watch;

use crate::coins::map_coins;
use crate::errors::DataResult;
use crate::local::{CoinLocalDataSource, FavouriteCoin, FavouriteCoinId};
use crate::preferences::{CoinSort, Currency};
use crate::remote::CoinDataProvider;

pub const ERROR_MESSAGE_FAVOURITE_COINS: &str = "Unable to fetch favourite coins";
pub const ERROR_MESSAGE_FAVOURITE_IDS: &str = "Unable to fetch favourite coin ids";
pub const ERROR_MESSAGE_FAVOURITE_TOGGLE: &str = "Unable to update favourite coin";

// The coins endpoint caps the number of uuids per request.
const FETCH_BATCH_SIZE: usize = 100;

#[async_trait]
pub trait FavouritesRepositoryTrait: Send + Sync {
    fn observe_favourite_ids(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoinId>>>;

    fn observe_is_favourite(&self, coin_id: &str) -> watch::Receiver<DataResult<bool>>;

    /// Cached favourite coins with market data; membership is locally
    /// authoritative, price data is refreshed via
    /// [`update_cached_favourite_coins`](Self::update_cached_favourite_coins).
    fn observe_favourite_coins(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoin>>>;

    async fn toggle_favourite(&self, favourite_coin_id: FavouriteCoinId) -> DataResult<()>;

    /// Price-refresh path: fetches market data for the given favourite ids
    /// and replaces the favourite-coins cache. An empty id set short-circuits
    /// to an empty cache write without a network call.
    async fn update_cached_favourite_coins(
        &self,
        coin_ids: &[FavouriteCoinId],
        currency: Currency,
        coin_sort: CoinSort,
    ) -> DataResult<Vec<FavouriteCoin>>;
}

pub struct FavouritesRepository {
    provider: Arc<dyn CoinDataProvider>,
    local_source: Arc<dyn CoinLocalDataSource>,
}

impl FavouritesRepository {
    pub fn new(
        provider: Arc<dyn CoinDataProvider>,
        local_source: Arc<dyn CoinLocalDataSource>,
    ) -> Self {
        FavouritesRepository {
            provider,
            local_source,
        }
    }
}

#[async_trait]
impl FavouritesRepositoryTrait for FavouritesRepository {
    fn observe_favourite_ids(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoinId>>> {
        let mut ids = self.local_source.observe_favourite_ids();

        let (tx, rx) = watch::channel(DataResult::Success(ids.borrow().clone()));

        tokio::spawn(async move {
            while ids.changed().await.is_ok() {
                let snapshot = ids.borrow_and_update().clone();

                if tx.send(DataResult::Success(snapshot)).is_err() {
                    break;
                }
            }
        });

        rx
    }

    fn observe_is_favourite(&self, coin_id: &str) -> watch::Receiver<DataResult<bool>> {
        let mut membership = self.local_source.observe_is_favourite(coin_id);

        let (tx, rx) = watch::channel(DataResult::Success(*membership.borrow()));

        tokio::spawn(async move {
            while membership.changed().await.is_ok() {
                let is_favourite = *membership.borrow_and_update();

                if tx.send(DataResult::Success(is_favourite)).is_err() {
                    break;
                }
            }
        });

        rx
    }

    fn observe_favourite_coins(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoin>>> {
        let mut coins = self.local_source.observe_favourite_coins();

        let (tx, rx) = watch::channel(DataResult::Success(coins.borrow().clone()));

        tokio::spawn(async move {
            while coins.changed().await.is_ok() {
                let snapshot = coins.borrow_and_update().clone();

                if tx.send(DataResult::Success(snapshot)).is_err() {
                    break;
                }
            }
        });

        rx
    }

    async fn toggle_favourite(&self, favourite_coin_id: FavouriteCoinId) -> DataResult<()> {
        match self.local_source.toggle_favourite(favourite_coin_id).await {
            Ok(()) => DataResult::Success(()),
            Err(e) => {
                error!("toggle_favourite failed: {}", e);
                DataResult::Error(ERROR_MESSAGE_FAVOURITE_TOGGLE.to_string())
            }
        }
    }

    async fn update_cached_favourite_coins(
        &self,
        coin_ids: &[FavouriteCoinId],
        currency: Currency,
        coin_sort: CoinSort,
    ) -> DataResult<Vec<FavouriteCoin>> {
        if coin_ids.is_empty() {
            if let Err(e) = self.local_source.replace_favourite_coins(Vec::new()).await {
                error!("replace_favourite_coins failed: {}", e);
                return DataResult::Error(ERROR_MESSAGE_FAVOURITE_COINS.to_string());
            }
            return DataResult::Success(Vec::new());
        }

        let ids: Vec<String> = coin_ids.iter().map(|id| id.id.clone()).collect();

        let fetches = ids
            .chunks(FETCH_BATCH_SIZE)
            .map(|chunk| self.provider.fetch_coins(currency, coin_sort, Some(chunk)));

        let mut favourite_coins: Vec<FavouriteCoin> = Vec::new();
        for result in join_all(fetches).await {
            match result {
                Ok(api_model) => favourite_coins
                    .extend(map_coins(api_model).into_iter().map(FavouriteCoin::from)),
                Err(e) => {
                    error!("update_cached_favourite_coins failed: {}", e);
                    return DataResult::Error(ERROR_MESSAGE_FAVOURITE_COINS.to_string());
                }
            }
        }

        if let Err(e) = self
            .local_source
            .replace_favourite_coins(favourite_coins.clone())
            .await
        {
            error!("replace_favourite_coins failed: {}", e);
            return DataResult::Error(ERROR_MESSAGE_FAVOURITE_COINS.to_string());
        }

        DataResult::Success(favourite_coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::ChartPeriod;
    use crate::errors::{Error, Result};
    use crate::local::InMemoryCoinStore;
    use crate::remote::models::{
        CoinApiModel, CoinChartApiModel, CoinDetailApiModel, CoinsApiModel, CoinsData,
        SearchApiModel,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeFavouritesProvider {
        fetch_count: AtomicUsize,
        fail: bool,
    }

    impl FakeFavouritesProvider {
        fn new(fail: bool) -> Self {
            FakeFavouritesProvider {
                fetch_count: AtomicUsize::new(0),
                fail,
            }
        }
    }

    #[async_trait]
    impl CoinDataProvider for FakeFavouritesProvider {
        async fn fetch_coins(
            &self,
            _currency: Currency,
            _coin_sort: CoinSort,
            coin_ids: Option<&[String]>,
        ) -> Result<CoinsApiModel> {
            self.fetch_count.fetch_add(1, Ordering::SeqCst);

            if self.fail {
                return Err(Error::Parse("fake failure".to_string()));
            }

            Ok(CoinsApiModel {
                data: Some(CoinsData {
                    coins: Some(
                        coin_ids
                            .unwrap_or_default()
                            .iter()
                            .map(|id| {
                                Some(CoinApiModel {
                                    uuid: Some(id.clone()),
                                    symbol: Some("BTC".to_string()),
                                    name: Some("Bitcoin".to_string()),
                                    price: Some("29490.95".to_string()),
                                    ..Default::default()
                                })
                            })
                            .collect(),
                    ),
                }),
            })
        }

        async fn fetch_coin_detail(
            &self,
            _coin_id: &str,
            _currency: Currency,
        ) -> Result<CoinDetailApiModel> {
            unimplemented!("not exercised")
        }

        async fn fetch_coin_chart(
            &self,
            _coin_id: &str,
            _chart_period: ChartPeriod,
            _currency: Currency,
        ) -> Result<CoinChartApiModel> {
            unimplemented!("not exercised")
        }

        async fn search_coins(&self, _query: &str) -> Result<SearchApiModel> {
            unimplemented!("not exercised")
        }
    }

    #[tokio::test]
    async fn empty_ids_short_circuit_without_network_call() {
        let provider = Arc::new(FakeFavouritesProvider::new(false));
        let repository = FavouritesRepository::new(
            provider.clone(),
            Arc::new(InMemoryCoinStore::new()),
        );

        let result = repository
            .update_cached_favourite_coins(&[], Currency::Usd, CoinSort::MarketCap)
            .await;

        assert_eq!(result, DataResult::Success(Vec::new()));
        assert_eq!(provider.fetch_count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refresh_writes_favourite_coins_through_to_cache() {
        let local_source = Arc::new(InMemoryCoinStore::new());
        let repository = FavouritesRepository::new(
            Arc::new(FakeFavouritesProvider::new(false)),
            local_source.clone(),
        );

        let ids = vec![
            FavouriteCoinId::new("Qwsogvtv82FCd"),
            FavouriteCoinId::new("razxDUgYGNAdQ"),
        ];

        let result = repository
            .update_cached_favourite_coins(&ids, Currency::Usd, CoinSort::MarketCap)
            .await;

        match result {
            DataResult::Success(coins) => assert_eq!(coins.len(), 2),
            DataResult::Error(message) => panic!("unexpected error: {}", message),
        }

        let cached = local_source.observe_favourite_coins().borrow().clone();
        assert_eq!(cached.len(), 2);
        assert_eq!(cached[0].id, "Qwsogvtv82FCd");
    }

    #[tokio::test]
    async fn refresh_error_returns_fixed_message() {
        let repository = FavouritesRepository::new(
            Arc::new(FakeFavouritesProvider::new(true)),
            Arc::new(InMemoryCoinStore::new()),
        );

        let result = repository
            .update_cached_favourite_coins(
                &[FavouriteCoinId::new("Qwsogvtv82FCd")],
                Currency::Usd,
                CoinSort::MarketCap,
            )
            .await;

        assert_eq!(
            result,
            DataResult::Error(ERROR_MESSAGE_FAVOURITE_COINS.to_string())
        );
    }

    #[tokio::test]
    async fn observe_is_favourite_wraps_membership_in_success() {
        let local_source = Arc::new(InMemoryCoinStore::new());
        let repository = FavouritesRepository::new(
            Arc::new(FakeFavouritesProvider::new(false)),
            local_source.clone(),
        );

        let mut membership = repository.observe_is_favourite("Qwsogvtv82FCd");
        assert_eq!(*membership.borrow(), DataResult::Success(false));

        repository
            .toggle_favourite(FavouriteCoinId::new("Qwsogvtv82FCd"))
            .await;

        membership.changed().await.unwrap();
        assert_eq!(*membership.borrow(), DataResult::Success(true));
    }
}
