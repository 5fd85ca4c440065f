use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::DataResult;
use crate::local::{FavouriteCoin, FavouriteCoinId};
use crate::preferences::{CoinSort, Currency};

use super::favourites_repository::FavouritesRepositoryTrait;

#[async_trait]
pub trait FavouritesServiceTrait: Send + Sync {
    fn observe_favourite_ids(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoinId>>>;
    fn observe_is_favourite(&self, coin_id: &str) -> watch::Receiver<DataResult<bool>>;
    fn observe_favourite_coins(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoin>>>;
    async fn toggle_favourite(&self, favourite_coin_id: FavouriteCoinId) -> DataResult<()>;
    async fn update_cached_favourite_coins(
        &self,
        coin_ids: &[FavouriteCoinId],
        currency: Currency,
        coin_sort: CoinSort,
    ) -> DataResult<Vec<FavouriteCoin>>;
}

pub struct FavouritesService {
    favourites_repository: Arc<dyn FavouritesRepositoryTrait>,
}

impl FavouritesService {
    pub fn new(favourites_repository: Arc<dyn FavouritesRepositoryTrait>) -> Self {
        FavouritesService {
            favourites_repository,
        }
    }
}

#[async_trait]
impl FavouritesServiceTrait for FavouritesService {
    fn observe_favourite_ids(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoinId>>> {
        self.favourites_repository.observe_favourite_ids()
    }

    fn observe_is_favourite(&self, coin_id: &str) -> watch::Receiver<DataResult<bool>> {
        self.favourites_repository.observe_is_favourite(coin_id)
    }

    fn observe_favourite_coins(&self) -> watch::Receiver<DataResult<Vec<FavouriteCoin>>> {
        self.favourites_repository.observe_favourite_coins()
    }

    async fn toggle_favourite(&self, favourite_coin_id: FavouriteCoinId) -> DataResult<()> {
        self.favourites_repository
            .toggle_favourite(favourite_coin_id)
            .await
    }

    async fn update_cached_favourite_coins(
        &self,
        coin_ids: &[FavouriteCoinId],
        currency: Currency,
        coin_sort: CoinSort,
    ) -> DataResult<Vec<FavouriteCoin>> {
        self.favourites_repository
            .update_cached_favourite_coins(coin_ids, currency, coin_sort)
            .await
    }
}
