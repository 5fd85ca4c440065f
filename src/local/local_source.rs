use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::Result;

use super::local_models::{CachedCoin, FavouriteCoin, FavouriteCoinId};

/// Narrow read/write surface over the local coin cache and favourites set.
///
/// All reads are replay-latest streams: a new subscriber receives the current
/// snapshot immediately, then every subsequent replacement.
#[async_trait]
pub trait CoinLocalDataSource: Send + Sync {
    fn observe_cached_coins(&self) -> watch::Receiver<Vec<CachedCoin>>;

    /// Full replace of the cached coin list, overwriting the prior snapshot.
    async fn replace_cached_coins(&self, coins: Vec<CachedCoin>) -> Result<()>;

    fn observe_favourite_ids(&self) -> watch::Receiver<Vec<FavouriteCoinId>>;

    /// Per-id favourite membership stream derived from the favourites set.
    fn observe_is_favourite(&self, coin_id: &str) -> watch::Receiver<bool>;

    /// Reads current membership, then inserts if absent or deletes if
    /// present, as a single atomic unit. Concurrent toggles for the same id
    /// serialize; no torn membership state is observable.
    async fn toggle_favourite(&self, favourite_coin_id: FavouriteCoinId) -> Result<()>;

    fn observe_favourite_coins(&self) -> watch::Receiver<Vec<FavouriteCoin>>;

    async fn replace_favourite_coins(&self, coins: Vec<FavouriteCoin>) -> Result<()>;
}

/// In-memory implementation backed by single-slot broadcast channels. The
/// durable persistence engine behind the cache is an external collaborator.
pub struct InMemoryCoinStore {
    cached_coins: Arc<watch::Sender<Vec<CachedCoin>>>,
    favourite_ids: Arc<watch::Sender<Vec<FavouriteCoinId>>>,
    favourite_coins: Arc<watch::Sender<Vec<FavouriteCoin>>>,
}

impl InMemoryCoinStore {
    pub fn new() -> Self {
        let (cached_coins, _) = watch::channel(Vec::new());
        let (favourite_ids, _) = watch::channel(Vec::new());
        let (favourite_coins, _) = watch::channel(Vec::new());

        InMemoryCoinStore {
            cached_coins: Arc::new(cached_coins),
            favourite_ids: Arc::new(favourite_ids),
            favourite_coins: Arc::new(favourite_coins),
        }
    }
}

impl Default for InMemoryCoinStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CoinLocalDataSource for InMemoryCoinStore {
    fn observe_cached_coins(&self) -> watch::Receiver<Vec<CachedCoin>> {
        self.cached_coins.subscribe()
    }

    async fn replace_cached_coins(&self, coins: Vec<CachedCoin>) -> Result<()> {
        self.cached_coins.send_replace(coins);
        Ok(())
    }

    fn observe_favourite_ids(&self) -> watch::Receiver<Vec<FavouriteCoinId>> {
        self.favourite_ids.subscribe()
    }

    fn observe_is_favourite(&self, coin_id: &str) -> watch::Receiver<bool> {
        let mut ids = self.favourite_ids.subscribe();
        let coin_id = coin_id.to_string();

        let is_favourite = ids.borrow().iter().any(|favourite| favourite.id == coin_id);
        let (tx, rx) = watch::channel(is_favourite);

        tokio::spawn(async move {
            while ids.changed().await.is_ok() {
                let is_favourite = ids
                    .borrow_and_update()
                    .iter()
                    .any(|favourite| favourite.id == coin_id);

                if tx.send(is_favourite).is_err() {
                    break;
                }
            }
        });

        rx
    }

    async fn toggle_favourite(&self, favourite_coin_id: FavouriteCoinId) -> Result<()> {
        // send_modify holds the channel lock for the whole closure, making
        // the read-then-write a critical section per store.
        self.favourite_ids.send_modify(|ids| {
            let existing = ids.iter().position(|favourite| favourite.id == favourite_coin_id.id);

            match existing {
                Some(index) => {
                    ids.remove(index);
                }
                None => ids.push(favourite_coin_id),
            }
        });

        Ok(())
    }

    fn observe_favourite_coins(&self) -> watch::Receiver<Vec<FavouriteCoin>> {
        self.favourite_coins.subscribe()
    }

    async fn replace_favourite_coins(&self, coins: Vec<FavouriteCoin>) -> Result<()> {
        self.favourite_coins.send_replace(coins);
        Ok(())
    }
}
