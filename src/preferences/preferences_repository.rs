use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::Result;

use super::preferences_model::{CoinSort, Currency, StartScreen, UserPreferences};

#[async_trait]
pub trait PreferencesRepositoryTrait: Send + Sync {
    fn get_user_preferences(&self) -> UserPreferences;
    fn observe_user_preferences(&self) -> watch::Receiver<UserPreferences>;
    async fn update_currency(&self, currency: Currency) -> Result<()>;
    async fn update_coin_sort(&self, coin_sort: CoinSort) -> Result<()>;
    async fn update_start_screen(&self, start_screen: StartScreen) -> Result<()>;
    async fn update_is_favourites_condensed(&self, is_condensed: bool) -> Result<()>;
}

/// Holds the current user preferences in a replay-latest channel. Durable
/// persistence of the preference values is an external collaborator concern.
pub struct PreferencesRepository {
    preferences: Arc<watch::Sender<UserPreferences>>,
}

impl PreferencesRepository {
    pub fn new(initial: UserPreferences) -> Self {
        let (tx, _rx) = watch::channel(initial);

        PreferencesRepository {
            preferences: Arc::new(tx),
        }
    }
}

impl Default for PreferencesRepository {
    fn default() -> Self {
        Self::new(UserPreferences::default())
    }
}

#[async_trait]
impl PreferencesRepositoryTrait for PreferencesRepository {
    fn get_user_preferences(&self) -> UserPreferences {
        self.preferences.borrow().clone()
    }

    fn observe_user_preferences(&self) -> watch::Receiver<UserPreferences> {
        self.preferences.subscribe()
    }

    async fn update_currency(&self, currency: Currency) -> Result<()> {
        self.preferences
            .send_modify(|preferences| preferences.currency = currency);
        Ok(())
    }

    async fn update_coin_sort(&self, coin_sort: CoinSort) -> Result<()> {
        self.preferences
            .send_modify(|preferences| preferences.coin_sort = coin_sort);
        Ok(())
    }

    async fn update_start_screen(&self, start_screen: StartScreen) -> Result<()> {
        self.preferences
            .send_modify(|preferences| preferences.start_screen = start_screen);
        Ok(())
    }

    async fn update_is_favourites_condensed(&self, is_condensed: bool) -> Result<()> {
        self.preferences
            .send_modify(|preferences| preferences.is_favourites_condensed = is_condensed);
        Ok(())
    }
}
