use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::errors::Result;

use super::preferences_model::{CoinSort, Currency, StartScreen, UserPreferences};
use super::preferences_repository::PreferencesRepositoryTrait;

#[async_trait]
pub trait PreferencesServiceTrait: Send + Sync {
    fn get_user_preferences(&self) -> UserPreferences;
    fn observe_user_preferences(&self) -> watch::Receiver<UserPreferences>;
    async fn update_currency(&self, currency: Currency) -> Result<()>;
    async fn update_coin_sort(&self, coin_sort: CoinSort) -> Result<()>;
    async fn update_start_screen(&self, start_screen: StartScreen) -> Result<()>;
    async fn update_is_favourites_condensed(&self, is_condensed: bool) -> Result<()>;
}

pub struct PreferencesService {
    preferences_repository: Arc<dyn PreferencesRepositoryTrait>,
}

impl PreferencesService {
    pub fn new(preferences_repository: Arc<dyn PreferencesRepositoryTrait>) -> Self {
        PreferencesService {
            preferences_repository,
        }
    }
}

#[async_trait]
impl PreferencesServiceTrait for PreferencesService {
    fn get_user_preferences(&self) -> UserPreferences {
        self.preferences_repository.get_user_preferences()
    }

    fn observe_user_preferences(&self) -> watch::Receiver<UserPreferences> {
        self.preferences_repository.observe_user_preferences()
    }

    async fn update_currency(&self, currency: Currency) -> Result<()> {
        self.preferences_repository.update_currency(currency).await
    }

    async fn update_coin_sort(&self, coin_sort: CoinSort) -> Result<()> {
        self.preferences_repository.update_coin_sort(coin_sort).await
    }

    async fn update_start_screen(&self, start_screen: StartScreen) -> Result<()> {
        self.preferences_repository
            .update_start_screen(start_screen)
            .await
    }

    async fn update_is_favourites_condensed(&self, is_condensed: bool) -> Result<()> {
        self.preferences_repository
            .update_is_favourites_condensed(is_condensed)
            .await
    }
}
