use std::sync::Arc;

use log::error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::coins::{Coin, CoinsServiceTrait};
use crate::errors::DataResult;
use crate::preferences::{CoinSort, PreferencesServiceTrait, UserPreferences};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketUiState {
    Loading,
    Success {
        coins: Vec<Coin>,
        coin_sort: CoinSort,
    },
    Error(String),
}

enum Command {
    Refresh,
}

/// State machine for the market (coin list) screen.
///
/// Coins render from the cached-coins stream; every preference change and
/// every explicit refresh issues a fresh remote fetch that writes through to
/// the cache. A failed fetch surfaces its message and leaves the stale cache
/// unrendered.
pub struct MarketViewModel {
    ui_state: Arc<watch::Sender<MarketUiState>>,
    commands: mpsc::UnboundedSender<Command>,
    preferences_service: Arc<dyn PreferencesServiceTrait>,
    driver: Option<JoinHandle<()>>,
}

impl MarketViewModel {
    pub fn new(
        coins_service: Arc<dyn CoinsServiceTrait>,
        preferences_service: Arc<dyn PreferencesServiceTrait>,
    ) -> Self {
        let ui_state = Arc::new(watch::channel(MarketUiState::Loading).0);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let driver = tokio::spawn(market_driver(
            coins_service,
            preferences_service.clone(),
            ui_state.clone(),
            commands_rx,
        ));

        MarketViewModel {
            ui_state,
            commands: commands_tx,
            preferences_service,
            driver: Some(driver),
        }
    }

    pub fn ui_state(&self) -> watch::Receiver<MarketUiState> {
        self.ui_state.subscribe()
    }

    pub fn pull_refresh(&self) {
        let _ = self.commands.send(Command::Refresh);
    }

    pub fn update_coin_sort(&self, coin_sort: CoinSort) {
        let preferences_service = self.preferences_service.clone();

        tokio::spawn(async move {
            if let Err(e) = preferences_service.update_coin_sort(coin_sort).await {
                error!("update_coin_sort failed: {}", e);
            }
        });
    }
}

impl Drop for MarketViewModel {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

async fn market_driver(
    coins_service: Arc<dyn CoinsServiceTrait>,
    preferences_service: Arc<dyn PreferencesServiceTrait>,
    ui_state: Arc<watch::Sender<MarketUiState>>,
    mut commands_rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut preferences_rx = preferences_service.observe_user_preferences();
    let mut cached_coins_rx = coins_service.observe_cached_coins();

    let mut preferences = preferences_rx.borrow_and_update().clone();
    refresh_coins(&coins_service, &preferences, &ui_state).await;

    loop {
        tokio::select! {
            changed = preferences_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                preferences = preferences_rx.borrow_and_update().clone();
                refresh_coins(&coins_service, &preferences, &ui_state).await;
            }
            changed = cached_coins_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                let snapshot = cached_coins_rx.borrow_and_update().clone();
                match snapshot {
                    DataResult::Success(coins) => {
                        ui_state.send_replace(MarketUiState::Success {
                            coins,
                            coin_sort: preferences.coin_sort,
                        });
                    }
                    DataResult::Error(message) => {
                        ui_state.send_replace(MarketUiState::Error(message));
                    }
                }
            }
            command = commands_rx.recv() => {
                match command {
                    Some(Command::Refresh) => {
                        refresh_coins(&coins_service, &preferences, &ui_state).await;
                    }
                    None => return,
                }
            }
        }
    }
}

async fn refresh_coins(
    coins_service: &Arc<dyn CoinsServiceTrait>,
    preferences: &UserPreferences,
    ui_state: &Arc<watch::Sender<MarketUiState>>,
) {
    let result = coins_service
        .get_coins(preferences.currency, preferences.coin_sort)
        .await;

    match result {
        DataResult::Success(coins) => {
            ui_state.send_replace(MarketUiState::Success {
                coins,
                coin_sort: preferences.coin_sort,
            });
        }
        DataResult::Error(message) => {
            ui_state.send_replace(MarketUiState::Error(message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Percentage, Price};
    use crate::preferences::{Currency, PreferencesRepository, PreferencesService};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn create_test_coin(id: &str) -> Coin {
        Coin {
            id: id.to_string(),
            symbol: "BTC".to_string(),
            name: "Bitcoin".to_string(),
            image_url: String::new(),
            current_price: Price::new(Some("29490.95")),
            price_change_percentage_24h: Percentage::new(Some("0.96")),
            prices_24h: Vec::new(),
        }
    }

    struct FakeCoinsService {
        call_count: AtomicUsize,
        requested_sorts: Mutex<Vec<CoinSort>>,
        result: DataResult<Vec<Coin>>,
        cached: Arc<watch::Sender<DataResult<Vec<Coin>>>>,
    }

    impl FakeCoinsService {
        fn new(result: DataResult<Vec<Coin>>) -> Self {
            FakeCoinsService {
                call_count: AtomicUsize::new(0),
                requested_sorts: Mutex::new(Vec::new()),
                result,
                cached: Arc::new(watch::channel(DataResult::Success(Vec::new())).0),
            }
        }
    }

    #[async_trait]
    impl CoinsServiceTrait for FakeCoinsService {
        async fn get_coins(
            &self,
            _currency: Currency,
            coin_sort: CoinSort,
        ) -> DataResult<Vec<Coin>> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.requested_sorts.lock().unwrap().push(coin_sort);
            self.result.clone()
        }

        fn observe_cached_coins(&self) -> watch::Receiver<DataResult<Vec<Coin>>> {
            self.cached.subscribe()
        }
    }

    fn preferences_service() -> Arc<dyn PreferencesServiceTrait> {
        Arc::new(PreferencesService::new(Arc::new(
            PreferencesRepository::default(),
        )))
    }

    async fn wait_for_state<F>(
        rx: &mut watch::Receiver<MarketUiState>,
        mut predicate: F,
    ) -> MarketUiState
    where
        F: FnMut(&MarketUiState) -> bool,
    {
        loop {
            {
                let state = rx.borrow_and_update();
                if predicate(&state) {
                    return state.clone();
                }
            }
            rx.changed().await.expect("ui state channel closed");
        }
    }

    #[tokio::test]
    async fn initial_fetch_publishes_success_state() {
        let coins_service = Arc::new(FakeCoinsService::new(DataResult::Success(vec![
            create_test_coin("Qwsogvtv82FCd"),
        ])));
        let view_model = MarketViewModel::new(coins_service.clone(), preferences_service());

        let mut ui_state = view_model.ui_state();
        let state = wait_for_state(&mut ui_state, |state| {
            matches!(state, MarketUiState::Success { .. })
        })
        .await;

        match state {
            MarketUiState::Success { coins, coin_sort } => {
                assert_eq!(coins.len(), 1);
                assert_eq!(coin_sort, CoinSort::MarketCap);
            }
            other => panic!("expected success, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn fetch_error_publishes_error_state() {
        let coins_service = Arc::new(FakeCoinsService::new(DataResult::Error(
            "Unable to fetch coins".to_string(),
        )));
        let view_model = MarketViewModel::new(coins_service.clone(), preferences_service());

        let mut ui_state = view_model.ui_state();
        let state =
            wait_for_state(&mut ui_state, |state| matches!(state, MarketUiState::Error(_))).await;

        assert_eq!(state, MarketUiState::Error("Unable to fetch coins".to_string()));
    }

    #[tokio::test]
    async fn coin_sort_update_triggers_refetch_with_new_sort() {
        let coins_service = Arc::new(FakeCoinsService::new(DataResult::Success(Vec::new())));
        let view_model = MarketViewModel::new(coins_service.clone(), preferences_service());

        let mut ui_state = view_model.ui_state();
        wait_for_state(&mut ui_state, |state| {
            matches!(state, MarketUiState::Success { .. })
        })
        .await;

        view_model.update_coin_sort(CoinSort::Gainers);

        wait_for_state(&mut ui_state, |state| {
            matches!(
                state,
                MarketUiState::Success {
                    coin_sort: CoinSort::Gainers,
                    ..
                }
            )
        })
        .await;

        let sorts = coins_service.requested_sorts.lock().unwrap().clone();
        assert_eq!(sorts, vec![CoinSort::MarketCap, CoinSort::Gainers]);
    }

    #[tokio::test]
    async fn pull_refresh_issues_fresh_fetch() {
        let coins_service = Arc::new(FakeCoinsService::new(DataResult::Success(Vec::new())));
        let view_model = MarketViewModel::new(coins_service.clone(), preferences_service());

        let mut ui_state = view_model.ui_state();
        wait_for_state(&mut ui_state, |state| {
            matches!(state, MarketUiState::Success { .. })
        })
        .await;
        let calls_after_init = coins_service.call_count.load(Ordering::SeqCst);

        view_model.pull_refresh();

        ui_state.changed().await.unwrap();
        assert_eq!(
            coins_service.call_count.load(Ordering::SeqCst),
            calls_after_init + 1
        );
    }
}
