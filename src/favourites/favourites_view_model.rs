use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::errors::DataResult;
use crate::local::{FavouriteCoin, FavouriteCoinId};
use crate::preferences::{PreferencesServiceTrait, UserPreferences};

use super::favourites_service::FavouritesServiceTrait;

/// Aggregate state for the favourites screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavouritesUiState {
    pub favourite_coins: Vec<FavouriteCoin>,
    pub is_loading: bool,
    pub is_refreshing: bool,
    pub error_messages: Vec<String>,
}

impl Default for FavouritesUiState {
    fn default() -> Self {
        FavouritesUiState {
            favourite_coins: Vec::new(),
            is_loading: true,
            is_refreshing: false,
            error_messages: Vec::new(),
        }
    }
}

enum Command {
    Refresh,
    DismissErrorMessage(String),
}

/// State machine for the favourites screen.
///
/// Membership is locally authoritative: every favourite-ids change (and every
/// preference change) refreshes the favourite-coins cache from the remote
/// source, and the screen renders from the local favourite-coins stream.
/// Refresh failures accumulate as dismissible messages instead of replacing
/// the whole state.
pub struct FavouritesViewModel {
    ui_state: Arc<watch::Sender<FavouritesUiState>>,
    commands: mpsc::UnboundedSender<Command>,
    driver: Option<JoinHandle<()>>,
}

impl FavouritesViewModel {
    pub fn new(
        favourites_service: Arc<dyn FavouritesServiceTrait>,
        preferences_service: Arc<dyn PreferencesServiceTrait>,
    ) -> Self {
        let ui_state = Arc::new(watch::channel(FavouritesUiState::default()).0);
        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let driver = tokio::spawn(favourites_driver(
            favourites_service,
            preferences_service,
            ui_state.clone(),
            commands_rx,
        ));

        FavouritesViewModel {
            ui_state,
            commands: commands_tx,
            driver: Some(driver),
        }
    }

    pub fn ui_state(&self) -> watch::Receiver<FavouritesUiState> {
        self.ui_state.subscribe()
    }

    pub fn pull_refresh(&self) {
        let _ = self.commands.send(Command::Refresh);
    }

    pub fn dismiss_error_message(&self, message: impl Into<String>) {
        let _ = self
            .commands
            .send(Command::DismissErrorMessage(message.into()));
    }
}

impl Drop for FavouritesViewModel {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

async fn favourites_driver(
    favourites_service: Arc<dyn FavouritesServiceTrait>,
    preferences_service: Arc<dyn PreferencesServiceTrait>,
    ui_state: Arc<watch::Sender<FavouritesUiState>>,
    mut commands_rx: mpsc::UnboundedReceiver<Command>,
) {
    let mut ids_rx = favourites_service.observe_favourite_ids();
    let mut preferences_rx = preferences_service.observe_user_preferences();
    let mut coins_rx = favourites_service.observe_favourite_coins();

    let mut preferences = preferences_rx.borrow_and_update().clone();

    apply_coins_snapshot(&ui_state, coins_rx.borrow_and_update().clone());

    let ids = ids_rx.borrow_and_update().clone();
    refresh_favourite_coins(&favourites_service, ids, &preferences, &ui_state).await;
    ui_state.send_modify(|state| state.is_loading = false);

    loop {
        tokio::select! {
            changed = ids_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                let ids = ids_rx.borrow_and_update().clone();
                refresh_favourite_coins(&favourites_service, ids, &preferences, &ui_state).await;
            }
            changed = preferences_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                preferences = preferences_rx.borrow_and_update().clone();
                let ids = ids_rx.borrow().clone();
                refresh_favourite_coins(&favourites_service, ids, &preferences, &ui_state).await;
            }
            changed = coins_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                apply_coins_snapshot(&ui_state, coins_rx.borrow_and_update().clone());
            }
            command = commands_rx.recv() => {
                match command {
                    Some(Command::Refresh) => {
                        ui_state.send_modify(|state| state.is_refreshing = true);
                        let ids = ids_rx.borrow().clone();
                        refresh_favourite_coins(&favourites_service, ids, &preferences, &ui_state)
                            .await;
                        ui_state.send_modify(|state| state.is_refreshing = false);
                    }
                    Some(Command::DismissErrorMessage(message)) => {
                        ui_state.send_modify(|state| {
                            state.error_messages.retain(|existing| *existing != message);
                        });
                    }
                    None => return,
                }
            }
        }
    }
}

/// Refreshes the favourite-coins cache for the given membership snapshot.
/// The resulting coin list arrives through the favourite-coins stream, not
/// from here.
async fn refresh_favourite_coins(
    favourites_service: &Arc<dyn FavouritesServiceTrait>,
    ids: DataResult<Vec<FavouriteCoinId>>,
    preferences: &UserPreferences,
    ui_state: &Arc<watch::Sender<FavouritesUiState>>,
) {
    let ids = match ids {
        DataResult::Success(ids) => ids,
        DataResult::Error(message) => {
            push_error_message(ui_state, message);
            return;
        }
    };

    if let DataResult::Error(message) = favourites_service
        .update_cached_favourite_coins(&ids, preferences.currency, preferences.coin_sort)
        .await
    {
        push_error_message(ui_state, message);
    }
}

fn apply_coins_snapshot(
    ui_state: &Arc<watch::Sender<FavouritesUiState>>,
    snapshot: DataResult<Vec<FavouriteCoin>>,
) {
    match snapshot {
        DataResult::Success(favourite_coins) => {
            ui_state.send_modify(|state| state.favourite_coins = favourite_coins);
        }
        DataResult::Error(message) => push_error_message(ui_state, message),
    }
}

fn push_error_message(ui_state: &Arc<watch::Sender<FavouritesUiState>>, message: String) {
    ui_state.send_modify(|state| {
        if !state.error_messages.contains(&message) {
            state.error_messages.push(message);
        }
    });
}
