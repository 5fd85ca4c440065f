use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::errors::DataResult;

use super::search_model::SearchCoin;
use super::search_service::SearchServiceTrait;

/// Quiescence window after the last query change before a search fires.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(350);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchUiState {
    Loading,
    Success {
        search_results: Vec<SearchCoin>,
        query_has_no_results: bool,
    },
    Error(String),
}

/// State machine for the coin search screen.
///
/// Query changes are debounced; a blank query short-circuits to an empty
/// Success state without a network call.
pub struct SearchViewModel {
    ui_state: Arc<watch::Sender<SearchUiState>>,
    query: Arc<watch::Sender<String>>,
    driver: Option<JoinHandle<()>>,
}

impl SearchViewModel {
    pub fn new(search_service: Arc<dyn SearchServiceTrait>) -> Self {
        let ui_state = Arc::new(watch::channel(SearchUiState::Loading).0);
        let query = Arc::new(watch::channel(String::new()).0);

        let driver = tokio::spawn(search_driver(
            search_service,
            ui_state.clone(),
            query.subscribe(),
        ));

        SearchViewModel {
            ui_state,
            query,
            driver: Some(driver),
        }
    }

    pub fn ui_state(&self) -> watch::Receiver<SearchUiState> {
        self.ui_state.subscribe()
    }

    pub fn search_query(&self) -> String {
        self.query.borrow().clone()
    }

    pub fn update_search_query(&self, new_query: impl Into<String>) {
        let new_query = new_query.into();

        self.query.send_if_modified(|query| {
            if *query == new_query {
                false
            } else {
                *query = new_query;
                true
            }
        });
    }
}

impl Drop for SearchViewModel {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

async fn search_driver(
    search_service: Arc<dyn SearchServiceTrait>,
    ui_state: Arc<watch::Sender<SearchUiState>>,
    mut query_rx: watch::Receiver<String>,
) {
    loop {
        // Collect query changes until the debounce window passes without one.
        loop {
            tokio::select! {
                changed = query_rx.changed() => {
                    if changed.is_err() {
                        return;
                    }
                }
                _ = tokio::time::sleep(DEBOUNCE_DURATION) => break,
            }
        }

        let query = query_rx.borrow().trim().to_string();

        let next_state = if query.is_empty() {
            SearchUiState::Success {
                search_results: Vec::new(),
                query_has_no_results: false,
            }
        } else {
            match search_service.get_coin_search_results(&query).await {
                DataResult::Success(search_results) => {
                    let query_has_no_results = search_results.is_empty();
                    SearchUiState::Success {
                        search_results,
                        query_has_no_results,
                    }
                }
                DataResult::Error(message) => SearchUiState::Error(message),
            }
        };

        ui_state.send_replace(next_state);

        // Sleep until the query changes again.
        if query_rx.changed().await.is_err() {
            return;
        }
    }
}
