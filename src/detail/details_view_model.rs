use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::chart::{ChartPeriod, ChartServiceTrait, CoinChart};
use crate::errors::DataResult;
use crate::favourites::FavouritesServiceTrait;
use crate::local::FavouriteCoinId;
use crate::preferences::PreferencesServiceTrait;

use super::detail_model::CoinDetail;
use super::detail_service::DetailServiceTrait;

pub const ERROR_MESSAGE_INVALID_COIN_ID: &str = "Invalid coin ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailsUiState {
    Loading,
    Success {
        coin_details: CoinDetail,
        coin_chart: CoinChart,
        chart_period: ChartPeriod,
        is_coin_favourite: bool,
    },
    Error(String),
}

enum SourceUpdate {
    Details(DataResult<CoinDetail>),
    Chart(DataResult<CoinChart>, u64),
}

enum Command {
    Refresh,
}

/// State machine for the coin detail screen.
///
/// Combines the detail, chart and favourite-membership sources into one UI
/// state. Success is published only when all three sources are Success; the
/// first source in Error (detail, then chart, then favourite) supplies the
/// surfaced message.
pub struct DetailsViewModel {
    ui_state: Arc<watch::Sender<DetailsUiState>>,
    chart_period: Arc<watch::Sender<ChartPeriod>>,
    // Bumped at request issuance; a chart fetch commits its result only if
    // its generation is still current (latest-request-wins).
    chart_generation: Arc<AtomicU64>,
    commands: Option<mpsc::UnboundedSender<Command>>,
    coin_id: Option<String>,
    favourites_service: Arc<dyn FavouritesServiceTrait>,
    driver: Option<JoinHandle<()>>,
}

impl DetailsViewModel {
    pub fn new(
        coin_id: Option<String>,
        detail_service: Arc<dyn DetailServiceTrait>,
        chart_service: Arc<dyn ChartServiceTrait>,
        favourites_service: Arc<dyn FavouritesServiceTrait>,
        preferences_service: Arc<dyn PreferencesServiceTrait>,
    ) -> Self {
        let ui_state = Arc::new(watch::channel(DetailsUiState::Loading).0);
        let chart_period = Arc::new(watch::channel(ChartPeriod::default()).0);
        let chart_generation = Arc::new(AtomicU64::new(1));

        // A missing id short-circuits to Error without attempting any fetch.
        let Some(coin_id) = coin_id else {
            ui_state.send_replace(DetailsUiState::Error(
                ERROR_MESSAGE_INVALID_COIN_ID.to_string(),
            ));

            return DetailsViewModel {
                ui_state,
                chart_period,
                chart_generation,
                commands: None,
                coin_id: None,
                favourites_service,
                driver: None,
            };
        };

        let (commands_tx, commands_rx) = mpsc::unbounded_channel();

        let driver = tokio::spawn(details_driver(DriverContext {
            coin_id: coin_id.clone(),
            detail_service,
            chart_service,
            favourite_rx: favourites_service.observe_is_favourite(&coin_id),
            preferences_service,
            ui_state: ui_state.clone(),
            chart_period_rx: chart_period.subscribe(),
            chart_generation: chart_generation.clone(),
            commands_rx,
        }));

        DetailsViewModel {
            ui_state,
            chart_period,
            chart_generation,
            commands: Some(commands_tx),
            coin_id: Some(coin_id),
            favourites_service,
            driver: Some(driver),
        }
    }

    pub fn ui_state(&self) -> watch::Receiver<DetailsUiState> {
        self.ui_state.subscribe()
    }

    /// Switches the chart period. The in-flight fetch for the previous
    /// period is abandoned; only the latest request's result reaches state.
    pub fn update_chart_period(&self, chart_period: ChartPeriod) {
        if *self.chart_period.borrow() == chart_period {
            return;
        }

        // Invalidate in-flight fetches before publishing the new period, so
        // a result for the old period can never commit past this point.
        self.chart_generation.fetch_add(1, Ordering::SeqCst);
        self.chart_period.send_replace(chart_period);
    }

    /// Flips favourite membership for this coin. The UI state update arrives
    /// through the ordinary membership observation stream, not from here.
    pub fn toggle_is_coin_favourite(&self) {
        let Some(coin_id) = self.coin_id.clone() else {
            return;
        };
        let favourites_service = self.favourites_service.clone();

        tokio::spawn(async move {
            if let DataResult::Error(message) = favourites_service
                .toggle_favourite(FavouriteCoinId::new(coin_id))
                .await
            {
                error!("toggle_is_coin_favourite failed: {}", message);
            }
        });
    }

    /// Re-issues the detail and chart fetches.
    pub fn refresh(&self) {
        if let Some(commands) = &self.commands {
            let _ = commands.send(Command::Refresh);
        }
    }
}

impl Drop for DetailsViewModel {
    fn drop(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
    }
}

struct DriverContext {
    coin_id: String,
    detail_service: Arc<dyn DetailServiceTrait>,
    chart_service: Arc<dyn ChartServiceTrait>,
    favourite_rx: watch::Receiver<DataResult<bool>>,
    preferences_service: Arc<dyn PreferencesServiceTrait>,
    ui_state: Arc<watch::Sender<DetailsUiState>>,
    chart_period_rx: watch::Receiver<ChartPeriod>,
    chart_generation: Arc<AtomicU64>,
    commands_rx: mpsc::UnboundedReceiver<Command>,
}

async fn details_driver(mut ctx: DriverContext) {
    let (updates_tx, mut updates_rx) = mpsc::unbounded_channel();

    let mut latest_details: Option<DataResult<CoinDetail>> = None;
    let mut latest_chart: Option<DataResult<CoinChart>> = None;
    let mut latest_favourite: Option<DataResult<bool>> =
        Some(ctx.favourite_rx.borrow().clone());

    spawn_details_fetch(&ctx, &updates_tx);
    spawn_chart_fetch(&ctx, &updates_tx);

    loop {
        tokio::select! {
            update = updates_rx.recv() => {
                match update {
                    Some(SourceUpdate::Details(result)) => {
                        latest_details = Some(result);
                    }
                    Some(SourceUpdate::Chart(result, generation)) => {
                        if generation != ctx.chart_generation.load(Ordering::SeqCst) {
                            // A newer period superseded this fetch; discard.
                            continue;
                        }
                        latest_chart = Some(result);
                    }
                    None => return,
                }
            }
            changed = ctx.chart_period_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                spawn_chart_fetch(&ctx, &updates_tx);
            }
            changed = ctx.favourite_rx.changed() => {
                if changed.is_err() {
                    return;
                }
                latest_favourite = Some(ctx.favourite_rx.borrow_and_update().clone());
            }
            command = ctx.commands_rx.recv() => {
                match command {
                    Some(Command::Refresh) => {
                        latest_details = None;
                        latest_chart = None;
                        ctx.ui_state.send_replace(DetailsUiState::Loading);

                        ctx.chart_generation.fetch_add(1, Ordering::SeqCst);
                        spawn_details_fetch(&ctx, &updates_tx);
                        spawn_chart_fetch(&ctx, &updates_tx);
                        continue;
                    }
                    None => return,
                }
            }
        }

        recombine(
            &ctx,
            latest_details.as_ref(),
            latest_chart.as_ref(),
            latest_favourite.as_ref(),
        );
    }
}

fn spawn_details_fetch(ctx: &DriverContext, updates_tx: &mpsc::UnboundedSender<SourceUpdate>) {
    let detail_service = ctx.detail_service.clone();
    let coin_id = ctx.coin_id.clone();
    let currency = ctx.preferences_service.get_user_preferences().currency;
    let updates_tx = updates_tx.clone();

    tokio::spawn(async move {
        let result = detail_service.get_coin_details(&coin_id, currency).await;
        let _ = updates_tx.send(SourceUpdate::Details(result));
    });
}

fn spawn_chart_fetch(ctx: &DriverContext, updates_tx: &mpsc::UnboundedSender<SourceUpdate>) {
    let chart_service = ctx.chart_service.clone();
    let coin_id = ctx.coin_id.clone();
    let chart_period = *ctx.chart_period_rx.borrow();
    let generation = ctx.chart_generation.load(Ordering::SeqCst);
    let currency = ctx.preferences_service.get_user_preferences().currency;
    let updates_tx = updates_tx.clone();

    tokio::spawn(async move {
        let result = chart_service
            .get_coin_chart(&coin_id, chart_period, currency)
            .await;
        let _ = updates_tx.send(SourceUpdate::Chart(result, generation));
    });
}

/// Publishes a combined state once every source has a value. The first
/// source found in Error supplies the message; Success requires all three.
fn recombine(
    ctx: &DriverContext,
    details: Option<&DataResult<CoinDetail>>,
    chart: Option<&DataResult<CoinChart>>,
    favourite: Option<&DataResult<bool>>,
) {
    let (Some(details), Some(chart), Some(favourite)) = (details, chart, favourite) else {
        return;
    };

    let next_state = match (details, chart, favourite) {
        (DataResult::Error(message), _, _) => DetailsUiState::Error(message.clone()),
        (_, DataResult::Error(message), _) => DetailsUiState::Error(message.clone()),
        (_, _, DataResult::Error(message)) => DetailsUiState::Error(message.clone()),
        (
            DataResult::Success(coin_details),
            DataResult::Success(coin_chart),
            DataResult::Success(is_coin_favourite),
        ) => DetailsUiState::Success {
            coin_details: coin_details.clone(),
            coin_chart: coin_chart.clone(),
            chart_period: *ctx.chart_period_rx.borrow(),
            is_coin_favourite: *is_coin_favourite,
        },
    };

    ctx.ui_state.send_replace(next_state);
}
