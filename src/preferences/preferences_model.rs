use serde::{Deserialize, Serialize};

/// Reference currency for all remote price data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Gbp,
    Eur,
}

impl Currency {
    /// CoinRanking reference currency UUID for this currency.
    pub fn to_currency_uuid(self) -> &'static str {
        match self {
            Currency::Usd => "yhjMzLPhuIDl",
            Currency::Gbp => "Hokyui45Z38f",
            Currency::Eur => "5k-_VTxqtCEI",
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Currency::Usd
    }
}

/// Ordering applied to remote coin list fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoinSort {
    MarketCap,
    Popular,
    Gainers,
    Losers,
    Newest,
}

impl CoinSort {
    pub fn to_order_by(self) -> &'static str {
        match self {
            CoinSort::MarketCap => "marketCap",
            CoinSort::Popular => "24hVolume",
            CoinSort::Gainers => "change",
            CoinSort::Losers => "change",
            CoinSort::Newest => "listedAt",
        }
    }

    pub fn to_order_direction(self) -> &'static str {
        match self {
            CoinSort::Losers => "asc",
            _ => "desc",
        }
    }
}

impl Default for CoinSort {
    fn default() -> Self {
        CoinSort::MarketCap
    }
}

/// Screen shown when the app is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartScreen {
    Market,
    Favourites,
    Search,
}

impl Default for StartScreen {
    fn default() -> Self {
        StartScreen::Market
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub currency: Currency,
    pub coin_sort: CoinSort,
    pub start_screen: StartScreen,
    pub is_favourites_condensed: bool,
}
