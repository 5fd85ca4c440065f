use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Percentage, Price};

/// Locally cached snapshot of a market coin. Superseded whole on every
/// successful remote refresh, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image_url: String,
    pub current_price: Price,
    pub price_change_percentage_24h: Percentage,
    pub prices_24h: Vec<Decimal>,
}

/// Favourite-set membership marker. Presence in the local favourites set is
/// the sole favourite-membership signal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteCoinId {
    pub id: String,
}

impl FavouriteCoinId {
    pub fn new(id: impl Into<String>) -> Self {
        FavouriteCoinId { id: id.into() }
    }
}

/// Favourited coin with its last refreshed market data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavouriteCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image_url: String,
    pub current_price: Price,
    pub price_change_percentage_24h: Percentage,
    pub prices_24h: Vec<Decimal>,
}
