use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Price;
use crate::remote::models::CoinDetailApiModel;

/// Remote snapshot of a single coin with its market statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub image_url: String,
    pub current_price: Price,
    pub market_cap: Price,
    pub market_cap_rank: String,
    pub volume_24h: Price,
    pub circulating_supply: String,
    pub total_supply: String,
    pub all_time_high: Price,
    pub all_time_high_date: Option<DateTime<Utc>>,
    pub listed_date: Option<DateTime<Utc>>,
}

impl CoinDetail {
    /// Maps the payload to the domain model; a missing coin object or id
    /// yields `None`, any other absent field gets its sentinel default.
    pub fn from_api_model(api_model: CoinDetailApiModel) -> Option<CoinDetail> {
        let coin = api_model.data.and_then(|data| data.coin)?;
        let id = coin.uuid.filter(|id| !id.is_empty())?;

        let (circulating_supply, total_supply) = coin
            .supply
            .map(|supply| {
                (
                    supply.circulating.unwrap_or_default(),
                    supply.total.unwrap_or_default(),
                )
            })
            .unwrap_or_default();

        let (all_time_high, all_time_high_date) = coin
            .all_time_high
            .map(|ath| {
                (
                    Price::new(ath.price.as_deref()),
                    ath.timestamp.and_then(epoch_to_datetime),
                )
            })
            .unwrap_or((Price::zero(), None));

        Some(CoinDetail {
            id,
            name: coin.name.unwrap_or_default(),
            symbol: coin.symbol.unwrap_or_default(),
            image_url: coin.icon_url.unwrap_or_default(),
            current_price: Price::new(coin.price.as_deref()),
            market_cap: Price::new(coin.market_cap.as_deref()),
            market_cap_rank: coin.rank.map(|rank| rank.to_string()).unwrap_or_default(),
            volume_24h: Price::new(coin.volume_24h.as_deref()),
            circulating_supply,
            total_supply,
            all_time_high,
            all_time_high_date,
            listed_date: coin.listed_at.and_then(epoch_to_datetime),
        })
    }
}

fn epoch_to_datetime(timestamp: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
}
