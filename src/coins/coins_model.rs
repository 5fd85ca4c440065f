use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::local::{CachedCoin, FavouriteCoin};
use crate::models::{Percentage, Price};
use crate::remote::models::{CoinApiModel, CoinsApiModel};

/// Market coin as rendered on the coin list screens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image_url: String,
    pub current_price: Price,
    pub price_change_percentage_24h: Percentage,
    pub prices_24h: Vec<Decimal>,
}

impl Coin {
    /// Maps a payload coin to the domain model. Entries without an id are
    /// dropped; any other missing field gets its sentinel default.
    pub fn from_api_model(api_model: CoinApiModel) -> Option<Coin> {
        let id = api_model.uuid.filter(|id| !id.is_empty())?;

        Some(Coin {
            id,
            symbol: api_model.symbol.unwrap_or_default(),
            name: api_model.name.unwrap_or_default(),
            image_url: api_model.icon_url.unwrap_or_default(),
            current_price: Price::new(api_model.price.as_deref()),
            price_change_percentage_24h: Percentage::new(api_model.change.as_deref()),
            prices_24h: map_sparkline(api_model.sparkline),
        })
    }
}

/// Null price points in the sparkline are filtered out, not zeroed.
fn map_sparkline(sparkline: Option<Vec<Option<String>>>) -> Vec<Decimal> {
    sparkline
        .unwrap_or_default()
        .into_iter()
        .filter_map(|price| price.and_then(|value| Decimal::from_str(&value).ok()))
        .collect()
}

pub fn map_coins(api_model: CoinsApiModel) -> Vec<Coin> {
    api_model
        .data
        .and_then(|data| data.coins)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(Coin::from_api_model)
        .collect()
}

impl From<Coin> for CachedCoin {
    fn from(coin: Coin) -> Self {
        CachedCoin {
            id: coin.id,
            symbol: coin.symbol,
            name: coin.name,
            image_url: coin.image_url,
            current_price: coin.current_price,
            price_change_percentage_24h: coin.price_change_percentage_24h,
            prices_24h: coin.prices_24h,
        }
    }
}

impl From<Coin> for FavouriteCoin {
    fn from(coin: Coin) -> Self {
        FavouriteCoin {
            id: coin.id,
            symbol: coin.symbol,
            name: coin.name,
            image_url: coin.image_url,
            current_price: coin.current_price,
            price_change_percentage_24h: coin.price_change_percentage_24h,
            prices_24h: coin.prices_24h,
        }
    }
}

impl From<CachedCoin> for Coin {
    fn from(cached: CachedCoin) -> Self {
        Coin {
            id: cached.id,
            symbol: cached.symbol,
            name: cached.name,
            image_url: cached.image_url,
            current_price: cached.current_price,
            price_change_percentage_24h: cached.price_change_percentage_24h,
            prices_24h: cached.prices_24h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::models::CoinsData;
    use rust_decimal_macros::dec;

    #[test]
    fn coin_without_id_is_dropped() {
        let api_model = CoinApiModel {
            uuid: None,
            name: Some("Bitcoin".to_string()),
            ..Default::default()
        };

        assert!(Coin::from_api_model(api_model).is_none());
    }

    #[test]
    fn missing_fields_default_without_failing_the_coin() {
        let api_model = CoinApiModel {
            uuid: Some("Qwsogvtv82FCd".to_string()),
            ..Default::default()
        };

        let coin = Coin::from_api_model(api_model).unwrap();
        assert_eq!(coin.symbol, "");
        assert_eq!(coin.current_price, Price::zero());
        assert_eq!(coin.price_change_percentage_24h, Percentage::zero());
        assert!(coin.prices_24h.is_empty());
    }

    #[test]
    fn sparkline_nulls_are_filtered_not_zeroed() {
        let api_model = CoinApiModel {
            uuid: Some("Qwsogvtv82FCd".to_string()),
            sparkline: Some(vec![
                Some("29790.15".to_string()),
                None,
                Some("29481.29".to_string()),
                Some("invalid".to_string()),
            ]),
            ..Default::default()
        };

        let coin = Coin::from_api_model(api_model).unwrap();
        assert_eq!(coin.prices_24h, vec![dec!(29790.15), dec!(29481.29)]);
    }

    #[test]
    fn map_coins_handles_missing_data_envelope() {
        assert!(map_coins(CoinsApiModel { data: None }).is_empty());
        assert!(map_coins(CoinsApiModel {
            data: Some(CoinsData { coins: None })
        })
        .is_empty());
    }
}
