use serde::{Deserialize, Serialize};

use crate::remote::models::{SearchApiModel, SearchCoinApiModel};

/// Coin summary returned from a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCoin {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image_url: String,
}

impl SearchCoin {
    pub fn from_api_model(api_model: SearchCoinApiModel) -> Option<SearchCoin> {
        let id = api_model.uuid.filter(|id| !id.is_empty())?;

        Some(SearchCoin {
            id,
            symbol: api_model.symbol.unwrap_or_default(),
            name: api_model.name.unwrap_or_default(),
            image_url: api_model.icon_url.unwrap_or_default(),
        })
    }
}

pub fn map_search_coins(api_model: SearchApiModel) -> Vec<SearchCoin> {
    api_model
        .data
        .and_then(|data| data.coins)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter_map(SearchCoin::from_api_model)
        .collect()
}
