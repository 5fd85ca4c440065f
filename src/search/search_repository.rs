use std::sync::Arc;

use async_trait::async_trait;
use log::error;

use crate::errors::DataResult;
use crate::remote::CoinDataProvider;

use super::search_model::{map_search_coins, SearchCoin};

pub const ERROR_MESSAGE_SEARCH: &str = "Unable to fetch coin search results";

#[async_trait]
pub trait SearchRepositoryTrait: Send + Sync {
    async fn get_coin_search_results(&self, query: &str) -> DataResult<Vec<SearchCoin>>;
}

pub struct SearchRepository {
    provider: Arc<dyn CoinDataProvider>,
}

impl SearchRepository {
    pub fn new(provider: Arc<dyn CoinDataProvider>) -> Self {
        SearchRepository { provider }
    }
}

#[async_trait]
impl SearchRepositoryTrait for SearchRepository {
    async fn get_coin_search_results(&self, query: &str) -> DataResult<Vec<SearchCoin>> {
        match self.provider.search_coins(query).await {
            Ok(api_model) => DataResult::Success(map_search_coins(api_model)),
            Err(e) => {
                error!("get_coin_search_results failed for {:?}: {}", query, e);
                DataResult::Error(ERROR_MESSAGE_SEARCH.to_string())
            }
        }
    }
}
