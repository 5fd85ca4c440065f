use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::DataResult;

use super::search_model::SearchCoin;
use super::search_repository::SearchRepositoryTrait;

#[async_trait]
pub trait SearchServiceTrait: Send + Sync {
    async fn get_coin_search_results(&self, query: &str) -> DataResult<Vec<SearchCoin>>;
}

pub struct SearchService {
    search_repository: Arc<dyn SearchRepositoryTrait>,
}

impl SearchService {
    pub fn new(search_repository: Arc<dyn SearchRepositoryTrait>) -> Self {
        SearchService { search_repository }
    }
}

#[async_trait]
impl SearchServiceTrait for SearchService {
    async fn get_coin_search_results(&self, query: &str) -> DataResult<Vec<SearchCoin>> {
        self.search_repository.get_coin_search_results(query).await
    }
}
