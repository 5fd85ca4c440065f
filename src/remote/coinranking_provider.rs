use async_trait::async_trait;
use reqwest::Client;

use crate::chart::ChartPeriod;
use crate::errors::Result;
use crate::preferences::{CoinSort, Currency};

use super::models::{CoinChartApiModel, CoinDetailApiModel, CoinsApiModel, SearchApiModel};
use super::provider::CoinDataProvider;

const BASE_URL: &str = "https://api.coinranking.com/v2";
const COINS_LIMIT: &str = "100";

/// Connection settings for the CoinRanking API.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: BASE_URL.to_string(),
            api_key: None,
        }
    }
}

pub struct CoinRankingProvider {
    client: Client,
    config: ProviderConfig,
}

impl CoinRankingProvider {
    pub fn new(config: ProviderConfig) -> Self {
        CoinRankingProvider {
            client: Client::new(),
            config,
        }
    }

    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        params: &[(String, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.config.base_url, path);

        let mut request = self.client.get(&url).query(params);
        if let Some(api_key) = &self.config.api_key {
            request = request.header("x-access-token", api_key);
        }

        let response = request.send().await?.error_for_status()?;
        let body = response.text().await?;
        let model = serde_json::from_str(&body)?;

        Ok(model)
    }
}

#[async_trait]
impl CoinDataProvider for CoinRankingProvider {
    async fn fetch_coins(
        &self,
        currency: Currency,
        coin_sort: CoinSort,
        coin_ids: Option<&[String]>,
    ) -> Result<CoinsApiModel> {
        let mut params = vec![
            (
                "referenceCurrencyUuid".to_string(),
                currency.to_currency_uuid().to_string(),
            ),
            ("orderBy".to_string(), coin_sort.to_order_by().to_string()),
            (
                "orderDirection".to_string(),
                coin_sort.to_order_direction().to_string(),
            ),
            ("timePeriod".to_string(), "24h".to_string()),
            ("limit".to_string(), COINS_LIMIT.to_string()),
        ];

        if let Some(coin_ids) = coin_ids {
            for coin_id in coin_ids {
                params.push(("uuids[]".to_string(), coin_id.clone()));
            }
        }

        self.fetch_json("/coins", &params).await
    }

    async fn fetch_coin_detail(
        &self,
        coin_id: &str,
        currency: Currency,
    ) -> Result<CoinDetailApiModel> {
        let params = vec![(
            "referenceCurrencyUuid".to_string(),
            currency.to_currency_uuid().to_string(),
        )];

        self.fetch_json(&format!("/coin/{}", coin_id), &params).await
    }

    async fn fetch_coin_chart(
        &self,
        coin_id: &str,
        chart_period: ChartPeriod,
        currency: Currency,
    ) -> Result<CoinChartApiModel> {
        let params = vec![
            (
                "referenceCurrencyUuid".to_string(),
                currency.to_currency_uuid().to_string(),
            ),
            ("timePeriod".to_string(), chart_period.as_str().to_string()),
        ];

        self.fetch_json(&format!("/coin/{}/history", coin_id), &params)
            .await
    }

    async fn search_coins(&self, query: &str) -> Result<SearchApiModel> {
        let params = vec![("query".to_string(), query.to_string())];

        self.fetch_json("/search-suggestions", &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider_for(server: &MockServer) -> CoinRankingProvider {
        CoinRankingProvider::new(ProviderConfig {
            base_url: server.uri(),
            api_key: None,
        })
    }

    #[tokio::test]
    async fn fetch_coins_parses_payload() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/coins"))
            .and(query_param("orderBy", "marketCap"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": {
                    "coins": [
                        {
                            "uuid": "Qwsogvtv82FCd",
                            "symbol": "BTC",
                            "name": "Bitcoin",
                            "iconUrl": "https://cdn.coinranking.com/bOabBYkcX/bitcoin_btc.svg",
                            "price": "29490.954785191607",
                            "change": "0.96",
                            "sparkline": ["29790.15", null, "29481.29"]
                        }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let model = provider_for(&server)
            .fetch_coins(Currency::Usd, CoinSort::MarketCap, None)
            .await
            .unwrap();

        let coins = model.data.unwrap().coins.unwrap();
        assert_eq!(coins.len(), 1);

        let coin = coins[0].clone().unwrap();
        assert_eq!(coin.uuid.as_deref(), Some("Qwsogvtv82FCd"));
        assert_eq!(coin.price.as_deref(), Some("29490.954785191607"));
        assert_eq!(coin.sparkline.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn fetch_coins_tolerates_missing_fields() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/coins"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "coins": [ { "uuid": "Qwsogvtv82FCd" } ] }
            })))
            .mount(&server)
            .await;

        let model = provider_for(&server)
            .fetch_coins(Currency::Usd, CoinSort::MarketCap, None)
            .await
            .unwrap();

        let coin = model.data.unwrap().coins.unwrap()[0].clone().unwrap();
        assert_eq!(coin.uuid.as_deref(), Some("Qwsogvtv82FCd"));
        assert!(coin.price.is_none());
        assert!(coin.sparkline.is_none());
    }

    #[tokio::test]
    async fn fetch_coin_chart_parses_nullable_history() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/coin/Qwsogvtv82FCd/history"))
            .and(query_param("timePeriod", "24h"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "change": "-0.97",
                    "history": [
                        { "price": "27000.44", "timestamp": 1690848000 },
                        { "price": null, "timestamp": 1690844400 }
                    ]
                }
            })))
            .mount(&server)
            .await;

        let model = provider_for(&server)
            .fetch_coin_chart("Qwsogvtv82FCd", ChartPeriod::Day, Currency::Usd)
            .await
            .unwrap();

        let data = model.data.unwrap();
        assert_eq!(data.change.as_deref(), Some("-0.97"));
        assert_eq!(data.history.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn non_2xx_status_returns_network_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/coins"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let result = provider_for(&server)
            .fetch_coins(Currency::Usd, CoinSort::MarketCap, None)
            .await;

        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn unparseable_body_returns_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/search-suggestions"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = provider_for(&server).search_coins("bitcoin").await;

        assert!(matches!(result, Err(Error::Parse(_))));
    }
}
