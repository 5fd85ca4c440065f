use serde::Deserialize;

// CoinRanking v2 payload shapes. Every field is optional: a single missing
// or null field must not invalidate an otherwise-valid response, so the
// domain mappers apply sentinel defaults per field instead.

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinsApiModel {
    pub data: Option<CoinsData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinsData {
    pub coins: Option<Vec<Option<CoinApiModel>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinApiModel {
    pub uuid: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub price: Option<String>,
    pub change: Option<String>,
    pub sparkline: Option<Vec<Option<String>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinDetailApiModel {
    pub data: Option<CoinDetailData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinDetailData {
    pub coin: Option<CoinDetailItemApiModel>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinDetailItemApiModel {
    pub uuid: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub price: Option<String>,
    pub market_cap: Option<String>,
    pub rank: Option<i64>,
    #[serde(rename = "24hVolume")]
    pub volume_24h: Option<String>,
    pub supply: Option<SupplyApiModel>,
    pub all_time_high: Option<AllTimeHighApiModel>,
    pub listed_at: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplyApiModel {
    pub circulating: Option<String>,
    pub total: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllTimeHighApiModel {
    pub price: Option<String>,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoinChartApiModel {
    pub data: Option<CoinChartData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinChartData {
    pub change: Option<String>,
    pub history: Option<Vec<Option<PastPriceApiModel>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PastPriceApiModel {
    pub price: Option<String>,
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchApiModel {
    pub data: Option<SearchData>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchData {
    pub coins: Option<Vec<Option<SearchCoinApiModel>>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCoinApiModel {
    pub uuid: Option<String>,
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub icon_url: Option<String>,
}
