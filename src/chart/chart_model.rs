use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Percentage, Price};
use crate::remote::models::CoinChartApiModel;

/// Selectable time window for historical chart data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartPeriod {
    Day,
    Week,
    Month,
    ThreeMonth,
    Year,
    FiveYear,
}

impl ChartPeriod {
    pub fn as_str(self) -> &'static str {
        match self {
            ChartPeriod::Day => "24h",
            ChartPeriod::Week => "7d",
            ChartPeriod::Month => "30d",
            ChartPeriod::ThreeMonth => "3m",
            ChartPeriod::Year => "1y",
            ChartPeriod::FiveYear => "5y",
        }
    }
}

impl Default for ChartPeriod {
    fn default() -> Self {
        ChartPeriod::Day
    }
}

/// Derived historical chart for one coin over one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinChart {
    pub prices: Vec<Decimal>,
    pub min_price: Price,
    pub max_price: Price,
    pub period_price_change_percentage: Percentage,
}

impl CoinChart {
    /// Derives the chart from the raw payload.
    ///
    /// Null or unparseable price points are filtered out before min/max are
    /// computed; a zeroed-in default would corrupt the minimum. An empty
    /// filtered sequence yields zero min and max.
    pub fn from_api_model(api_model: CoinChartApiModel) -> CoinChart {
        let data = api_model.data.unwrap_or_default();

        let prices: Vec<Decimal> = data
            .history
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .filter_map(|past_price| {
                past_price
                    .price
                    .and_then(|value| Decimal::from_str(&value).ok())
            })
            .collect();

        let min_price = prices
            .iter()
            .min()
            .copied()
            .map(Price::from_decimal)
            .unwrap_or_else(Price::zero);
        let max_price = prices
            .iter()
            .max()
            .copied()
            .map(Price::from_decimal)
            .unwrap_or_else(Price::zero);

        CoinChart {
            prices,
            min_price,
            max_price,
            period_price_change_percentage: Percentage::new(data.change.as_deref()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::models::{CoinChartData, PastPriceApiModel};
    use rust_decimal_macros::dec;

    fn past_price(price: Option<&str>) -> Option<PastPriceApiModel> {
        Some(PastPriceApiModel {
            price: price.map(str::to_string),
            timestamp: None,
        })
    }

    #[test]
    fn null_prices_are_filtered_before_min_max() {
        let api_model = CoinChartApiModel {
            data: Some(CoinChartData {
                change: Some("-0.97".to_string()),
                history: Some(vec![
                    past_price(Some("27000.44")),
                    past_price(None),
                    past_price(Some("25000.89")),
                    past_price(None),
                    past_price(Some("30000.47")),
                    past_price(Some("20000.20")),
                ]),
            }),
        };

        let chart = CoinChart::from_api_model(api_model);

        assert_eq!(
            chart.prices,
            vec![
                dec!(27000.44),
                dec!(25000.89),
                dec!(30000.47),
                dec!(20000.20)
            ]
        );
        assert_eq!(chart.min_price, Price::new(Some("20000.20")));
        assert_eq!(chart.max_price, Price::new(Some("30000.47")));
        assert_eq!(
            chart.period_price_change_percentage,
            Percentage::new(Some("-0.97"))
        );
    }

    #[test]
    fn empty_history_defaults_to_zero_values() {
        let api_model = CoinChartApiModel {
            data: Some(CoinChartData {
                change: None,
                history: Some(vec![past_price(None), None]),
            }),
        };

        let chart = CoinChart::from_api_model(api_model);

        assert!(chart.prices.is_empty());
        assert_eq!(chart.min_price, Price::zero());
        assert_eq!(chart.max_price, Price::zero());
        assert_eq!(chart.period_price_change_percentage, Percentage::zero());
    }

    #[test]
    fn missing_data_envelope_defaults_to_zero_values() {
        let chart = CoinChart::from_api_model(CoinChartApiModel { data: None });

        assert!(chart.prices.is_empty());
        assert_eq!(chart.min_price, Price::zero());
        assert_eq!(chart.max_price, Price::zero());
    }
}
