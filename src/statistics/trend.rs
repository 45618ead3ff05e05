use std::fmt::{Display, Formatter};

use bon::Builder;
use chrono::{DateTime, Local};
use itertools::{Itertools, MinMaxResult};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::core::{energy_type::EnergyType, period::Period, price::PriceObservation};

/// Relative change between the half means that still counts as stable.
const STABILITY_BAND: f64 = 0.05;

#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTrend {
    Increasing,
    Decreasing,
    #[default]
    Stable,
}

impl Display for PriceTrend {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Increasing => write!(f, "increasing"),
            Self::Decreasing => write!(f, "decreasing"),
            Self::Stable => write!(f, "stable"),
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Builder)]
pub struct PriceAnalysis {
    pub period: Period,
    pub energy_type: EnergyType,
    pub average_price: f64,
    pub price_trend: PriceTrend,

    /// Sample standard deviation of the prices.
    pub volatility: f64,

    pub min_price: Option<f64>,
    pub max_price: Option<f64>,

    #[builder(default = Local::now())]
    pub analysis_date: DateTime<Local>,
}

/// Analyse the prices in the order given: the caller is responsible for sorting.
pub fn analyze_trend(
    period: Period,
    energy_type: EnergyType,
    observations: &[PriceObservation],
) -> PriceAnalysis {
    let prices =
        observations.iter().filter_map(|observation| observation.price().to_f64()).collect_vec();
    let Some(average_price) = mean(&prices) else {
        return PriceAnalysis::builder()
            .period(period)
            .energy_type(energy_type)
            .average_price(0.0)
            .price_trend(PriceTrend::Stable)
            .volatility(0.0)
            .build();
    };
    let (min_price, max_price) = match prices.iter().copied().minmax_by(f64::total_cmp) {
        MinMaxResult::NoElements => (None, None),
        MinMaxResult::OneElement(price) => (Some(price), Some(price)),
        MinMaxResult::MinMax(min, max) => (Some(min), Some(max)),
    };
    PriceAnalysis::builder()
        .period(period)
        .energy_type(energy_type)
        .average_price(average_price)
        .price_trend(classify_trend(&prices))
        .volatility(sample_standard_deviation(&prices, average_price))
        .maybe_min_price(min_price)
        .maybe_max_price(max_price)
        .build()
}

/// Compare the mean of the second half against the first one.
///
/// The first half takes `n / 2` prices, the second half gets the rest.
#[must_use]
pub fn classify_trend(prices: &[f64]) -> PriceTrend {
    if prices.len() < 2 {
        return PriceTrend::Stable;
    }
    let (first_half, second_half) = prices.split_at(prices.len() / 2);
    let (Some(first_mean), Some(second_mean)) = (mean(first_half), mean(second_half)) else {
        return PriceTrend::Stable;
    };
    if second_mean > first_mean * (1.0 + STABILITY_BAND) {
        PriceTrend::Increasing
    } else if second_mean < first_mean * (1.0 - STABILITY_BAND) {
        PriceTrend::Decreasing
    } else {
        PriceTrend::Stable
    }
}

#[allow(clippy::cast_precision_loss)]
fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}

/// Bessel-corrected, zero for fewer than two values.
#[allow(clippy::cast_precision_loss)]
fn sample_standard_deviation(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let sum_of_squares = values.iter().map(|value| (value - mean).powi(2)).sum::<f64>();
    (sum_of_squares / (values.len() - 1) as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::*;

    fn january() -> Period {
        Period::try_new(
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
        )
        .unwrap()
    }

    fn observations(prices: &[i64]) -> Vec<PriceObservation> {
        prices
            .iter()
            .enumerate()
            .map(|(day, price)| {
                PriceObservation::builder()
                    .date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap() + chrono::Days::new(day as u64))
                    .price(Decimal::from(*price))
                    .energy_type(EnergyType::Electricity)
                    .build()
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn empty() {
        let analysis = analyze_trend(january(), EnergyType::Electricity, &[]);
        assert_abs_diff_eq!(analysis.average_price, 0.0);
        assert_eq!(analysis.price_trend, PriceTrend::Stable);
        assert_abs_diff_eq!(analysis.volatility, 0.0);
        assert_eq!(analysis.min_price, None);
        assert_eq!(analysis.max_price, None);
        assert_eq!(analysis.period, january());
    }

    #[test]
    fn single_observation() {
        let analysis = analyze_trend(january(), EnergyType::Gas, &observations(&[250]));
        assert_abs_diff_eq!(analysis.average_price, 250.0);
        assert_abs_diff_eq!(analysis.volatility, 0.0);
        assert_eq!(analysis.price_trend, PriceTrend::Stable);
        assert_eq!(analysis.min_price, Some(250.0));
        assert_eq!(analysis.max_price, Some(250.0));
        assert_eq!(analysis.energy_type, EnergyType::Gas);
    }

    #[test]
    fn increasing() {
        let analysis = analyze_trend(
            january(),
            EnergyType::Electricity,
            &observations(&[100, 100, 100, 200, 200, 200]),
        );
        assert_eq!(analysis.price_trend, PriceTrend::Increasing);
        assert_abs_diff_eq!(analysis.average_price, 150.0);
        assert_abs_diff_eq!(analysis.volatility, 3000.0_f64.sqrt(), epsilon = 1e-9);
        assert_eq!(analysis.min_price, Some(100.0));
        assert_eq!(analysis.max_price, Some(200.0));
    }

    #[test]
    fn decreasing() {
        let analysis =
            analyze_trend(january(), EnergyType::Heat, &observations(&[200, 200, 100, 100]));
        assert_eq!(analysis.price_trend, PriceTrend::Decreasing);
    }

    #[test]
    fn within_band_is_stable() {
        assert_eq!(classify_trend(&[100.0, 104.0]), PriceTrend::Stable);
        assert_eq!(classify_trend(&[100.0, 96.0]), PriceTrend::Stable);
        assert_eq!(classify_trend(&[100.0, 106.0]), PriceTrend::Increasing);
        assert_eq!(classify_trend(&[100.0, 94.0]), PriceTrend::Decreasing);
    }

    #[test]
    fn odd_count_puts_the_middle_into_the_second_half() {
        // First half is `[100]`, the second half is `[100, 400]` with the mean of 250:
        assert_eq!(classify_trend(&[100.0, 100.0, 400.0]), PriceTrend::Increasing);
    }

    #[test]
    fn input_order_is_respected() {
        assert_eq!(classify_trend(&[200.0, 100.0]), PriceTrend::Decreasing);
        assert_eq!(classify_trend(&[100.0, 200.0]), PriceTrend::Increasing);
    }

    #[test]
    fn all_zero_prices_are_stable() {
        assert_eq!(classify_trend(&[0.0, 0.0, 0.0]), PriceTrend::Stable);
    }
}
