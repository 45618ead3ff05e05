//! Price and tariff analysis on top of a [`PriceSource`].

use std::{
    collections::{BTreeMap, HashMap},
    sync::Mutex,
};

use rust_decimal::Decimal;

use crate::{
    api::source::PriceSource,
    core::{
        energy_type::EnergyType,
        period::Period,
        price::PriceObservation,
        tariff::TariffStructure,
    },
    error::FetchError,
    prelude::*,
    quantity::energy::KilowattHours,
    statistics::{
        tariff::rank_tariffs,
        trend::{PriceAnalysis, analyze_trend},
    },
};

pub struct PriceAnalyzer<S> {
    source: S,

    /// Recent analyses. Best effort: a poisoned lock simply disables it.
    memo: Mutex<HashMap<(Period, EnergyType), PriceAnalysis>>,
}

impl<S: PriceSource> PriceAnalyzer<S> {
    pub fn new(source: S) -> Self {
        Self { source, memo: Mutex::default() }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch the observations within the period and analyse them in chronological order.
    #[instrument(skip_all, fields(period = %period, energy_type = %energy_type))]
    pub async fn analyze_price_trends(
        &self,
        period: Period,
        energy_type: EnergyType,
    ) -> Result<PriceAnalysis, FetchError> {
        if let Some(analysis) = self.recall(period, energy_type) {
            debug!("memo hit");
            return Ok(analysis);
        }
        let observations = self.price_history(period, energy_type).await?;
        let analysis = analyze_trend(period, energy_type, &observations);
        info!(
            n_observations = observations.len(),
            average_price = analysis.average_price,
            trend = %analysis.price_trend,
            "analysed"
        );
        if let Ok(mut memo) = self.memo.lock() {
            memo.insert((period, energy_type), analysis.clone());
        }
        Ok(analysis)
    }

    /// Observations within the period, oldest first.
    pub async fn price_history(
        &self,
        period: Period,
        energy_type: EnergyType,
    ) -> Result<Vec<PriceObservation>, FetchError> {
        let mut observations = self.source.fetch_price_data(period, energy_type).await?;
        observations.sort_by_key(PriceObservation::date);
        Ok(observations)
    }

    /// Look the tariffs up one by one, keyed by their IDs.
    #[instrument(skip_all, fields(n_tariffs = tariff_ids.len()))]
    pub async fn compare_tariffs(
        &self,
        tariff_ids: &[String],
    ) -> Result<BTreeMap<String, TariffStructure>, FetchError> {
        let mut tariffs = BTreeMap::new();
        for tariff_id in tariff_ids {
            let tariff = self.source.fetch_tariff(tariff_id).await?;
            tariffs.insert(tariff_id.clone(), tariff);
        }
        Ok(tariffs)
    }

    /// Tariffs in the requested order of IDs, ranked by the total cost at the consumption.
    #[instrument(skip_all, fields(n_tariffs = tariff_ids.len(), consumption = %consumption))]
    pub async fn rank_tariffs(
        &self,
        tariff_ids: &[String],
        consumption: KilowattHours,
    ) -> Result<Vec<(TariffStructure, Decimal)>, FetchError> {
        let mut tariffs = Vec::with_capacity(tariff_ids.len());
        for tariff_id in tariff_ids {
            tariffs.push(self.source.fetch_tariff(tariff_id).await?);
        }
        Ok(rank_tariffs(tariffs, consumption)?)
    }

    fn recall(&self, period: Period, energy_type: EnergyType) -> Option<PriceAnalysis> {
        self.memo.lock().ok()?.get(&(period, energy_type)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{api::canned, error::ValidationError, statistics::trend::PriceTrend};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn observation(day: u32, price: Decimal, energy_type: EnergyType) -> PriceObservation {
        PriceObservation::builder()
            .date(date(day))
            .price(price)
            .energy_type(energy_type)
            .build()
            .unwrap()
    }

    fn tariff(id: &str, base_price: Decimal, energy_price: Decimal) -> TariffStructure {
        TariffStructure::builder()
            .tariff_id(id)
            .name(format!("Taryfa {id}"))
            .base_price(base_price)
            .energy_price(energy_price)
            .network_fee(dec!(25))
            .build()
            .unwrap()
    }

    fn analyzer() -> PriceAnalyzer<canned::Source> {
        PriceAnalyzer::new(
            canned::Source::builder()
                .observations(vec![
                    // Deliberately out of order.
                    observation(4, dec!(200), EnergyType::Electricity),
                    observation(1, dec!(100), EnergyType::Electricity),
                    observation(3, dec!(200), EnergyType::Electricity),
                    observation(2, dec!(100), EnergyType::Electricity),
                    observation(2, dec!(999), EnergyType::Gas),
                ])
                .tariffs(vec![
                    tariff("G11", dec!(45), dec!(0.65)),
                    tariff("G12", dec!(55), dec!(0.55)),
                ])
                .build(),
        )
    }

    #[tokio::test]
    async fn analyze_price_trends_sorts_by_date() -> Result {
        let period = Period::try_new(date(1), date(31))?;
        let analysis = analyzer().analyze_price_trends(period, EnergyType::Electricity).await?;
        assert_eq!(analysis.price_trend, PriceTrend::Increasing);
        assert_abs_diff_eq!(analysis.average_price, 150.0);
        assert_eq!(analysis.max_price, Some(200.0));
        Ok(())
    }

    #[tokio::test]
    async fn analyze_price_trends_is_memoized() -> Result {
        let analyzer = analyzer();
        let period = Period::try_new(date(1), date(31))?;
        let first = analyzer.analyze_price_trends(period, EnergyType::Electricity).await?;
        let second = analyzer.analyze_price_trends(period, EnergyType::Electricity).await?;
        assert_eq!(first, second);
        assert_eq!(analyzer.source().n_price_fetches(), 1);

        let _ = analyzer.analyze_price_trends(period, EnergyType::Gas).await?;
        assert_eq!(analyzer.source().n_price_fetches(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn price_history_is_chronological() -> Result {
        let analyzer = analyzer();
        let period = Period::try_new(date(1), date(31))?;
        let history = analyzer.price_history(period, EnergyType::Electricity).await?;
        let days: Vec<_> = history.iter().map(PriceObservation::date).collect();
        assert_eq!(days, [date(1), date(2), date(3), date(4)]);
        assert_eq!(analyzer.source().n_price_fetches(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn analyze_price_trends_without_data() -> Result {
        let period = Period::single_day(date(31));
        let analysis = analyzer().analyze_price_trends(period, EnergyType::Heat).await?;
        assert_eq!(analysis.price_trend, PriceTrend::Stable);
        assert_abs_diff_eq!(analysis.average_price, 0.0);
        assert_eq!(analysis.min_price, None);
        Ok(())
    }

    #[tokio::test]
    async fn compare_tariffs_ok() -> Result {
        let tariffs =
            analyzer().compare_tariffs(&["G12".to_string(), "G11".to_string()]).await?;
        assert_eq!(tariffs.len(), 2);
        assert_eq!(tariffs["G11"].base_price(), dec!(45));
        Ok(())
    }

    #[tokio::test]
    async fn compare_tariffs_unknown() {
        let result = analyzer().compare_tariffs(&["X99".to_string()]).await;
        assert!(matches!(result, Err(FetchError::NotFound(id)) if id == "X99"));
    }

    #[tokio::test]
    async fn rank_tariffs_ok() -> Result {
        // G11: 45 + 0.65 × 1000 + 25 = 720, G12: 55 + 0.55 × 1000 + 25 = 630.
        let ranked = analyzer()
            .rank_tariffs(&["G11".to_string(), "G12".to_string()], KilowattHours::try_new(dec!(1000))?)
            .await?;
        assert_eq!(ranked[0].0.tariff_id(), "G12");
        assert_eq!(ranked[0].1, dec!(630));
        assert_eq!(ranked[1].1, dec!(720));
        Ok(())
    }

    #[tokio::test]
    async fn rank_tariffs_overflow() -> Result {
        let analyzer = PriceAnalyzer::new(
            canned::Source::builder().tariffs(vec![tariff("C21", dec!(45), dec!(2))]).build(),
        );
        let result =
            analyzer.rank_tariffs(&["C21".to_string()], KilowattHours::try_new(Decimal::MAX)?).await;
        assert!(matches!(
            result,
            Err(FetchError::Invalid(ValidationError::CostOverflow(id))) if id == "C21"
        ));
        Ok(())
    }
}
