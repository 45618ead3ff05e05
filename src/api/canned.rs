//! In-memory source serving prepared records.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bon::Builder;

use crate::{
    api::source::{InstallationFilter, InstallationSource, PriceSource},
    core::{
        energy_type::EnergyType,
        installation::RenewableInstallation,
        period::Period,
        price::PriceObservation,
        tariff::{TariffStructure, TariffSummary},
    },
    error::FetchError,
};

#[must_use]
#[derive(Builder)]
pub struct Source {
    #[builder(default)]
    observations: Vec<PriceObservation>,

    #[builder(default)]
    tariffs: Vec<TariffStructure>,

    #[builder(default)]
    installations: Vec<RenewableInstallation>,

    #[builder(skip)]
    n_price_fetches: AtomicUsize,
}

impl Source {
    /// How many times the price data has been requested so far.
    pub fn n_price_fetches(&self) -> usize {
        self.n_price_fetches.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl PriceSource for Source {
    async fn fetch_price_data(
        &self,
        period: Period,
        energy_type: EnergyType,
    ) -> Result<Vec<PriceObservation>, FetchError> {
        self.n_price_fetches.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .observations
            .iter()
            .filter(|observation| {
                observation.energy_type() == energy_type && period.contains(observation.date())
            })
            .cloned()
            .collect())
    }

    async fn fetch_tariff(&self, tariff_id: &str) -> Result<TariffStructure, FetchError> {
        self.tariffs
            .iter()
            .find(|tariff| tariff.tariff_id() == tariff_id)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(tariff_id.to_string()))
    }

    async fn available_tariffs(
        &self,
        energy_type: EnergyType,
    ) -> Result<Vec<TariffSummary>, FetchError> {
        Ok(self
            .tariffs
            .iter()
            .filter(|tariff| tariff.energy_type() == energy_type)
            .map(|tariff| TariffSummary {
                tariff_id: tariff.tariff_id().to_string(),
                name: tariff.name().to_string(),
            })
            .collect())
    }
}

#[async_trait]
impl InstallationSource for Source {
    async fn fetch_installations(
        &self,
        filter: &InstallationFilter,
    ) -> Result<Vec<RenewableInstallation>, FetchError> {
        Ok(self
            .installations
            .iter()
            .filter(|installation| filter.matches(installation))
            .cloned()
            .collect())
    }
}
