use async_trait::async_trait;
use bon::Builder;
use enumset::EnumSet;

use crate::{
    core::{
        energy_type::EnergyType,
        installation::{InstallationType, RenewableInstallation},
        period::Period,
        price::PriceObservation,
        tariff::{TariffStructure, TariffSummary},
    },
    error::FetchError,
};

/// Where the price observations and tariffs come from.
///
/// Implementations skip malformed rows instead of failing the whole batch,
/// and never retry on behalf of the caller.
#[async_trait]
pub trait PriceSource: Sync {
    /// Observations dated within the inclusive period.
    async fn fetch_price_data(
        &self,
        period: Period,
        energy_type: EnergyType,
    ) -> Result<Vec<PriceObservation>, FetchError>;

    async fn fetch_tariff(&self, tariff_id: &str) -> Result<TariffStructure, FetchError>;

    async fn available_tariffs(
        &self,
        energy_type: EnergyType,
    ) -> Result<Vec<TariffSummary>, FetchError>;
}

#[async_trait]
pub trait InstallationSource: Sync {
    async fn fetch_installations(
        &self,
        filter: &InstallationFilter,
    ) -> Result<Vec<RenewableInstallation>, FetchError>;
}

/// Registry query. An empty type set means «any type».
#[must_use]
#[derive(Clone, Debug, Default, PartialEq, Eq, Builder)]
pub struct InstallationFilter {
    #[builder(into)]
    pub voivodeship: Option<String>,

    #[builder(default)]
    pub types: EnumSet<InstallationType>,
}

impl InstallationFilter {
    #[must_use]
    pub fn matches(&self, installation: &RenewableInstallation) -> bool {
        self.voivodeship.as_deref().is_none_or(|voivodeship| {
            installation.voivodeship().eq_ignore_ascii_case(voivodeship)
        }) && (self.types.is_empty() || self.types.contains(installation.installation_type()))
    }
}
