//! Regional views over a [`InstallationSource`].

use std::collections::BTreeMap;

use enumset::EnumSet;
use itertools::Itertools;

use crate::{
    api::source::{InstallationFilter, InstallationSource},
    core::{
        installation::{GeospatialPoint, InstallationType, RenewableInstallation},
        period::Period,
        region::{MunicipalitySort, MunicipalityStatistics, RegionalData},
        voivodeship,
    },
    error::FetchError,
    prelude::*,
    statistics::{
        growth::{CapacityGrowthAnalysis, analyze_capacity_growth},
        region::{aggregate_by_region, top_municipalities},
        summary::{Summary, summarize},
    },
};

/// Every call goes to the source: the mapper keeps no state of its own.
pub struct InstallationMapper<S> {
    source: S,
}

impl<S: InstallationSource> InstallationMapper<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// An empty type set means «any type».
    #[instrument(skip_all, fields(voivodeship = ?voivodeship, types = ?types))]
    pub async fn installations_by_region(
        &self,
        voivodeship: Option<&str>,
        types: EnumSet<InstallationType>,
    ) -> Result<Vec<RenewableInstallation>, FetchError> {
        if let Some(name) = voivodeship
            && !voivodeship::is_known(name)
        {
            warn!(voivodeship = name, "unknown voivodeship, the result will likely be empty");
        }
        let filter =
            InstallationFilter::builder().maybe_voivodeship(voivodeship).types(types).build();
        self.source.fetch_installations(&filter).await
    }

    /// Municipality names are compared case-insensitively.
    #[instrument(skip_all, fields(municipality = municipality, voivodeship = voivodeship))]
    pub async fn installations_by_municipality(
        &self,
        municipality: &str,
        voivodeship: &str,
    ) -> Result<Vec<RenewableInstallation>, FetchError> {
        let municipality = municipality.trim().to_lowercase();
        Ok(self
            .installations_by_region(Some(voivodeship), EnumSet::empty())
            .await?
            .into_iter()
            .filter(|installation| installation.municipality().to_lowercase() == municipality)
            .collect())
    }

    #[instrument(skip_all)]
    pub async fn regional_statistics(&self) -> Result<BTreeMap<String, RegionalData>, FetchError> {
        let regions = aggregate_by_region(&self.all().await?);
        info!(n_regions = regions.len(), "aggregated");
        Ok(regions)
    }

    #[instrument(skip_all, fields(limit = limit, sort_by = ?sort_by))]
    pub async fn top_municipalities(
        &self,
        limit: usize,
        sort_by: MunicipalitySort,
    ) -> Result<Vec<MunicipalityStatistics>, FetchError> {
        Ok(top_municipalities(&self.all().await?, limit, sort_by))
    }

    #[instrument(skip_all)]
    pub async fn summary_report(&self) -> Result<Summary, FetchError> {
        Ok(summarize(&self.all().await?))
    }

    #[instrument(skip_all, fields(period = %period))]
    pub async fn capacity_growth(
        &self,
        period: Period,
    ) -> Result<CapacityGrowthAnalysis, FetchError> {
        Ok(analyze_capacity_growth(&self.all().await?, period))
    }

    /// Installations with valid coordinates, the rest is left out.
    #[instrument(skip_all, fields(types = ?types))]
    pub async fn geospatial_points(
        &self,
        types: EnumSet<InstallationType>,
    ) -> Result<Vec<GeospatialPoint>, FetchError> {
        let installations = self.installations_by_region(None, types).await?;
        let points = installations
            .iter()
            .filter_map(|installation| GeospatialPoint::try_from(installation).ok())
            .collect_vec();
        debug!(n_installations = installations.len(), n_points = points.len(), "located");
        Ok(points)
    }

    async fn all(&self) -> Result<Vec<RenewableInstallation>, FetchError> {
        self.source.fetch_installations(&InstallationFilter::default()).await
    }
}
