//! [URE](https://www.ure.gov.pl) price and tariff pages.

use std::time::Duration;

use async_trait::async_trait;
use bon::bon;
use reqwest::{Client, Url};

use crate::{
    api::{client, html, polish, source::PriceSource},
    core::{
        energy_type::EnergyType,
        period::Period,
        price::PriceObservation,
        tariff::{RawTariff, TariffStructure, TariffSummary},
    },
    error::{FetchError, ValidationError},
    prelude::*,
};

const SOURCE: &str = "URE";

/// Electricity tariffs listed when asking for the catalogue.
const ELECTRICITY_TARIFFS: [(&str, &str); 3] = [
    ("G11", "Taryfa G11 - gospodarstwa domowe"),
    ("G12", "Taryfa G12 - gospodarstwa domowe dwustrefowa"),
    ("C11", "Taryfa C11 - małe firmy"),
];

/// Owns its HTTP session, which is released when the adapter is dropped.
pub struct Api {
    client: Client,
    base_url: Url,
}

#[bon]
impl Api {
    #[builder]
    pub fn new(
        base_url: Url,
        #[builder(default = client::DEFAULT_TIMEOUT)] timeout: Duration,
    ) -> Result<Self> {
        ensure!(!base_url.cannot_be_a_base(), "`{base_url}` cannot be used as a base URL");
        Ok(Self { client: client::try_new(timeout)?, base_url })
    }
}

impl Api {
    const fn price_page(energy_type: EnergyType) -> [&'static str; 3] {
        match energy_type {
            EnergyType::Electricity => ["pl", "energia-elektryczna", "ceny-i-taryfyz"],
            EnergyType::Gas => ["pl", "gaz-ziemny", "ceny-i-taryfyz"],
            EnergyType::Heat => ["pl", "cieplownictwo", "ceny-i-taryfyz"],
        }
    }

    fn url<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        self.client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|error| FetchError::from_reqwest(url.as_str(), error))?
            .text()
            .await
            .map_err(|error| FetchError::from_reqwest(url.as_str(), error))
    }
}

#[async_trait]
impl PriceSource for Api {
    #[instrument(skip_all, fields(period = %period, energy_type = %energy_type))]
    async fn fetch_price_data(
        &self,
        period: Period,
        energy_type: EnergyType,
    ) -> Result<Vec<PriceObservation>, FetchError> {
        let url = self.url(Self::price_page(energy_type));
        info!(%url, "fetching…");
        let page = self.get_text(url).await?;
        let observations = parse_price_rows(&page, energy_type)
            .into_iter()
            .filter(|observation| period.contains(observation.date()))
            .collect::<Vec<_>>();
        info!(n_observations = observations.len(), "fetched");
        Ok(observations)
    }

    #[instrument(skip_all, fields(tariff_id = tariff_id))]
    async fn fetch_tariff(&self, tariff_id: &str) -> Result<TariffStructure, FetchError> {
        let url = self.url(["api", "tariffs", tariff_id]);
        info!(%url, "fetching…");
        let body = self.get_text(url.clone()).await?;
        let raw: RawTariff = serde_json::from_str(&body).map_err(|error| {
            FetchError::Malformed { url: url.to_string(), reason: error.to_string() }
        })?;
        Ok(TariffStructure::try_from(raw)?)
    }

    async fn available_tariffs(
        &self,
        energy_type: EnergyType,
    ) -> Result<Vec<TariffSummary>, FetchError> {
        Ok(match energy_type {
            EnergyType::Electricity => ELECTRICITY_TARIFFS
                .iter()
                .map(|(tariff_id, name)| TariffSummary {
                    tariff_id: (*tariff_id).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
            EnergyType::Gas | EnergyType::Heat => Vec::new(),
        })
    }
}

/// Read `date | price | unit` rows, skipping the ones that do not parse.
fn parse_price_rows(page: &str, energy_type: EnergyType) -> Vec<PriceObservation> {
    html::table_rows(page)
        .into_iter()
        .enumerate()
        .filter_map(|(index, cells)| match parse_price_row(&cells, energy_type) {
            Ok(observation) => Some(observation),
            Err(error) => {
                warn!(index, ?cells, "skipped a malformed row: {error}");
                None
            }
        })
        .collect()
}

fn parse_price_row(
    cells: &[String],
    energy_type: EnergyType,
) -> Result<PriceObservation, ValidationError> {
    let date = cells.first().ok_or(ValidationError::MissingColumn("date"))?;
    let price = cells.get(1).ok_or(ValidationError::MissingColumn("price"))?;
    PriceObservation::builder()
        .date(polish::parse_date(date)?)
        .price(polish::parse_decimal(price)?)
        .energy_type(energy_type)
        .maybe_unit(cells.get(2).filter(|unit| !unit.is_empty()).cloned())
        .source(SOURCE)
        .build()
}
