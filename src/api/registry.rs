//! Renewable installation registry kept by URE.

use std::time::Duration;

use async_trait::async_trait;
use bon::bon;
use itertools::Itertools;
use reqwest::{Client, Url, header::CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::{
    api::{
        client,
        html,
        polish,
        source::{InstallationFilter, InstallationSource},
    },
    core::installation::{InstallationStatus, InstallationType, RenewableInstallation},
    error::{FetchError, ValidationError},
    prelude::*,
};

const REGISTRY_PAGE: [&str; 4] = [
    "pl",
    "oze",
    "rejestry-i-bazy-danych-oze",
    "5678,Rejestr-wytworcow-energii-w-mikroinstalacjach.html",
];

/// Number of leading cells every registry table row must carry.
const MIN_CELLS: usize = 8;

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
    fn url(&self, filter: &InstallationFilter) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(REGISTRY_PAGE);
        }
        let query = serde_qs::to_string(&RegistryQuery::from(filter)).map_err(|error| {
            FetchError::Malformed { url: url.to_string(), reason: error.to_string() }
        })?;
        if !query.is_empty() {
            url.set_query(Some(&query));
        }
        Ok(url)
    }
}

#[async_trait]
impl InstallationSource for Api {
    #[instrument(skip_all, fields(voivodeship = ?filter.voivodeship, types = ?filter.types))]
    async fn fetch_installations(
        &self,
        filter: &InstallationFilter,
    ) -> Result<Vec<RenewableInstallation>, FetchError> {
        let url = self.url(filter)?;
        info!(%url, "fetching…");
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|error| FetchError::from_reqwest(url.as_str(), error))?;
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.contains("json"));
        let body =
            response.text().await.map_err(|error| FetchError::from_reqwest(url.as_str(), error))?;
        let installations = if is_json {
            parse_json(&body).map_err(|error| FetchError::Malformed {
                url: url.to_string(),
                reason: error.to_string(),
            })?
        } else {
            parse_html(&body)
        };
        // The registry is not trusted to honour the query.
        let installations =
            installations.into_iter().filter(|installation| filter.matches(installation)).collect_vec();
        info!(n_installations = installations.len(), "fetched");
        Ok(installations)
    }
}

#[derive(Serialize)]
struct RegistryQuery {
    #[serde(rename = "wojewodztwo", skip_serializing_if = "Option::is_none")]
    voivodeship: Option<String>,

    /// Comma-separated installation types.
    #[serde(rename = "typ", skip_serializing_if = "Option::is_none")]
    types: Option<String>,
}

impl From<&InstallationFilter> for RegistryQuery {
    fn from(filter: &InstallationFilter) -> Self {
        Self {
            voivodeship: filter.voivodeship.clone(),
            types: (!filter.types.is_empty())
                .then(|| filter.types.iter().map(InstallationType::as_str).join(",")),
        }
    }
}

#[derive(Deserialize)]
struct InstallationsPayload {
    #[serde(default)]
    installations: Vec<serde_json::Value>,
}

/// Parse `{"installations": [...]}`, skipping the entries that do not validate.
fn parse_json(body: &str) -> Result<Vec<RenewableInstallation>, serde_json::Error> {
    let payload: InstallationsPayload = serde_json::from_str(body)?;
    Ok(payload
        .installations
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value(item) {
            Ok(installation) => Some(installation),
            Err(error) => {
                warn!(index, "skipped a malformed installation: {error}");
                None
            }
        })
        .collect())
}

/// Parse the registry table: `id | name | capacity | date | voivodeship | municipality | operator | status [| type]`.
fn parse_html(page: &str) -> Vec<RenewableInstallation> {
    html::table_rows(page)
        .into_iter()
        .enumerate()
        .filter_map(|(index, cells)| match parse_row(&cells) {
            Ok(installation) => Some(installation),
            Err(error) => {
                warn!(index, n_cells = cells.len(), "skipped a malformed row: {error}");
                None
            }
        })
        .collect()
}

fn parse_row(cells: &[String]) -> Result<RenewableInstallation, ValidationError> {
    if cells.len() < MIN_CELLS {
        return Err(ValidationError::MissingColumn("status"));
    }
    // The microinstallation register is photovoltaic unless told otherwise.
    let installation_type = match cells.get(MIN_CELLS).filter(|cell| !cell.is_empty()) {
        Some(cell) => cell.parse()?,
        None => InstallationType::SolarPv,
    };
    let status: InstallationStatus = cells[7].parse()?;
    RenewableInstallation::builder()
        .installation_id(cells[0].as_str())
        .name(cells[1].as_str())
        .installation_type(installation_type)
        .capacity(polish::parse_float(&cells[2])?)
        .commissioning_date(polish::parse_date(&cells[3])?)
        .voivodeship(cells[4].as_str())
        .municipality(cells[5].as_str())
        .operator(cells[6].as_str())
        .status(status)
        .build()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use mockito::{Matcher, Server};

    use super::*;

    const PATH: &str =
        "/pl/oze/rejestry-i-bazy-danych-oze/5678,Rejestr-wytworcow-energii-w-mikroinstalacjach.html";

    // language=HTML
    const REGISTRY_PAGE_HTML: &str = r"
        <table>
            <tr><th>ID</th><th>Nazwa</th><th>Moc</th><th>Data</th><th>Województwo</th><th>Gmina</th><th>Operator</th><th>Status</th></tr>
            <tr><td>MIK-1</td><td>PV Dom</td><td>9,8</td><td>2023-06-15</td><td>mazowieckie</td><td>Radom</td><td>PGE</td><td>aktywna</td></tr>
            <tr><td>MIK-2</td><td>Wiatrak</td><td>40,0</td><td>2023-07-01</td><td>mazowieckie</td><td>Płock</td><td>PGE</td><td>active</td><td>wind</td></tr>
            <tr><td>MIK-3</td><td>Zła data</td><td>5,0</td><td>15/06/2023</td><td>mazowieckie</td><td>Radom</td><td>PGE</td><td>active</td></tr>
            <tr><td>MIK-4</td><td>Za krótki</td><td>5,0</td></tr>
            <tr><td>MIK-5</td><td>Ujemna</td><td>-1,0</td><td>2023-06-15</td><td>mazowieckie</td><td>Radom</td><td>PGE</td><td>active</td></tr>
        </table>
    ";

    fn api(server: &Server) -> Result<Api> {
        Api::builder().base_url(Url::parse(&server.url())?).build()
    }

    #[test]
    fn parse_html_skips_malformed_rows() {
        let installations = parse_html(REGISTRY_PAGE_HTML);
        let ids: Vec<_> =
            installations.iter().map(RenewableInstallation::installation_id).collect();
        assert_eq!(ids, ["MIK-1", "MIK-2"]);
        assert_eq!(installations[0].installation_type(), InstallationType::SolarPv);
        assert_eq!(installations[0].status(), InstallationStatus::Active);
        assert_abs_diff_eq!(installations[0].capacity().0, 9.8);
        assert_eq!(installations[1].installation_type(), InstallationType::Wind);
        assert_eq!(installations[1].municipality(), "Płock");
    }

    #[test]
    fn parse_json_skips_malformed_entries() -> Result {
        // language=JSON
        const BODY: &str = r#"
            {
                "installations": [
                    {
                        "installation_id": "W-1",
                        "name": "Farma Wiatrowa",
                        "installation_type": "wind",
                        "capacity_kw": 2500.0,
                        "commissioning_date": "2022-03-01",
                        "voivodeship": "pomorskie",
                        "municipality": "Gdańsk",
                        "operator": "Energa"
                    },
                    {
                        "installation_id": "W-2",
                        "name": "Nieznany",
                        "installation_type": "fusion",
                        "capacity_kw": 1.0,
                        "commissioning_date": "2022-03-01",
                        "voivodeship": "pomorskie",
                        "municipality": "Gdańsk",
                        "operator": "Energa"
                    },
                    {"installation_id": "W-3"}
                ]
            }
        "#;
        let installations = parse_json(BODY)?;
        assert_eq!(installations.len(), 1);
        assert_eq!(installations[0].installation_id(), "W-1");
        Ok(())
    }

    #[test]
    fn query_ok() {
        let filter = InstallationFilter::builder()
            .voivodeship("mazowieckie")
            .types(InstallationType::SolarPv | InstallationType::Wind)
            .build();
        let query = RegistryQuery::from(&filter);
        assert_eq!(query.voivodeship.as_deref(), Some("mazowieckie"));
        assert_eq!(query.types.as_deref(), Some("solar_pv,wind"));
        assert!(RegistryQuery::from(&InstallationFilter::default()).types.is_none());
    }

    #[tokio::test]
    async fn fetch_installations_html_ok() -> Result {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", PATH)
            .match_query(Matcher::UrlEncoded("wojewodztwo".into(), "mazowieckie".into()))
            .with_status(200)
            .with_header("content-type", "text/html; charset=utf-8")
            .with_body(REGISTRY_PAGE_HTML)
            .create_async()
            .await;

        let filter = InstallationFilter::builder().voivodeship("mazowieckie").build();
        let installations = api(&server)?.fetch_installations(&filter).await?;

        mock.assert_async().await;
        assert_eq!(installations.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn fetch_installations_filters_locally() -> Result {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(REGISTRY_PAGE_HTML)
            .create_async()
            .await;

        let filter = InstallationFilter::builder().types(InstallationType::Wind.into()).build();
        let installations = api(&server)?.fetch_installations(&filter).await?;

        assert_eq!(installations.len(), 1);
        assert_eq!(installations[0].installation_id(), "MIK-2");
        Ok(())
    }

    #[tokio::test]
    async fn fetch_installations_malformed_json() -> Result {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[1, 2, 3")
            .create_async()
            .await;

        let result = api(&server)?.fetch_installations(&InstallationFilter::default()).await;
        assert!(matches!(result, Err(FetchError::Malformed { .. })));
        Ok(())
    }

    #[tokio::test]
    async fn fetch_installations_not_found() -> Result {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", PATH)
            .match_query(Matcher::Any)
            .with_status(404)
            .create_async()
            .await;

        let result = api(&server)?.fetch_installations(&InstallationFilter::default()).await;
        assert!(matches!(result, Err(FetchError::Status { status: 404, .. })));
        Ok(())
    }
}
