use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use bon::bon;
use chrono::NaiveDate;
use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, quantity::power::Kilowatts};

#[derive(
    Debug,
    Hash,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    enumset::EnumSetType,
)]
#[serde(rename_all = "snake_case")]
pub enum InstallationType {
    SolarPv,
    Wind,
    Biogas,
    Biomass,
    Hydro,
    Other,
}

impl InstallationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SolarPv => "solar_pv",
            Self::Wind => "wind",
            Self::Biogas => "biogas",
            Self::Biomass => "biomass",
            Self::Hydro => "hydro",
            Self::Other => "other",
        }
    }
}

impl Display for InstallationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InstallationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "solar_pv" => Ok(Self::SolarPv),
            "wind" => Ok(Self::Wind),
            "biogas" => Ok(Self::Biogas),
            "biomass" => Ok(Self::Biomass),
            "hydro" => Ok(Self::Hydro),
            "other" => Ok(Self::Other),
            _ => Err(ValidationError::UnknownInstallationType(s.to_string())),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstallationStatus {
    #[default]
    Active,
    Inactive,
    Decommissioned,
}

impl FromStr for InstallationStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "aktywna" => Ok(Self::Active),
            "inactive" | "nieaktywna" => Ok(Self::Inactive),
            "decommissioned" | "wykreślona" => Ok(Self::Decommissioned),
            _ => Err(ValidationError::UnknownInstallationStatus(s.to_string())),
        }
    }
}

/// Registered renewable generation unit.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawInstallation")]
pub struct RenewableInstallation {
    installation_id: String,
    name: String,
    installation_type: InstallationType,
    capacity: Kilowatts,
    commissioning_date: NaiveDate,
    voivodeship: String,
    municipality: String,
    operator: String,
    technology: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    status: InstallationStatus,
}

#[bon]
impl RenewableInstallation {
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        #[builder(into)] installation_id: String,
        #[builder(into)] name: String,
        installation_type: InstallationType,
        #[builder(into)] capacity: Kilowatts,
        commissioning_date: NaiveDate,
        #[builder(into)] voivodeship: String,
        #[builder(into)] municipality: String,
        #[builder(into)] operator: String,
        #[builder(into)] technology: Option<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
        #[builder(default)] status: InstallationStatus,
    ) -> Result<Self, ValidationError> {
        if installation_id.trim().is_empty() {
            return Err(ValidationError::EmptyInstallationId);
        }
        if capacity.is_negative() || capacity.0.is_nan() {
            return Err(ValidationError::NegativeCapacity(capacity.0));
        }
        Ok(Self {
            installation_id,
            name,
            installation_type,
            capacity,
            commissioning_date,
            voivodeship,
            municipality,
            operator,
            technology,
            latitude,
            longitude,
            status,
        })
    }
}

impl RenewableInstallation {
    #[must_use]
    pub fn installation_id(&self) -> &str {
        &self.installation_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn installation_type(&self) -> InstallationType {
        self.installation_type
    }

    #[must_use]
    pub const fn capacity(&self) -> Kilowatts {
        self.capacity
    }

    #[must_use]
    pub const fn commissioning_date(&self) -> NaiveDate {
        self.commissioning_date
    }

    #[must_use]
    pub fn voivodeship(&self) -> &str {
        &self.voivodeship
    }

    #[must_use]
    pub fn municipality(&self) -> &str {
        &self.municipality
    }

    #[must_use]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    #[must_use]
    pub fn technology(&self) -> Option<&str> {
        self.technology.as_deref()
    }

    #[must_use]
    pub const fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => Some((latitude, longitude)),
            _ => None,
        }
    }

    #[must_use]
    pub const fn status(&self) -> InstallationStatus {
        self.status
    }
}

/// Registry row before validation.
#[derive(Deserialize)]
pub struct RawInstallation {
    pub installation_id: String,
    pub name: String,
    pub installation_type: String,

    /// JSON number or numeric string.
    pub capacity_kw: Decimal,

    pub commissioning_date: NaiveDate,
    pub voivodeship: String,
    pub municipality: String,
    pub operator: String,

    #[serde(default)]
    pub technology: Option<String>,

    #[serde(default)]
    pub latitude: Option<f64>,

    #[serde(default)]
    pub longitude: Option<f64>,

    #[serde(default)]
    pub status: Option<String>,
}

impl TryFrom<RawInstallation> for RenewableInstallation {
    type Error = ValidationError;

    fn try_from(raw: RawInstallation) -> Result<Self, Self::Error> {
        let status = raw.status.as_deref().map(InstallationStatus::from_str).transpose()?;
        let capacity = raw
            .capacity_kw
            .to_f64()
            .ok_or_else(|| ValidationError::InvalidDecimal(raw.capacity_kw.to_string()))?;
        Self::builder()
            .installation_id(raw.installation_id)
            .name(raw.name)
            .installation_type(InstallationType::from_str(&raw.installation_type)?)
            .capacity(capacity)
            .commissioning_date(raw.commissioning_date)
            .voivodeship(raw.voivodeship)
            .municipality(raw.municipality)
            .operator(raw.operator)
            .maybe_technology(raw.technology)
            .maybe_latitude(raw.latitude)
            .maybe_longitude(raw.longitude)
            .maybe_status(status)
            .build()
    }
}

/// Map marker for an installation with known coordinates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GeospatialPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub installation_id: String,
    pub capacity: Kilowatts,
    pub installation_type: InstallationType,
    pub name: String,
    pub municipality: String,
    pub voivodeship: String,
}

impl TryFrom<&RenewableInstallation> for GeospatialPoint {
    type Error = ValidationError;

    /// Fails for installations without coordinates or with coordinates outside the globe.
    fn try_from(installation: &RenewableInstallation) -> Result<Self, Self::Error> {
        let (latitude, longitude) = (
            installation.latitude.unwrap_or(f64::NAN),
            installation.longitude.unwrap_or(f64::NAN),
        );
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(ValidationError::InvalidCoordinates { latitude, longitude });
        }
        Ok(Self {
            latitude,
            longitude,
            installation_id: installation.installation_id.clone(),
            capacity: installation.capacity,
            installation_type: installation.installation_type,
            name: installation.name.clone(),
            municipality: installation.municipality.clone(),
            voivodeship: installation.voivodeship.clone(),
        })
    }
}

#[cfg(test)]
pub mod tests {
    use enumset::EnumSet;
    use serde_json::json;

    use super::*;

    /// Minimal valid installation for aggregation tests.
    pub fn installation(
        id: &str,
        installation_type: InstallationType,
        capacity: f64,
        voivodeship: &str,
        municipality: &str,
    ) -> RenewableInstallation {
        RenewableInstallation::builder()
            .installation_id(id)
            .name(format!("Installation {id}"))
            .installation_type(installation_type)
            .capacity(capacity)
            .commissioning_date(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())
            .voivodeship(voivodeship)
            .municipality(municipality)
            .operator("Test Energy Ltd")
            .build()
            .unwrap()
    }

    #[test]
    fn defaults() {
        let installation =
            installation("TEST001", InstallationType::SolarPv, 1000.0, "mazowieckie", "Warszawa");
        assert_eq!(installation.status(), InstallationStatus::Active);
        assert_eq!(installation.technology(), None);
        assert_eq!(installation.coordinates(), None);
    }

    #[test]
    fn negative_capacity_is_rejected() {
        let result = RenewableInstallation::builder()
            .installation_id("X")
            .name("X")
            .installation_type(InstallationType::Wind)
            .capacity(-1.0)
            .commissioning_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
            .voivodeship("pomorskie")
            .municipality("Gdańsk")
            .operator("X")
            .build();
        assert_eq!(result, Err(ValidationError::NegativeCapacity(-1.0)));
    }

    #[test]
    fn empty_id_is_rejected() {
        let result = RenewableInstallation::builder()
            .installation_id("")
            .name("X")
            .installation_type(InstallationType::Wind)
            .capacity(1.0)
            .commissioning_date(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap())
            .voivodeship("pomorskie")
            .municipality("Gdańsk")
            .operator("X")
            .build();
        assert_eq!(result, Err(ValidationError::EmptyInstallationId));
    }

    #[test]
    fn unknown_type_fails_fast() {
        let result = serde_json::from_value::<RenewableInstallation>(json!({
            "installation_id": "X1",
            "name": "Geothermal",
            "installation_type": "geothermal",
            "capacity_kw": 10.0,
            "commissioning_date": "2023-01-01",
            "voivodeship": "podhale",
            "municipality": "Zakopane",
            "operator": "X",
        }));
        assert!(result.unwrap_err().to_string().contains("unknown installation type"));
    }

    #[test]
    fn deserialize_capacity_from_string() -> Result<(), serde_json::Error> {
        let installation = serde_json::from_value::<RenewableInstallation>(json!({
            "installation_id": "X2",
            "name": "Farm",
            "installation_type": "wind",
            "capacity_kw": "2500.5",
            "commissioning_date": "2021-03-01",
            "voivodeship": "pomorskie",
            "municipality": "Puck",
            "operator": "Wiatr Sp. z o.o.",
            "latitude": 54.72,
            "longitude": 18.41,
            "status": "inactive",
        }))?;
        assert_eq!(installation.capacity(), Kilowatts(2500.5));
        assert_eq!(installation.status(), InstallationStatus::Inactive);
        assert_eq!(installation.coordinates(), Some((54.72, 18.41)));
        Ok(())
    }

    #[test]
    fn deserialize_capacity_with_trailing_zero() -> Result<(), serde_json::Error> {
        let installation = serde_json::from_str::<RenewableInstallation>(
            r#"{
                "installation_id": "X3",
                "name": "Roof",
                "installation_type": "solar_pv",
                "capacity_kw": 2500.50,
                "commissioning_date": "2022-05-01",
                "voivodeship": "opolskie",
                "municipality": "Nysa",
                "operator": "Slonce S.A."
            }"#,
        )?;
        assert_eq!(installation.capacity(), Kilowatts(2500.5));
        Ok(())
    }

    #[test]
    fn geospatial_point_requires_coordinates() {
        let without =
            installation("TEST001", InstallationType::SolarPv, 1.0, "mazowieckie", "Warszawa");
        assert!(GeospatialPoint::try_from(&without).is_err());
    }

    #[test]
    fn every_type_roundtrips() -> Result<(), ValidationError> {
        for installation_type in EnumSet::<InstallationType>::all() {
            assert_eq!(InstallationType::from_str(installation_type.as_str())?, installation_type);
        }
        Ok(())
    }
}
