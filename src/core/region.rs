use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::{core::installation::InstallationType, quantity::power::Kilowatts};

/// Per-voivodeship roll-up of installations.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionalData {
    pub voivodeship: String,

    #[serde(rename = "total_capacity_kw")]
    pub total_capacity: Kilowatts,

    pub installation_count: usize,

    /// Count per installation type, every type present even with zero.
    #[serde(serialize_with = "serialize_type_distribution")]
    pub type_distribution: BTreeMap<InstallationType, usize>,
}

impl RegionalData {
    /// Undefined for an empty region.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_installation_size(&self) -> Option<Kilowatts> {
        (self.installation_count > 0)
            .then(|| self.total_capacity / self.installation_count as f64)
    }
}

fn serialize_type_distribution<S: Serializer>(
    distribution: &BTreeMap<InstallationType, usize>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        distribution.iter().map(|(installation_type, count)| (installation_type.as_str(), count)),
    )
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum MunicipalitySort {
    /// Total installed capacity.
    #[default]
    Capacity,

    /// Number of installations.
    Count,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MunicipalityStatistics {
    pub municipality: String,
    pub voivodeship: String,

    #[serde(rename = "total_capacity_kw")]
    pub total_capacity: Kilowatts,

    pub installation_count: usize,
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn average_installation_size() {
        let region = RegionalData {
            voivodeship: "A".to_string(),
            total_capacity: Kilowatts(30.0),
            installation_count: 4,
            type_distribution: BTreeMap::new(),
        };
        assert_abs_diff_eq!(region.average_installation_size().unwrap().0, 7.5);
    }

    #[test]
    fn average_installation_size_of_empty_region() {
        let region = RegionalData {
            voivodeship: "A".to_string(),
            total_capacity: Kilowatts::ZERO,
            installation_count: 0,
            type_distribution: BTreeMap::new(),
        };
        assert_eq!(region.average_installation_size(), None);
    }

    #[test]
    fn serialize_to_toml() -> Result<(), toml::ser::Error> {
        let region = RegionalData {
            voivodeship: "A".to_string(),
            total_capacity: Kilowatts(30.0),
            installation_count: 2,
            type_distribution: BTreeMap::from([
                (InstallationType::SolarPv, 2),
                (InstallationType::Wind, 0),
            ]),
        };
        let serialized = toml::to_string(&region)?;
        assert!(serialized.contains("total_capacity_kw = 30.0"));
        assert!(serialized.contains("solar_pv = 2"));
        assert!(serialized.contains("wind = 0"));
        Ok(())
    }
}
