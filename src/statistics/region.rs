use std::collections::{BTreeMap, HashMap};

use enumset::EnumSet;

use crate::{
    core::{
        installation::{InstallationType, RenewableInstallation},
        region::{MunicipalitySort, MunicipalityStatistics, RegionalData},
    },
    quantity::power::Kilowatts,
};

/// Histogram over every installation type, including the absent ones.
#[must_use]
pub fn type_distribution<'a>(
    installations: impl IntoIterator<Item = &'a RenewableInstallation>,
) -> BTreeMap<InstallationType, usize> {
    let mut distribution: BTreeMap<_, _> = EnumSet::<InstallationType>::all()
        .iter()
        .map(|installation_type| (installation_type, 0))
        .collect();
    for installation in installations {
        *distribution.entry(installation.installation_type()).or_default() += 1;
    }
    distribution
}

#[must_use]
pub fn aggregate_by_region(
    installations: &[RenewableInstallation],
) -> BTreeMap<String, RegionalData> {
    let mut by_voivodeship: BTreeMap<&str, Vec<&RenewableInstallation>> = BTreeMap::new();
    for installation in installations {
        by_voivodeship.entry(installation.voivodeship()).or_default().push(installation);
    }
    by_voivodeship
        .into_iter()
        .map(|(voivodeship, installations)| {
            let region = RegionalData {
                voivodeship: voivodeship.to_string(),
                total_capacity: installations
                    .iter()
                    .map(|installation| installation.capacity())
                    .sum(),
                installation_count: installations.len(),
                type_distribution: type_distribution(installations.iter().copied()),
            };
            (voivodeship.to_string(), region)
        })
        .collect()
}

/// Rank `(municipality, voivodeship)` groups, keeping the first-seen order among ties.
#[must_use]
pub fn top_municipalities(
    installations: &[RenewableInstallation],
    limit: usize,
    sort_by: MunicipalitySort,
) -> Vec<MunicipalityStatistics> {
    let mut statistics: Vec<MunicipalityStatistics> = Vec::new();
    let mut indices: HashMap<(&str, &str), usize> = HashMap::new();
    for installation in installations {
        let key = (installation.municipality(), installation.voivodeship());
        let index = *indices.entry(key).or_insert_with(|| {
            statistics.push(MunicipalityStatistics {
                municipality: installation.municipality().to_string(),
                voivodeship: installation.voivodeship().to_string(),
                total_capacity: Kilowatts::ZERO,
                installation_count: 0,
            });
            statistics.len() - 1
        });
        statistics[index].total_capacity += installation.capacity();
        statistics[index].installation_count += 1;
    }

    // Stable sort: equal keys stay in the first-seen order.
    match sort_by {
        MunicipalitySort::Capacity => {
            statistics.sort_by(|lhs, rhs| rhs.total_capacity.cmp(&lhs.total_capacity));
        }
        MunicipalitySort::Count => {
            statistics.sort_by(|lhs, rhs| rhs.installation_count.cmp(&lhs.installation_count));
        }
    }
    statistics.truncate(limit);
    statistics
}
