use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use enumset::EnumSet;
use serde::{Serialize, Serializer};

use crate::{
    core::installation::{InstallationType, RenewableInstallation},
    quantity::power::Kilowatts,
};

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total_installations: usize,

    #[serde(rename = "total_capacity_kw")]
    pub total_capacity: Kilowatts,

    /// Zero for an empty registry.
    #[serde(rename = "average_capacity_per_installation_kw")]
    pub average_capacity: Kilowatts,

    #[serde(serialize_with = "serialize_by_type")]
    pub by_type: BTreeMap<InstallationType, TypeSummary>,

    pub report_date: NaiveDate,
}

#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize)]
pub struct TypeSummary {
    pub count: usize,

    #[serde(rename = "capacity_kw")]
    pub capacity: Kilowatts,
}

#[allow(clippy::cast_precision_loss)]
pub fn summarize(installations: &[RenewableInstallation]) -> Summary {
    let mut by_type: BTreeMap<_, _> = EnumSet::<InstallationType>::all()
        .iter()
        .map(|installation_type| (installation_type, TypeSummary::default()))
        .collect();
    for installation in installations {
        let entry: &mut TypeSummary = by_type.entry(installation.installation_type()).or_default();
        entry.count += 1;
        entry.capacity += installation.capacity();
    }
    let total_capacity: Kilowatts =
        installations.iter().map(RenewableInstallation::capacity).sum();
    let average_capacity = if installations.is_empty() {
        Kilowatts::ZERO
    } else {
        total_capacity / installations.len() as f64
    };
    Summary {
        total_installations: installations.len(),
        total_capacity,
        average_capacity,
        by_type,
        report_date: Local::now().date_naive(),
    }
}

fn serialize_by_type<S: Serializer>(
    by_type: &BTreeMap<InstallationType, TypeSummary>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(
        by_type.iter().map(|(installation_type, summary)| (installation_type.as_str(), summary)),
    )
}
