use std::collections::BTreeMap;

use itertools::Itertools;
use serde::Serialize;

use crate::{
    core::{
        installation::{InstallationType, RenewableInstallation},
        period::Period,
    },
    quantity::power::Kilowatts,
};

/// Average month length in days.
const DAYS_PER_MONTH: f64 = 30.44;

#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CapacityGrowthAnalysis {
    pub period: Period,

    #[serde(rename = "total_capacity_added_kw")]
    pub capacity_added: Kilowatts,

    pub installations_added: usize,

    /// Added capacity relative to the capacity commissioned before the period,
    /// zero when there was none.
    pub growth_rate_percent: f64,

    /// Type with the most capacity added within the period.
    pub dominant_technology: Option<InstallationType>,

    /// Capacity added per voivodeship.
    pub regional_breakdown: BTreeMap<String, Kilowatts>,
}

impl CapacityGrowthAnalysis {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn monthly_growth_rate(&self) -> f64 {
        let months = self.period.days() as f64 / DAYS_PER_MONTH;
        if months > 0.0 { self.growth_rate_percent / months } else { 0.0 }
    }
}

pub fn analyze_capacity_growth(
    installations: &[RenewableInstallation],
    period: Period,
) -> CapacityGrowthAnalysis {
    let baseline: Kilowatts = installations
        .iter()
        .filter(|installation| installation.commissioning_date() < period.start())
        .map(RenewableInstallation::capacity)
        .sum();
    let added = installations
        .iter()
        .filter(|installation| period.contains(installation.commissioning_date()))
        .collect_vec();
    let capacity_added: Kilowatts = added.iter().map(|installation| installation.capacity()).sum();

    let growth_rate_percent = if baseline > Kilowatts::ZERO {
        capacity_added.0 / baseline.0 * 100.0
    } else {
        0.0
    };

    let mut by_type: BTreeMap<InstallationType, Kilowatts> = BTreeMap::new();
    let mut regional_breakdown: BTreeMap<String, Kilowatts> = BTreeMap::new();
    for installation in &added {
        *by_type.entry(installation.installation_type()).or_default() += installation.capacity();
        *regional_breakdown.entry(installation.voivodeship().to_string()).or_default() +=
            installation.capacity();
    }
    let dominant_technology = by_type
        .into_iter()
        .max_by(|(lhs_type, lhs), (rhs_type, rhs)| lhs.cmp(rhs).then(rhs_type.cmp(lhs_type)))
        .map(|(installation_type, _)| installation_type);

    CapacityGrowthAnalysis {
        period,
        capacity_added,
        installations_added: added.len(),
        growth_rate_percent,
        dominant_technology,
        regional_breakdown,
    }
}
