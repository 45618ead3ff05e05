use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
};

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::{core::price::PriceObservation, error::ValidationError};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Granularity {
    #[default]
    Month,
    Quarter,
    Year,
}

/// Calendar bucket, ordered chronologically.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize)]
pub enum PeriodKey {
    Month { year: i32, month: u32 },
    Quarter { year: i32, quarter: u32 },
    Year { year: i32 },
}

impl PeriodKey {
    #[must_use]
    pub fn of(date: NaiveDate, granularity: Granularity) -> Self {
        match granularity {
            Granularity::Month => Self::Month { year: date.year(), month: date.month() },
            Granularity::Quarter => {
                Self::Quarter { year: date.year(), quarter: date.month0() / 3 + 1 }
            }
            Granularity::Year => Self::Year { year: date.year() },
        }
    }
}

impl Display for PeriodKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month { year, month } => write!(f, "{year}-{month:02}"),
            Self::Quarter { year, quarter } => write!(f, "{year}-Q{quarter}"),
            Self::Year { year } => write!(f, "{year}"),
        }
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PeriodAverage {
    pub key: PeriodKey,
    pub average_price: Decimal,
    pub count: usize,
}

/// Group the observations into calendar buckets and average the prices within each.
pub fn average_by_period(
    observations: &[PriceObservation],
    granularity: Granularity,
) -> Result<Vec<PeriodAverage>, ValidationError> {
    let mut buckets: BTreeMap<PeriodKey, (Decimal, usize)> = BTreeMap::new();
    for observation in observations {
        let key = PeriodKey::of(observation.date(), granularity);
        let (sum, count) = buckets.entry(key).or_default();
        *sum = sum
            .checked_add(observation.price())
            .ok_or_else(|| ValidationError::PriceSumOverflow(key.to_string()))?;
        *count += 1;
    }
    Ok(buckets
        .into_iter()
        .map(|(key, (sum, count))| PeriodAverage {
            key,
            average_price: sum / Decimal::from(count),
            count,
        })
        .collect())
}
