use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Consumed energy, exact and never negative.
#[must_use]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct KilowattHours(Decimal);

impl KilowattHours {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn try_new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::NegativeConsumption(value));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub const fn get(self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for KilowattHours {
    type Error = ValidationError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl FromStr for KilowattHours {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal =
            Decimal::from_str(s.trim()).map_err(|_| ValidationError::InvalidDecimal(s.to_string()))?;
        Self::try_new(decimal)
    }
}

impl<'de> Deserialize<'de> for KilowattHours {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Self::try_new(<Decimal as Deserialize>::deserialize(deserializer)?).map_err(serde::de::Error::custom)
    }
}

impl Display for KilowattHours {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} kWh", self.0)
    }
}

/// Energy units seen on regulator publications.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
pub enum EnergyUnit {
    #[serde(rename = "kWh")]
    #[value(name = "kWh")]
    KilowattHour,

    #[serde(rename = "MWh")]
    #[value(name = "MWh")]
    MegawattHour,

    #[serde(rename = "GWh")]
    #[value(name = "GWh")]
    GigawattHour,
}

impl EnergyUnit {
    const fn in_kilowatt_hours(self) -> f64 {
        match self {
            Self::KilowattHour => 1.0,
            Self::MegawattHour => 1_000.0,
            Self::GigawattHour => 1_000_000.0,
        }
    }

    #[must_use]
    pub fn convert(value: f64, from: Self, to: Self) -> f64 {
        if from == to { value } else { value * from.in_kilowatt_hours() / to.in_kilowatt_hours() }
    }
}
