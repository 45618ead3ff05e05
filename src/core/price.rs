use std::str::FromStr;

use bon::bon;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{core::energy_type::EnergyType, error::ValidationError};

pub const DEFAULT_PRICE_UNIT: &str = "PLN/MWh";

/// Single regulator price observation.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPriceObservation")]
pub struct PriceObservation {
    date: NaiveDate,
    price: Decimal,
    energy_type: EnergyType,
    unit: String,
    source: Option<String>,
}

#[bon]
impl PriceObservation {
    #[builder]
    pub fn new(
        date: NaiveDate,
        price: Decimal,
        energy_type: EnergyType,
        #[builder(into, default = String::from(DEFAULT_PRICE_UNIT))] unit: String,
        #[builder(into)] source: Option<String>,
    ) -> Result<Self, ValidationError> {
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ValidationError::NegativePrice(price));
        }
        Ok(Self { date, price, energy_type, unit, source })
    }
}

impl PriceObservation {
    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn price(&self) -> Decimal {
        self.price
    }

    #[must_use]
    pub const fn energy_type(&self) -> EnergyType {
        self.energy_type
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }
}

/// Price observation as it comes from the wire, before validation.
#[derive(Deserialize)]
pub struct RawPriceObservation {
    pub date: NaiveDate,
    pub price: Decimal,
    pub energy_type: String,

    #[serde(default)]
    pub unit: Option<String>,

    #[serde(default)]
    pub source: Option<String>,
}

impl TryFrom<RawPriceObservation> for PriceObservation {
    type Error = ValidationError;

    fn try_from(raw: RawPriceObservation) -> Result<Self, Self::Error> {
        Self::builder()
            .date(raw.date)
            .price(raw.price)
            .energy_type(EnergyType::from_str(&raw.energy_type)?)
            .unit(raw.unit.unwrap_or_else(|| DEFAULT_PRICE_UNIT.to_string()))
            .maybe_source(raw.source)
            .build()
    }
}
