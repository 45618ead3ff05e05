use std::str::FromStr;

use bon::bon;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{core::energy_type::EnergyType, error::ValidationError, quantity::energy::KilowattHours};

pub const DEFAULT_CURRENCY: &str = "PLN";

/// Regulator-approved pricing schedule.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTariff")]
pub struct TariffStructure {
    tariff_id: String,
    name: String,
    base_price: Decimal,
    energy_price: Decimal,
    network_fee: Decimal,
    valid_from: Option<NaiveDate>,
    valid_to: Option<NaiveDate>,
    currency: String,
    energy_type: EnergyType,
}

#[bon]
impl TariffStructure {
    #[builder]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        #[builder(into)] tariff_id: String,
        #[builder(into)] name: String,
        base_price: Decimal,
        energy_price: Decimal,
        network_fee: Decimal,
        valid_from: Option<NaiveDate>,
        valid_to: Option<NaiveDate>,
        #[builder(into, default = String::from(DEFAULT_CURRENCY))] currency: String,
        #[builder(default)] energy_type: EnergyType,
    ) -> Result<Self, ValidationError> {
        if tariff_id.trim().is_empty() {
            return Err(ValidationError::EmptyTariffId);
        }
        if let (Some(from), Some(to)) = (valid_from, valid_to)
            && to < from
        {
            return Err(ValidationError::InvalidValidityPeriod { from, to });
        }
        Ok(Self {
            tariff_id,
            name,
            base_price,
            energy_price,
            network_fee,
            valid_from,
            valid_to,
            currency,
            energy_type,
        })
    }
}

impl TariffStructure {
    /// `base_price + energy_price × consumption + network_fee`, in exact decimal arithmetic.
    ///
    /// Fails instead of panicking when the cost does not fit into a [`Decimal`].
    pub fn total_cost(&self, consumption: KilowattHours) -> Result<Decimal, ValidationError> {
        self.energy_price
            .checked_mul(consumption.get())
            .and_then(|energy_cost| self.base_price.checked_add(energy_cost))
            .and_then(|cost| cost.checked_add(self.network_fee))
            .ok_or_else(|| ValidationError::CostOverflow(self.tariff_id.clone()))
    }

    #[must_use]
    pub fn is_valid_on(&self, date: NaiveDate) -> bool {
        self.valid_from.is_none_or(|from| from <= date) && self.valid_to.is_none_or(|to| date <= to)
    }

    #[must_use]
    pub fn tariff_id(&self) -> &str {
        &self.tariff_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn base_price(&self) -> Decimal {
        self.base_price
    }

    #[must_use]
    pub const fn energy_price(&self) -> Decimal {
        self.energy_price
    }

    #[must_use]
    pub const fn network_fee(&self) -> Decimal {
        self.network_fee
    }

    #[must_use]
    pub const fn valid_from(&self) -> Option<NaiveDate> {
        self.valid_from
    }

    #[must_use]
    pub const fn valid_to(&self) -> Option<NaiveDate> {
        self.valid_to
    }

    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    #[must_use]
    pub const fn energy_type(&self) -> EnergyType {
        self.energy_type
    }
}

/// Tariff mapping as published, numbers may come as JSON numbers or strings.
#[derive(Deserialize)]
pub struct RawTariff {
    pub tariff_id: String,
    pub name: String,
    pub base_price: Decimal,
    pub energy_price: Decimal,
    pub network_fee: Decimal,

    #[serde(default)]
    pub valid_from: Option<NaiveDate>,

    #[serde(default)]
    pub valid_to: Option<NaiveDate>,

    #[serde(default)]
    pub currency: Option<String>,

    #[serde(default)]
    pub energy_type: Option<String>,
}

impl TryFrom<RawTariff> for TariffStructure {
    type Error = ValidationError;

    fn try_from(raw: RawTariff) -> Result<Self, Self::Error> {
        let energy_type = raw.energy_type.as_deref().map(EnergyType::from_str).transpose()?;
        Self::builder()
            .tariff_id(raw.tariff_id)
            .name(raw.name)
            .base_price(raw.base_price)
            .energy_price(raw.energy_price)
            .network_fee(raw.network_fee)
            .maybe_valid_from(raw.valid_from)
            .maybe_valid_to(raw.valid_to)
            .maybe_currency(raw.currency)
            .maybe_energy_type(energy_type)
            .build()
    }
}

/// Catalogue entry: just enough to pick a tariff for a detailed lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffSummary {
    pub tariff_id: String,
    pub name: String,
}
