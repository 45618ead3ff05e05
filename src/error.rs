//! Typed errors of the library surface.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Record invariant violation, raised before the value exists.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("price cannot be negative: {0}")]
    NegativePrice(Decimal),

    #[error("energy type is required")]
    EmptyEnergyType,

    #[error("unknown energy type: `{0}` (expected electricity, gas, or heat)")]
    UnknownEnergyType(String),

    #[error("unknown installation type: `{0}`")]
    UnknownInstallationType(String),

    #[error("unknown installation status: `{0}`")]
    UnknownInstallationStatus(String),

    #[error("tariff ID is required")]
    EmptyTariffId,

    #[error("tariff validity ends ({to}) before it starts ({from})")]
    InvalidValidityPeriod { from: NaiveDate, to: NaiveDate },

    #[error("installation ID is required")]
    EmptyInstallationId,

    #[error("capacity cannot be negative: {0} kW")]
    NegativeCapacity(f64),

    #[error("consumption cannot be negative: {0} kWh")]
    NegativeConsumption(Decimal),

    #[error("period ends ({end}) before it starts ({start})")]
    InvertedPeriod { start: NaiveDate, end: NaiveDate },

    #[error("coordinates out of range: ({latitude}, {longitude})")]
    InvalidCoordinates { latitude: f64, longitude: f64 },

    #[error("invalid decimal: `{0}`")]
    InvalidDecimal(String),

    #[error("invalid date: `{0}`")]
    InvalidDate(String),

    #[error("missing the `{0}` column")]
    MissingColumn(&'static str),

    #[error("total cost of tariff `{0}` overflows the decimal range")]
    CostOverflow(String),

    #[error("price sum for {0} overflows the decimal range")]
    PriceSumOverflow(String),
}

/// Batch-level failure at the data source boundary.
///
/// Malformed individual rows never end up here: adapters skip them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to reach `{url}`")]
    Unreachable {
        url: String,

        #[source]
        source: reqwest::Error,
    },

    #[error("`{url}` responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from `{url}`: {reason}")]
    Malformed { url: String, reason: String },

    #[error("`{0}` is not known to the source")]
    NotFound(String),

    #[error("invalid record")]
    Invalid(#[from] ValidationError),
}

impl FetchError {
    /// Classify a transport error, keeping the upstream status when there is one.
    pub(crate) fn from_reqwest(url: &str, error: reqwest::Error) -> Self {
        match error.status() {
            Some(status) => Self::Status { url: url.to_string(), status: status.as_u16() },
            None if error.is_decode() => {
                Self::Malformed { url: url.to_string(), reason: error.to_string() }
            }
            None => Self::Unreachable { url: url.to_string(), source: error },
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn negative_price_message() {
        let message = ValidationError::NegativePrice(dec!(-100.0)).to_string();
        assert_eq!(message, "price cannot be negative: -100.0");
    }

    #[test]
    fn validation_error_converts_into_fetch_error() {
        let error: FetchError = ValidationError::EmptyTariffId.into();
        assert!(matches!(error, FetchError::Invalid(ValidationError::EmptyTariffId)));
    }

    #[test]
    fn status_message() {
        let error = FetchError::Status { url: "https://www.ure.gov.pl".to_string(), status: 503 };
        assert_eq!(error.to_string(), "`https://www.ure.gov.pl` responded with HTTP 503");
    }
}
