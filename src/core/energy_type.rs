use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum EnergyType {
    #[default]
    Electricity,
    Gas,
    Heat,
}

impl EnergyType {
    pub const ALL: [Self; 3] = [Self::Electricity, Self::Gas, Self::Heat];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Electricity => "electricity",
            Self::Gas => "gas",
            Self::Heat => "heat",
        }
    }
}

impl Display for EnergyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" => Err(ValidationError::EmptyEnergyType),
            "electricity" => Ok(Self::Electricity),
            "gas" => Ok(Self::Gas),
            "heat" => Ok(Self::Heat),
            _ => Err(ValidationError::UnknownEnergyType(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ok() -> Result<(), ValidationError> {
        assert_eq!(EnergyType::from_str("electricity")?, EnergyType::Electricity);
        assert_eq!(EnergyType::from_str(" Gas ")?, EnergyType::Gas);
        assert_eq!(EnergyType::from_str("heat")?, EnergyType::Heat);
        Ok(())
    }

    #[test]
    fn parse_empty() {
        assert_eq!(EnergyType::from_str(""), Err(ValidationError::EmptyEnergyType));
    }

    #[test]
    fn parse_unknown() {
        assert_eq!(
            EnergyType::from_str("coal"),
            Err(ValidationError::UnknownEnergyType("coal".to_string())),
        );
    }

    #[test]
    fn display_roundtrips() -> Result<(), ValidationError> {
        for energy_type in EnergyType::ALL {
            assert_eq!(EnergyType::from_str(&energy_type.to_string())?, energy_type);
        }
        Ok(())
    }
}
