pub mod energy_type;
pub mod installation;
pub mod period;
pub mod price;
pub mod region;
pub mod tariff;
pub mod voivodeship;
