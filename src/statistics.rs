pub mod growth;
pub mod period;
pub mod region;
pub mod summary;
pub mod tariff;
pub mod trend;
