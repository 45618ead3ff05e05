#[macro_use]
mod macros;

pub mod energy;
pub mod money;
pub mod power;
