mod growth;
mod municipalities;
mod period;
mod prices;
mod regions;
mod source;
mod summary;
mod tariffs;

use clap::{Parser, Subcommand};

pub use self::{
    growth::{GrowthArgs, growth},
    municipalities::{MunicipalitiesArgs, municipalities},
    prices::{PricesArgs, prices},
    regions::{RegionsArgs, regions},
    source::SourceArgs,
    summary::summary,
    tariffs::{TariffsArgs, tariffs},
};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[clap(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Analyse the regulated price trend over a period.
    #[clap(name = "prices")]
    Prices(PricesArgs),

    /// List the tariff catalogue, or rank the given tariffs by total cost.
    #[clap(name = "tariffs")]
    Tariffs(TariffsArgs),

    /// Renewable installations per voivodeship.
    #[clap(name = "regions")]
    Regions(RegionsArgs),

    /// Municipalities with the most renewable capacity.
    #[clap(name = "municipalities")]
    Municipalities(MunicipalitiesArgs),

    /// Registry-wide totals per installation type.
    #[clap(name = "summary")]
    Summary,

    /// Capacity commissioned within a period.
    #[clap(name = "growth")]
    Growth(GrowthArgs),
}
