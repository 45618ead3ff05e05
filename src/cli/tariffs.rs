use clap::Parser;
use ure::{
    analyzer::PriceAnalyzer,
    api::source::PriceSource,
    core::energy_type::EnergyType,
    prelude::*,
    quantity::energy::KilowattHours,
};

use crate::{
    cli::SourceArgs,
    tables::{build_tariff_catalogue_table, build_tariff_ranking_table},
};

#[derive(Parser)]
pub struct TariffsArgs {
    #[clap(long = "energy-type", value_enum, default_value = "electricity")]
    pub energy_type: EnergyType,

    /// Tariffs to rank. Without them, the catalogue is listed.
    #[clap(long = "tariff-ids", value_delimiter = ',', num_args = 1..)]
    pub tariff_ids: Vec<String>,

    /// Consumption to price the tariffs at.
    #[clap(long = "consumption-kwh", default_value = "2000")]
    pub consumption: KilowattHours,
}

#[instrument(skip_all)]
pub async fn tariffs(source: &SourceArgs, args: &TariffsArgs) -> Result {
    let analyzer = PriceAnalyzer::new(source.price_source()?);
    if args.tariff_ids.is_empty() {
        let catalogue = analyzer.source().available_tariffs(args.energy_type).await?;
        println!("{}", build_tariff_catalogue_table(&catalogue));
        return Ok(());
    }
    let ranked = analyzer
        .rank_tariffs(&args.tariff_ids, args.consumption)
        .await
        .context("failed to fetch the tariffs")?;
    println!("{}", build_tariff_ranking_table(&ranked));
    Ok(())
}
