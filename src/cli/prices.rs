use clap::Parser;
use ure::{
    analyzer::PriceAnalyzer,
    core::energy_type::EnergyType,
    prelude::*,
    statistics::{
        period::{Granularity, average_by_period},
        trend::analyze_trend,
    },
};

use crate::{
    cli::{SourceArgs, period::PeriodArgs},
    tables::{build_period_averages_table, build_price_analysis_table},
};

#[derive(Parser)]
pub struct PricesArgs {
    #[clap(long = "energy-type", value_enum, default_value = "electricity")]
    pub energy_type: EnergyType,

    #[clap(flatten)]
    pub period: PeriodArgs,

    /// Also break the prices down into calendar buckets.
    #[clap(long, value_enum)]
    pub granularity: Option<Granularity>,
}

#[instrument(skip_all)]
pub async fn prices(source: &SourceArgs, args: &PricesArgs) -> Result {
    let period = args.period.period()?;
    let analyzer = PriceAnalyzer::new(source.price_source()?);
    let Some(granularity) = args.granularity else {
        let analysis = analyzer.analyze_price_trends(period, args.energy_type).await?;
        println!("{}", build_price_analysis_table(&analysis));
        return Ok(());
    };

    // One fetch serves both tables.
    let observations = analyzer.price_history(period, args.energy_type).await?;
    let analysis = analyze_trend(period, args.energy_type, &observations);
    println!("{}", build_price_analysis_table(&analysis));
    let averages = average_by_period(&observations, granularity)?;
    println!("{}", build_period_averages_table(&averages));
    Ok(())
}
