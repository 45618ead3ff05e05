use clap::Parser;
use ure::{mapper::InstallationMapper, prelude::*};

use crate::{
    cli::{SourceArgs, period::PeriodArgs},
    tables::build_growth_table,
};

#[derive(Parser)]
pub struct GrowthArgs {
    #[clap(flatten)]
    pub period: PeriodArgs,
}

#[instrument(skip_all)]
pub async fn growth(source: &SourceArgs, args: &GrowthArgs) -> Result {
    let growth = InstallationMapper::new(source.installation_source()?)
        .capacity_growth(args.period.period()?)
        .await?;
    info!(
        installations_added = growth.installations_added,
        growth_rate_percent = growth.growth_rate_percent,
        monthly_growth_rate = growth.monthly_growth_rate(),
        dominant_technology = ?growth.dominant_technology,
        "analysed"
    );
    println!("{}", build_growth_table(&growth));
    Ok(())
}
