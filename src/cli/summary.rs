use ure::{mapper::InstallationMapper, prelude::*, quantity::power::Kilowatts};

use crate::{cli::SourceArgs, tables::build_summary_table};

#[instrument(skip_all)]
pub async fn summary(source: &SourceArgs) -> Result {
    let summary = InstallationMapper::new(source.installation_source()?).summary_report().await?;
    info!(
        report_date = %summary.report_date,
        average_capacity = %summary.average_capacity,
        average_capacity_mw = summary.average_capacity.as_megawatts(),
        "summarised"
    );
    if summary.total_capacity == Kilowatts::ZERO {
        warn!("the registry returned no capacity");
    }
    println!("{}", build_summary_table(&summary));
    Ok(())
}
