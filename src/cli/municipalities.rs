use clap::Parser;
use ure::{core::region::MunicipalitySort, mapper::InstallationMapper, prelude::*};

use crate::{cli::SourceArgs, tables::build_municipalities_table};

#[derive(Parser)]
pub struct MunicipalitiesArgs {
    #[clap(long, default_value = "10")]
    pub limit: usize,

    #[clap(long = "sort-by", value_enum, default_value = "capacity")]
    pub sort_by: MunicipalitySort,
}

#[instrument(skip_all)]
pub async fn municipalities(source: &SourceArgs, args: &MunicipalitiesArgs) -> Result {
    let top = InstallationMapper::new(source.installation_source()?)
        .top_municipalities(args.limit, args.sort_by)
        .await?;
    println!("{}", build_municipalities_table(&top));
    Ok(())
}
