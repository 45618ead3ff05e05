use std::{fs, path::PathBuf};

use clap::Parser;
use ure::{mapper::InstallationMapper, prelude::*};

use crate::{cli::SourceArgs, tables::build_regions_table};

#[derive(Parser)]
pub struct RegionsArgs {
    /// Also export the statistics as TOML.
    #[clap(long = "output-file", env = "REGIONS_OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

#[instrument(skip_all)]
pub async fn regions(source: &SourceArgs, args: &RegionsArgs) -> Result {
    let regions =
        InstallationMapper::new(source.installation_source()?).regional_statistics().await?;
    println!("{}", build_regions_table(&regions));

    if let Some(path) = &args.output_file {
        let contents = toml::to_string_pretty(&regions)?;
        fs::write(path, contents).with_context(|| format!("failed to write `{}`", path.display()))?;
        info!(path = %path.display(), "exported");
    }
    Ok(())
}
