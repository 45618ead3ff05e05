#![allow(clippy::doc_markdown)]

mod cli;
mod tables;

use clap::{Parser, crate_version};
use ure::prelude::*;

use crate::cli::{Args, Command, growth, municipalities, prices, regions, summary, tariffs};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();

    match &args.command {
        Command::Prices(command_args) => prices(&args.source, command_args).await?,
        Command::Tariffs(command_args) => tariffs(&args.source, command_args).await?,
        Command::Regions(command_args) => regions(&args.source, command_args).await?,
        Command::Municipalities(command_args) => {
            municipalities(&args.source, command_args).await?;
        }
        Command::Summary => summary(&args.source).await?,
        Command::Growth(command_args) => growth(&args.source, command_args).await?,
    }

    info!("done!");
    Ok(())
}
