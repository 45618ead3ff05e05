use std::time::Duration;

use clap::Parser;
use reqwest::Url;
use ure::{
    api::{client, registry, ure as regulator},
    prelude::*,
};

#[derive(Parser)]
pub struct SourceArgs {
    /// Regulator website, also serving the installation registry.
    #[clap(
        long = "ure-base-url",
        env = "URE_BASE_URL",
        default_value = client::DEFAULT_BASE_URL
    )]
    pub base_url: Url,

    /// Per-request timeout.
    #[clap(long = "timeout-secs", env = "URE_TIMEOUT_SECS", default_value = "30")]
    pub timeout_secs: u64,
}

impl SourceArgs {
    const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn price_source(&self) -> Result<regulator::Api> {
        regulator::Api::builder().base_url(self.base_url.clone()).timeout(self.timeout()).build()
    }

    pub fn installation_source(&self) -> Result<registry::Api> {
        registry::Api::builder().base_url(self.base_url.clone()).timeout(self.timeout()).build()
    }
}
