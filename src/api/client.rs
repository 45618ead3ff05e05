use std::time::Duration;

use reqwest::{
    Client,
    header::{ACCEPT_LANGUAGE, HeaderMap, HeaderValue},
};

use crate::prelude::*;

pub const DEFAULT_BASE_URL: &str = "https://www.ure.gov.pl";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("ure/", env!("CARGO_PKG_VERSION"), " (compatible; PolishEnergyBot/1.0)");

/// Build the HTTP session shared by the calls of a single adapter.
pub fn try_new(timeout: Duration) -> Result<Client> {
    let headers = HeaderMap::from_iter([(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("pl-PL,pl;q=0.9,en;q=0.8"),
    )]);
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .build()
        .context("failed to build the HTTP client")
}
