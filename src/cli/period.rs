use chrono::{Local, Months, NaiveDate};
use clap::Parser;
use ure::{core::period::Period, prelude::*};

#[derive(Parser)]
pub struct PeriodArgs {
    /// First day, inclusive. Defaults to a year before the last day.
    #[clap(long)]
    pub since: Option<NaiveDate>,

    /// Last day, inclusive. Defaults to today.
    #[clap(long)]
    pub until: Option<NaiveDate>,
}

impl PeriodArgs {
    pub fn period(&self) -> Result<Period> {
        let until = self.until.unwrap_or_else(|| Local::now().date_naive());
        let since = match self.since {
            Some(since) => since,
            None => until.checked_sub_months(Months::new(12)).context("date out of range")?,
        };
        Ok(Period::try_new(since, until)?)
    }
}
