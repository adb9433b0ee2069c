use thiserror::Error;

use crate::aggregator::Days;
use crate::rates::{Currency, DateKey};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Usage: {} <days>", env!("CARGO_PKG_NAME"))]
    Usage,
    #[error("The number of days must be a whole number.")]
    NotInteger,
    /// Help output requested on the command line
    #[error(transparent)]
    Clap(clap::Error),
    #[error("The number of days must be between {} and {}.", Days::MIN, Days::MAX)]
    DaysOutOfRange(i64),

    #[error("API returned status {status} for date {date}")]
    Status { status: u16, date: DateKey },
    #[error("network error for date {date}: {source}")]
    Network {
        date: DateKey,
        #[source]
        source: ureq::Error,
    },
    #[error("malformed response for date {date}: {source}")]
    Decode {
        date: DateKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to process data for date {date}: no {currency} rate")]
    MissingCurrency { date: DateKey, currency: Currency },
    #[error("failed to process data for date {date}: {currency} rate has no {field}")]
    MissingField {
        date: DateKey,
        currency: Currency,
        field: &'static str,
    },
}
