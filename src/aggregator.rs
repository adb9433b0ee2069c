use std::fmt;

use jiff::ToSpan;
use jiff::civil::Date;
use log::{trace, warn};

use crate::client::{Connector, HttpConnector, RateClient};
use crate::error::Error;
use crate::rates::{DailyRates, DateKey, extract_currency_rates};

/// Number of days to fetch, counting today.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Days(u8);

impl Days {
    pub const MIN: i64 = 1;
    pub const MAX: i64 = 10;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Days {
    type Error = Error;

    fn try_from(days: i64) -> Result<Self, Self::Error> {
        match u8::try_from(days) {
            Ok(n) if (Self::MIN..=Self::MAX).contains(&days) => Ok(Days(n)),
            _ => Err(Error::DaysOutOfRange(days)),
        }
    }
}

impl fmt::Display for Days {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `today`, the day before, and so on for `days` days in total.
pub fn date_window(today: Date, days: Days) -> impl Iterator<Item = Date> {
    (0..i64::from(days.get())).map(move |i| today - i.days())
}

pub struct RateAggregator<C = HttpConnector> {
    client: RateClient,
    connector: C,
}

impl Default for RateAggregator {
    fn default() -> Self {
        RateAggregator::new(RateClient::default(), HttpConnector)
    }
}

impl<C: Connector> RateAggregator<C> {
    pub fn new(client: RateClient, connector: C) -> Self {
        RateAggregator { client, connector }
    }

    /// Fetch EUR/USD rates for each day of the window, newest first.
    ///
    /// Dates that fail to fetch or lack either currency are left out.
    pub fn get_exchange_rates(&self, today: Date, days: Days) -> Vec<DailyRates> {
        let session = self.connector.connect();
        trace!("session opened");

        let rates = date_window(today, days)
            .map(DateKey::from)
            .filter_map(|date| {
                let raw = self.client.fetch_rate(&session, &date)?;
                extract_currency_rates(&raw, &date)
                    .inspect_err(|e| warn!("{e}"))
                    .ok()
            })
            .collect();

        drop(session);
        trace!("session closed");
        rates
    }
}
