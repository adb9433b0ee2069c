use std::ffi::OsString;
use std::io::{self, Write};
use std::num::IntErrorKind;

use clap::Parser;
use clap::error::ErrorKind;
use jiff::civil::Date;

pub mod aggregator;
pub mod client;
pub mod error;
pub mod rates;
#[cfg(test)]
mod testing;

pub use aggregator::{Days, RateAggregator};
pub use client::{Connector, HttpConnector, PRIVATBANK_URL, RateClient};
pub use error::Error;
pub use rates::{DailyRates, DateKey};

const NO_DATA: &str = "Could not retrieve any exchange rate data.";

/// Get EUR and USD sale/purchase rates from PrivatBank for the last few days.
///
/// Days are counted back from today. Days without data for both currencies are left out.
#[derive(Parser)]
pub struct Cli {
    /// Number of days to fetch, including today (1 to 10)
    #[arg(value_name = "DAYS", allow_hyphen_values = true)]
    pub days: String,
}

/// Parse command line arguments into the requested day count.
///
/// Clap failures are mapped onto the tool's own messages. Integers too large for `i64` are
/// still integers, so they are reported as out of range.
pub fn parse_args<I, T>(args: I) -> Result<i64, Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => Error::Clap(e),
        ErrorKind::InvalidUtf8 => Error::NotInteger,
        _ => Error::Usage,
    })?;

    cli.days.trim().parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => Error::DaysOutOfRange(i64::MAX),
        IntErrorKind::NegOverflow => Error::DaysOutOfRange(i64::MIN),
        _ => Error::NotInteger,
    })
}

pub struct App<C = HttpConnector> {
    rates: RateAggregator<C>,
}

impl Default for App {
    fn default() -> Self {
        App::new(RateAggregator::default())
    }
}

impl<C: Connector> App<C> {
    pub fn new(rates: RateAggregator<C>) -> Self {
        App { rates }
    }

    /// Validate `days`, fetch the window ending at `today` and write the result to `out`.
    pub fn run<W: Write>(&self, days: i64, today: Date, out: &mut W) -> io::Result<()> {
        let days = match Days::try_from(days) {
            Ok(days) => days,
            Err(e) => return writeln!(out, "{e}"),
        };

        writeln!(out, "Fetching exchange rates for the last {days} days...")?;
        let rates = self.rates.get_exchange_rates(today, days);
        if rates.is_empty() {
            writeln!(out, "{NO_DATA}")
        } else {
            writeln!(out, "{}", serde_json::to_string_pretty(&rates)?)
        }
    }
}
