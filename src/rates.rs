use std::fmt;

use jiff::civil::Date;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::error::Error;

/// A calendar date in the `DD.MM.YYYY` form the PrivatBank API expects.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Date> for DateKey {
    fn from(date: Date) -> Self {
        DateKey(date.strftime("%d.%m.%Y").to_string())
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Currency {
    Eur,
    Usd,
}

impl Currency {
    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Body of the `exchange_rates` endpoint. Fields other than the rate list are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct RawResponse {
    #[serde(rename = "exchangeRate", default)]
    pub exchange_rate: Vec<CurrencyRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRecord {
    #[serde(default)]
    pub currency: String,
    // Absent for some currencies (UAH has NB rates only)
    pub sale_rate: Option<RateValue>,
    pub purchase_rate: Option<RateValue>,
}

/// A rate exactly as sent by the API, which uses both JSON strings and numbers.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RateValue {
    Text(String),
    Number(serde_json::Number),
}

impl fmt::Display for RateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateValue::Text(text) => f.write_str(text),
            RateValue::Number(number) => write!(f, "{number}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CurrencyQuote {
    pub sale: String,
    pub purchase: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DailyQuotes {
    #[serde(rename = "EUR")]
    pub eur: CurrencyQuote,
    #[serde(rename = "USD")]
    pub usd: CurrencyQuote,
}

/// EUR and USD quotes for one date. Serializes as `{ "<date>": { "EUR": .., "USD": .. } }`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DailyRates {
    pub date: DateKey,
    pub quotes: DailyQuotes,
}

impl Serialize for DailyRates {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.date, &self.quotes)?;
        map.end()
    }
}

/// Pick the EUR and USD sale/purchase rates out of a raw response.
///
/// Both currencies must be present with both rates, otherwise the date yields nothing.
pub fn extract_currency_rates(raw: &RawResponse, date: &DateKey) -> Result<DailyRates, Error> {
    Ok(DailyRates {
        date: date.clone(),
        quotes: DailyQuotes {
            eur: quote_for(raw, date, Currency::Eur)?,
            usd: quote_for(raw, date, Currency::Usd)?,
        },
    })
}

fn quote_for(
    raw: &RawResponse,
    date: &DateKey,
    currency: Currency,
) -> Result<CurrencyQuote, Error> {
    let record = raw
        .exchange_rate
        .iter()
        .find(|record| record.currency == currency.code())
        .ok_or_else(|| Error::MissingCurrency {
            date: date.clone(),
            currency,
        })?;

    let missing = |field| Error::MissingField {
        date: date.clone(),
        currency,
        field,
    };
    Ok(CurrencyQuote {
        sale: record
            .sale_rate
            .as_ref()
            .ok_or_else(|| missing("saleRate"))?
            .to_string(),
        purchase: record
            .purchase_rate
            .as_ref()
            .ok_or_else(|| missing("purchaseRate"))?
            .to_string(),
    })
}
