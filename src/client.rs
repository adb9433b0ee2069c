use log::{debug, warn};
use ureq::Agent;

use crate::error::Error;
use crate::rates::{DateKey, RawResponse};

pub const PRIVATBANK_URL: &str = "https://api.privatbank.ua/p24api/exchange_rates";

/// Status and body of a completed GET request.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

/// A session able to issue GET requests.
pub trait Transport {
    fn request(&self, url: &str) -> Result<Reply, ureq::Error>;
}

impl Transport for Agent {
    fn request(&self, url: &str) -> Result<Reply, ureq::Error> {
        let mut resp = Agent::get(self, url).call()?;
        Ok(Reply {
            status: resp.status().as_u16(),
            body: resp.body_mut().read_to_string()?,
        })
    }
}

/// Opens the session shared by every request of one run.
pub trait Connector {
    type Session: Transport;

    fn connect(&self) -> Self::Session;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct HttpConnector;

impl Connector for HttpConnector {
    type Session = Agent;

    fn connect(&self) -> Agent {
        // Status codes are inspected by the client rather than surfaced as errors
        let config = Agent::config_builder().http_status_as_error(false).build();
        Agent::new_with_config(config)
    }
}

#[derive(Clone, Debug)]
pub struct RateClient {
    base_url: String,
}

impl Default for RateClient {
    fn default() -> Self {
        RateClient::with_base_url(PRIVATBANK_URL)
    }
}

impl RateClient {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        RateClient {
            base_url: base_url.into(),
        }
    }

    pub fn rate_url(&self, date: &DateKey) -> String {
        format!("{}?json&date={date}", self.base_url)
    }

    /// Fetch the raw exchange rates for a single date.
    ///
    /// Failures are logged and yield `None`; no request is retried.
    pub fn fetch_rate<T: Transport>(&self, session: &T, date: &DateKey) -> Option<RawResponse> {
        self.try_fetch_rate(session, date)
            .inspect_err(|e| warn!("{e}"))
            .ok()
    }

    fn try_fetch_rate<T: Transport>(
        &self,
        session: &T,
        date: &DateKey,
    ) -> Result<RawResponse, Error> {
        let url = self.rate_url(date);
        debug!("GET {url}");

        let reply = session.request(&url).map_err(|source| Error::Network {
            date: date.clone(),
            source,
        })?;
        if reply.status != 200 {
            return Err(Error::Status {
                status: reply.status,
                date: date.clone(),
            });
        }

        serde_json::from_str(&reply.body).map_err(|source| Error::Decode {
            date: date.clone(),
            source,
        })
    }
}
