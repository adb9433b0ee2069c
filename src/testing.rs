//! In-memory transport with canned replies per date.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::io;
use std::rc::Rc;

use crate::client::{Connector, Reply, Transport};

pub const SAMPLE_BODY: &str = r#"{"exchangeRate":[{"currency":"EUR","saleRate":"41.0","purchaseRate":"40.5"},{"currency":"USD","saleRate":"37.2","purchaseRate":"36.8"}]}"#;
pub const EUR_ONLY_BODY: &str =
    r#"{"exchangeRate":[{"currency":"EUR","saleRate":"41.0","purchaseRate":"40.5"}]}"#;

#[derive(Clone, Debug)]
pub enum Canned {
    /// HTTP 200 with this body
    Body(String),
    Status(u16),
    Refused,
}

#[derive(Default)]
struct State {
    default: Option<Canned>,
    by_date: HashMap<String, Canned>,
    requests: RefCell<Vec<String>>,
    opened: Cell<usize>,
    closed: Cell<usize>,
}

#[derive(Clone)]
pub struct MockConnector(Rc<RefCell<State>>);

impl MockConnector {
    pub fn new(default: Canned) -> Self {
        MockConnector(Rc::new(RefCell::new(State {
            default: Some(default),
            ..State::default()
        })))
    }

    /// Reply to requests for `date` (`DD.MM.YYYY`) with `canned` instead of the default.
    pub fn respond(self, date: &str, canned: Canned) -> Self {
        self.0.borrow_mut().by_date.insert(date.to_string(), canned);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.0.borrow().requests.borrow().clone()
    }

    pub fn opened(&self) -> usize {
        self.0.borrow().opened.get()
    }

    pub fn closed(&self) -> usize {
        self.0.borrow().closed.get()
    }
}

impl Connector for MockConnector {
    type Session = MockSession;

    fn connect(&self) -> MockSession {
        let state = self.0.borrow();
        state.opened.set(state.opened.get() + 1);
        MockSession(self.0.clone())
    }
}

pub struct MockSession(Rc<RefCell<State>>);

impl Transport for MockSession {
    fn request(&self, url: &str) -> Result<Reply, ureq::Error> {
        let state = self.0.borrow();
        state.requests.borrow_mut().push(url.to_string());

        let date = url.rsplit("date=").next().unwrap_or_default();
        let canned = state
            .by_date
            .get(date)
            .or(state.default.as_ref())
            .cloned()
            .unwrap_or(Canned::Status(404));
        match canned {
            Canned::Body(body) => Ok(Reply { status: 200, body }),
            Canned::Status(status) => Ok(Reply {
                status,
                body: String::new(),
            }),
            Canned::Refused => Err(ureq::Error::Io(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        }
    }
}

impl Drop for MockSession {
    fn drop(&mut self) {
        let state = self.0.borrow();
        state.closed.set(state.closed.get() + 1);
    }
}
