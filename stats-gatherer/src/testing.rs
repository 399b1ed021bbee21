//! Scripted API responses for collection tests.

use conviva_api::{
    ConvivaClient,
    Transport,
};
use conviva_collector_config::{
    CollectorConfig,
    Credentials,
    FileConfig,
};
use std::{
    cell::RefCell,
    collections::VecDeque,
};
use url::Url;

/// Answers fetches with queued bodies, recording every URL. An empty queue
/// answers `{}`.
#[derive(Default)]
pub struct ScriptedTransport {
    bodies: RefCell<VecDeque<conviva_api::Result<&'static str>>>,
    fetched: RefCell<Vec<Url>>,
}

impl ScriptedTransport {
    pub fn paths(&self) -> Vec<String> {
        self.fetched.borrow().iter().map(|url| url.path().to_string()).collect()
    }
}

impl Transport for ScriptedTransport {
    fn fetch(&self, url: &Url) -> conviva_api::Result<Vec<u8>> {
        self.fetched.borrow_mut().push(url.clone());
        let body = self.bodies.borrow_mut().pop_front().unwrap_or(Ok("{}"))?;
        Ok(body.as_bytes().to_vec())
    }
}

pub fn scripted_client(bodies: Vec<conviva_api::Result<&'static str>>) -> ConvivaClient<ScriptedTransport> {
    let file = FileConfig {
        api_v3_url: Some("https://api.example.test/insights/3.0".to_string()),
        ..FileConfig::default()
    };
    let config = CollectorConfig::new(&file, Credentials::default()).unwrap();
    let transport = ScriptedTransport {
        bodies: RefCell::new(bodies.into()),
        ..ScriptedTransport::default()
    };
    ConvivaClient::new(config, transport)
}

pub fn transport_error(message: &'static str) -> conviva_api::Error {
    let url = Url::parse("https://api.example.test/").unwrap();
    conviva_api::Error::transport(&url, message)
}
