use crate::{
    error::{
        Error,
        Result,
    },
    query::QueryBuilder,
    types::{
        DimensionalMetricData,
        MetricData,
    },
};
use conviva_collector_config::{
    CollectorConfig,
    Credentials,
    MetricRequest,
};
use serde::de::DeserializeOwned;
use std::time::{
    Duration,
    Instant,
};
use url::Url;

/// Performs one authenticated GET and returns the raw body.
pub trait Transport {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Blocking HTTP transport using basic auth with the API client credentials.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    credentials: Credentials,
}

impl HttpTransport {
    pub fn new(credentials: Credentials, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("conviva-collector/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client, credentials })
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        let then = Instant::now();
        debug!(%url, "making metrics request");

        let response = self
            .client
            .get(url.clone())
            .basic_auth(&self.credentials.client_id, Some(&self.credentials.client_secret))
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(|e| Error::transport(url, e))?;
        let body = response.bytes().map_err(|e| Error::transport(url, e))?;

        debug!(%url, elapsed_ms = then.elapsed().as_millis() as u64, bytes = body.len(), "metrics request done");
        Ok(body.to_vec())
    }
}

/// Builds queries for metric requests, fetches them and decodes the responses.
#[derive(Debug)]
pub struct ConvivaClient<T> {
    config: CollectorConfig,
    transport: T,
}

impl ConvivaClient<HttpTransport> {
    pub fn http(config: CollectorConfig) -> Result<Self, reqwest::Error> {
        let transport = HttpTransport::new(config.credentials.clone(), config.request_timeout)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> ConvivaClient<T> {
    pub fn new(config: CollectorConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetches `request` without a dimension breakdown.
    ///
    /// `Ok(None)` means the request selects no metrics and nothing was fetched.
    pub fn collect_metrics(&self, request: &MetricRequest) -> Result<Option<MetricData>> {
        self.fetch_decoded(request, None)
    }

    /// Fetches `request` broken out by `dimension`.
    pub fn collect_metrics_by_dimension(
        &self,
        request: &MetricRequest,
        dimension: &str,
    ) -> Result<Option<DimensionalMetricData>> {
        self.fetch_decoded(request, Some(dimension))
    }

    fn fetch_decoded<D: DeserializeOwned>(&self, request: &MetricRequest, dimension: Option<&str>) -> Result<Option<D>> {
        let Some(query) = QueryBuilder::new(&self.config).build(request, dimension)? else {
            return Ok(None);
        };
        debug!(endpoint = %query.endpoint, url = %query.url, "query built");

        let body = self.transport.fetch(&query.url)?;
        decode(&query.url, &body).map(Some)
    }
}

fn decode<D: DeserializeOwned>(url: &Url, body: &[u8]) -> Result<D> {
    let then = Instant::now();
    let data = serde_json::from_slice(body).map_err(|source| Error::Decode {
        url: url.clone(),
        source,
    })?;
    debug!(elapsed_ms = then.elapsed().as_millis() as u64, "response decoded");
    Ok(data)
}
