use crate::{
    collectors::{
        CollectionSummary,
        Orchestrator,
    },
    sink::Integration,
};
use conviva_api::{
    ConvivaClient,
    Transport,
};
use conviva_collector_config::MetricRequest;
use std::io::Write;

pub const INTEGRATION_NAME: &str = "com.newrelic.odp.conviva";

/// Collects `requests` into the host entity and publishes the payload to
/// `writer`. An empty request list still publishes an empty payload. Any
/// failure returns before anything is written.
pub fn run<T: Transport>(
    client: ConvivaClient<T>,
    requests: &[MetricRequest],
    writer: impl Write,
    pretty: bool,
) -> eyre::Result<CollectionSummary> {
    let mut integration = Integration::new(INTEGRATION_NAME, env!("CARGO_PKG_VERSION"));

    let summary = if requests.is_empty() {
        warn!("no metrics found to collect");
        CollectionSummary::default()
    } else {
        let summary = Orchestrator::new(client).collect(requests, integration.host_entity_mut())?;
        info!(points = summary.points, queries = summary.queries, "metrics collected");
        summary
    };

    integration.publish(writer, pretty)?;
    Ok(summary)
}
