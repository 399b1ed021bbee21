use crate::{
    collectors::Extractor,
    error::CollectError,
    sink::PointSink,
};
use conviva_api::{
    ConvivaClient,
    Transport,
};
use conviva_collector_config::MetricRequest;
use std::time::Instant;

/// What one collection pass did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectionSummary {
    /// Queries issued against the API.
    pub queries: usize,
    /// Placeholder requests and blank dimension names.
    pub skipped: usize,
    pub points: usize,
}

/// Runs every configured metric request through the client and the extractor,
/// one query at a time.
#[derive(Debug)]
pub struct Orchestrator<T> {
    client: ConvivaClient<T>,
    extractor: Extractor,
}

impl<T: Transport> Orchestrator<T> {
    pub fn new(client: ConvivaClient<T>) -> Self {
        Self {
            client,
            extractor: Extractor::default(),
        }
    }

    pub fn with_extractor(mut self, extractor: Extractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn client(&self) -> &ConvivaClient<T> {
        &self.client
    }

    /// Collects `requests` in order into `sink`.
    ///
    /// The first failing query or rejected point aborts the pass. Points
    /// registered before the failure stay in the sink, so callers that
    /// publish must discard it on error.
    #[instrument(level = "debug", skip_all, fields(requests = requests.len()))]
    pub fn collect<S: PointSink + ?Sized>(
        &self,
        requests: &[MetricRequest],
        sink: &mut S,
    ) -> Result<CollectionSummary, CollectError> {
        let then = Instant::now();
        let mut summary = CollectionSummary::default();

        for request in requests {
            let Some(selection) = request.selection() else {
                debug!(?request, "request selects no metrics, skipping");
                summary.skipped += 1;
                continue;
            };

            let dimensions = request.dimensions();
            let blank = request.dimensions.len() - dimensions.len();
            if blank > 0 {
                debug!(%selection, blank, "skipping blank dimension names");
                summary.skipped += blank;
            }

            if dimensions.is_empty() {
                let data = self.client.collect_metrics(request)?.unwrap_or_default();
                summary.queries += 1;
                for snapshot in &data.time_series {
                    summary.points += self
                        .extractor
                        .extract(snapshot, sink)
                        .map_err(|source| CollectError::Sink {
                            query: selection.to_string(),
                            source,
                        })?;
                }
                debug!(%selection, snapshots = data.time_series.len(), "collected");
                continue;
            }

            for dimension in dimensions {
                let data = self
                    .client
                    .collect_metrics_by_dimension(request, dimension)?
                    .unwrap_or_default();
                summary.queries += 1;
                for snapshot in &data.time_series {
                    summary.points += self
                        .extractor
                        .extract_dimensional(snapshot, sink)
                        .map_err(|source| CollectError::Sink {
                            query: format!("{selection} by {dimension}"),
                            source,
                        })?;
                }
                debug!(%selection, %dimension, snapshots = data.time_series.len(), "collected");
            }
        }

        info!(
            queries = summary.queries,
            skipped = summary.skipped,
            points = summary.points,
            elapsed_ms = then.elapsed().as_millis() as u64,
            "collection pass done"
        );
        Ok(summary)
    }
}
