use futures::stream::{self, StreamExt};
use tidemark_core::{
    AttributionSink, EventFailure, NewsEvent, ProcessReport, StoreOutcome, TidemarkError,
};

use crate::Tidemark;

enum EventOutcome {
    Stored(StoreOutcome),
    Empty,
    Failed(TidemarkError),
}

impl Tidemark {
    /// Attribute every event and hand non-empty results to `sink`.
    ///
    /// Behavior and trade-offs:
    /// - Up to `max_concurrency` events are in flight at once; each event still
    ///   walks its tiers sequentially.
    /// - Events for which no tier had data are counted as `empty` and are not
    ///   stored.
    /// - Provider and sink failures are recorded per event in input order and
    ///   never abort the batch.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tidemark::router::process_events",
            skip(self, events, sink),
            fields(events = events.len()),
        )
    )]
    pub async fn process_events(
        &self,
        events: &[NewsEvent],
        sink: &dyn AttributionSink,
    ) -> ProcessReport {
        let mut outcomes: Vec<(usize, EventOutcome)> = stream::iter(events.iter().enumerate())
            .map(|(i, ev)| async move { (i, self.attribute_event(ev, sink).await) })
            .buffer_unordered(self.cfg.max_concurrency.max(1))
            .collect()
            .await;
        outcomes.sort_by_key(|(i, _)| *i);

        let mut report = ProcessReport::default();
        for (i, outcome) in outcomes {
            report.processed += 1;
            match outcome {
                EventOutcome::Stored(stored) => {
                    report.attributed += 1;
                    report.inserted += stored.inserted;
                    report.skipped += stored.skipped;
                }
                EventOutcome::Empty => report.empty += 1,
                EventOutcome::Failed(error) => {
                    let ev = &events[i];
                    #[cfg(feature = "tracing")]
                    tracing::warn!(event = %ev.id, symbol = %ev.symbol, error = %error, "event skipped");
                    report.failures.push(EventFailure {
                        event_id: ev.id.clone(),
                        symbol: ev.symbol.clone(),
                        error,
                    });
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::info!(
            processed = report.processed,
            attributed = report.attributed,
            empty = report.empty,
            inserted = report.inserted,
            skipped = report.skipped,
            failed = report.failures.len(),
            "batch finished"
        );
        report
    }

    async fn attribute_event(&self, ev: &NewsEvent, sink: &dyn AttributionSink) -> EventOutcome {
        let result = match self.attribute(&ev.symbol, ev.published_at).await {
            Ok(r) => r,
            Err(e) => return EventOutcome::Failed(e),
        };
        if result.is_empty() {
            return EventOutcome::Empty;
        }
        match sink.store(ev, &result).await {
            Ok(stored) => EventOutcome::Stored(stored),
            Err(e) => EventOutcome::Failed(e),
        }
    }
}
