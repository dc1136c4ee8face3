//! The per-run consumption loop.
//!
//! A [`RunDigest`] owns every piece of mutable state for one run: the schema
//! registry, the classifier, and the output accumulator. Envelopes are
//! consumed one at a time and each is fully processed before the next; state
//! is valid and readable between any two envelopes, so a cancelled stream
//! still leaves a usable digest.

use chrono::{DateTime, Utc};
use rd_common::{run_slug, Envelope, EnvelopeKind, RunRecord};
use rd_config::DigestConfig;
use rd_merge::{AggregatedOutput, FragmentMerger};
use rd_project::ValueProjector;
use rd_schema::{EventSummary, SchemaRegistry};
use serde::Serialize;
use tracing::{debug, info};

use crate::classify::{node_label, EventClassifier, Route};
use crate::logging::generate_correlation_id;

/// Counts of how envelopes were routed.
///
/// Every consumed envelope lands in exactly one of the route counters, so
/// their sum always equals `envelopes`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DigestStats {
    pub envelopes: u64,
    pub metadata: u64,
    pub nested: u64,
    pub delta_folds: u64,
    pub completion_folds: u64,
    pub ignored: u64,
}

/// Everything a finished digest hands to persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct DigestOutcome {
    pub schema: Vec<EventSummary>,
    pub record: RunRecord,
}

/// State for digesting one run.
#[derive(Debug)]
pub struct RunDigest {
    correlation_id: String,
    started_at: DateTime<Utc>,
    classifier: EventClassifier,
    registry: SchemaRegistry,
    snapshot: ValueProjector,
    preview: ValueProjector,
    output: AggregatedOutput,
    run_id: Option<String>,
    stats: DigestStats,
}

impl RunDigest {
    pub fn new(run_identifier: impl Into<String>, config: &DigestConfig) -> Self {
        let run_identifier = run_identifier.into();
        let correlation_id = generate_correlation_id();
        debug!(
            digest = %correlation_id,
            run_identifier = %run_identifier,
            "digest started"
        );
        Self {
            correlation_id,
            started_at: Utc::now(),
            classifier: EventClassifier::new(run_identifier, config.routing.clone()),
            registry: SchemaRegistry::new(config.schema.clone(), config.preview),
            snapshot: ValueProjector::new(config.snapshot),
            preview: ValueProjector::new(config.preview),
            output: AggregatedOutput::new(FragmentMerger::new(config.merge)),
            run_id: None,
            stats: DigestStats::default(),
        }
    }

    /// Override the run start time used for the run slug.
    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = started_at;
        self
    }

    /// Consume one envelope.
    pub fn consume(&mut self, envelope: &Envelope) {
        self.stats.envelopes += 1;
        self.log_node_output(envelope);
        self.registry.record(&envelope.kind, &envelope.data);

        match self.classifier.route(envelope) {
            Route::RunId(run_id) => {
                self.stats.metadata += 1;
                if self.run_id.as_deref() != Some(run_id.as_str()) {
                    info!(digest = %self.correlation_id, run_id = %run_id, "run id assigned");
                }
                self.run_id = Some(run_id);
            }
            Route::Delta(chunk) => {
                self.stats.delta_folds += 1;
                self.output.fold_delta(self.snapshot.project(chunk));
            }
            Route::Completion(payload) => {
                self.stats.completion_folds += 1;
                self.output.fold_final(self.snapshot.project(payload));
            }
            Route::Nested => self.stats.nested += 1,
            Route::Ignored => self.stats.ignored += 1,
        }
    }

    /// Consume envelopes until the source is exhausted.
    pub fn consume_all<I>(&mut self, envelopes: I)
    where
        I: IntoIterator<Item = Envelope>,
    {
        for envelope in envelopes {
            self.consume(&envelope);
        }
    }

    /// Node outputs are logged for every end event, nested or not.
    fn log_node_output(&self, envelope: &Envelope) {
        if envelope.kind() != EnvelopeKind::Events || !self.classifier.is_end_event(&envelope.data) {
            return;
        }
        let Some(outputs) = envelope
            .data
            .pointer(&["data", "outputs"])
            .filter(|v| !v.is_nullish())
        else {
            return;
        };
        let rendered = self.preview.render(outputs).unwrap_or_default();
        info!(
            digest = %self.correlation_id,
            node = %node_label(&envelope.data),
            outputs = %rendered,
            "node output"
        );
    }

    pub fn correlation_id(&self) -> &str {
        &self.correlation_id
    }

    pub fn run_identifier(&self) -> &str {
        self.classifier.run_identifier()
    }

    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    pub fn output(&self) -> Option<&serde_json::Value> {
        self.output.get()
    }

    pub fn schema(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn stats(&self) -> &DigestStats {
        &self.stats
    }

    pub fn run_slug(&self) -> String {
        run_slug(self.started_at)
    }

    /// Close the digest and produce its artifacts.
    pub fn finish(self, recorded_at: DateTime<Utc>) -> DigestOutcome {
        info!(
            digest = %self.correlation_id,
            envelopes = self.stats.envelopes,
            delta_folds = self.stats.delta_folds,
            completion_folds = self.stats.completion_folds,
            event_types = self.registry.len(),
            "digest finished"
        );
        let record = RunRecord {
            run_identifier: self.classifier.run_identifier().to_string(),
            run_slug: run_slug(self.started_at),
            recorded_at,
            run_id: self.run_id,
            output: self.output.into_inner(),
        };
        DigestOutcome {
            schema: self.registry.summaries(),
            record,
        }
    }
}
