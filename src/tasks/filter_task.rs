use std::collections::BTreeMap;
use std::io::{Error, ErrorKind};
use std::sync::mpsc::Sender;
use std::time::Instant;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::evaluation::{FilterEvaluator, FilterTrace, Snapshot, TracePoint};
use crate::filters::{ScalarKalmanFilter, UpdateMode, is_missing};
use crate::models::MotionModel;
use crate::streams::SampleStream;

/// Drives one filter over one stream: predict, gain, update for every sample.
///
/// Every processed sample lands in the [`FilterTrace`] and is handed to the
/// evaluator. A [`Snapshot`] is taken every `report_frequency` samples and
/// once more at the end. The progress channel, if any, is closed when
/// [`run`](Self::run) returns.
pub struct FilterTask {
    filter: ScalarKalmanFilter,
    stream: Box<dyn SampleStream>,
    model: Box<dyn MotionModel>,
    mode: UpdateMode,
    evaluator: Box<dyn FilterEvaluator>,

    trace: FilterTrace,
    snapshots: Vec<Snapshot>,

    max_samples: Option<u64>,
    report_frequency: u64,

    processed: u64,
    skipped: u64,
    started_at: Option<DateTime<Utc>>,
    start_time: Instant,

    progress_tx: Option<Sender<Snapshot>>,
}

impl FilterTask {
    pub fn new(
        filter: ScalarKalmanFilter,
        stream: Box<dyn SampleStream>,
        model: Box<dyn MotionModel>,
        mode: UpdateMode,
        evaluator: Box<dyn FilterEvaluator>,
        max_samples: Option<u64>,
        report_frequency: u64,
    ) -> Result<Self, Error> {
        if report_frequency == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "report_frequency must be > 0",
            ));
        }

        Ok(Self {
            filter,
            stream,
            model,
            mode,
            evaluator,
            trace: FilterTrace::default(),
            snapshots: Vec::new(),
            max_samples,
            report_frequency,
            processed: 0,
            skipped: 0,
            started_at: None,
            start_time: Instant::now(),
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<Snapshot>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn run(&mut self) -> Result<(), Error> {
        let outcome = self.drive();
        self.progress_tx = None;
        outcome
    }

    fn drive(&mut self) -> Result<(), Error> {
        self.start_time = Instant::now();
        self.started_at = Some(Utc::now());
        info!(
            stream = self.stream.name(),
            mode = ?self.mode,
            max_samples = ?self.max_samples,
            "filter task started"
        );

        while self.stream.has_more_samples() {
            if let Some(n) = self.max_samples {
                if self.processed >= n {
                    break;
                }
            }
            let Some(sample) = self.stream.next_sample() else {
                break;
            };

            self.filter.predict(self.model.as_ref());
            let gain = self.filter.compute_gain();
            let innovation = self.filter.innovation(sample.value, self.mode);
            let innovation_variance = self.filter.innovation_variance();
            let estimate = self
                .filter
                .update_with(self.mode, sample.value)
                .map_err(Error::other)?;

            let skipped = is_missing(sample.value);
            if skipped {
                self.skipped += 1;
            }

            let point = TracePoint {
                index: sample.index,
                input: sample.value,
                estimate,
                error_variance: self.filter.error_variance(),
                gain,
                innovation,
                innovation_variance,
                skipped,
            };
            self.evaluator.add_result(&sample, &point);
            self.trace.push(point);
            self.processed += 1;

            if self.processed % self.report_frequency == 0 {
                self.push_snapshot();
            }
        }

        self.push_snapshot();
        info!(
            processed = self.processed,
            skipped = self.skipped,
            estimate = self.filter.estimate(),
            error_variance = self.filter.error_variance(),
            "filter task finished"
        );
        Ok(())
    }

    pub fn trace(&self) -> &FilterTrace {
        &self.trace
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn filter(&self) -> &ScalarKalmanFilter {
        &self.filter
    }

    pub fn mode(&self) -> UpdateMode {
        self.mode
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    /// Wall clock time at which [`run`](Self::run) started, RFC 3339.
    pub fn started_at(&self) -> Option<String> {
        self.started_at.map(|t| t.to_rfc3339())
    }

    pub fn evaluator(&self) -> &dyn FilterEvaluator {
        self.evaluator.as_ref()
    }

    fn push_snapshot(&mut self) {
        let metrics: BTreeMap<String, f64> = self
            .evaluator
            .performance()
            .into_iter()
            .map(|m| (m.name, m.value))
            .collect();

        let snapshot = Snapshot {
            samples_seen: self.processed,
            estimate: self.filter.estimate(),
            error_variance: self.filter.error_variance(),
            seconds: self.start_time.elapsed().as_secs_f64(),
            metrics,
        };
        debug!(%snapshot, "progress");

        if let Some(tx) = &self.progress_tx {
            let _ = tx.send(snapshot.clone());
        }
        self.snapshots.push(snapshot);
    }
}
