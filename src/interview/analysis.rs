//! # Background Answer Analysis
//!
//! Weakness analysis runs outside the request/response cycle:
//!
//! ```text
//! submit-answer ──submit()──> [unbounded channel] ──worker──> spawn(job)
//!                                                              │
//!                                       engine.analyze_answer()│
//!                                                              ▼
//!                                            AnalysisCallback::on_complete()
//! ```
//!
//! `submit` never waits. Each job runs in its own task, so a slow analysis
//! does not hold up the ones behind it. Outcomes are delivered exactly once
//! to the callback; nothing is retried.

use super::engine::InterviewEngine;
use super::session::InterviewSession;
use super::store::SessionStore;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// One answer waiting for analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisJob {
    pub session_id: String,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    /// One-sentence weakness produced by the model
    Weakness(String),
    /// Analysis failed; the message is for logs only
    Failed(String),
}

/// Completion contract of the analysis queue.
#[async_trait]
pub trait AnalysisCallback: Send + Sync {
    async fn on_complete(&self, job: &AnalysisJob, outcome: AnalysisOutcome);
}

#[derive(Debug, Default)]
struct AnalysisStats {
    submitted: AtomicU64,
    completed: AtomicU64,
    failed: AtomicU64,
    in_flight: AtomicUsize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisStatsSnapshot {
    pub submitted: u64,
    pub completed: u64,
    pub failed: u64,
    pub in_flight: usize,
}

/// Handle used by request handlers to enqueue analyses.
#[derive(Clone)]
pub struct AnalysisQueue {
    sender: mpsc::UnboundedSender<AnalysisJob>,
    stats: Arc<AnalysisStats>,
}

impl AnalysisQueue {
    /// Spawn the worker task. Must be called from within a Tokio runtime.
    pub fn start(
        engine: InterviewEngine,
        callback: Arc<dyn AnalysisCallback>,
    ) -> (Self, JoinHandle<()>) {
        let (sender, mut receiver) = mpsc::unbounded_channel::<AnalysisJob>();
        let stats = Arc::new(AnalysisStats::default());
        let worker_stats = stats.clone();

        let worker = tokio::spawn(async move {
            while let Some(job) = receiver.recv().await {
                let engine = engine.clone();
                let callback = callback.clone();
                let stats = worker_stats.clone();
                tokio::spawn(async move {
                    run_job(&engine, callback.as_ref(), &stats, job).await;
                });
            }
            info!("Analysis queue closed");
        });

        (Self { sender, stats }, worker)
    }

    /// Enqueue `job` without waiting. Returns `false` if the worker is gone.
    pub fn submit(&self, job: AnalysisJob) -> bool {
        self.stats.in_flight.fetch_add(1, Ordering::SeqCst);
        match self.sender.send(job) {
            Ok(()) => {
                self.stats.submitted.fetch_add(1, Ordering::Relaxed);
                true
            }
            Err(mpsc::error::SendError(job)) => {
                self.stats.in_flight.fetch_sub(1, Ordering::SeqCst);
                warn!(session_id = %job.session_id, "Analysis queue closed, dropping job");
                false
            }
        }
    }

    pub fn stats(&self) -> AnalysisStatsSnapshot {
        AnalysisStatsSnapshot {
            submitted: self.stats.submitted.load(Ordering::Relaxed),
            completed: self.stats.completed.load(Ordering::Relaxed),
            failed: self.stats.failed.load(Ordering::Relaxed),
            in_flight: self.stats.in_flight.load(Ordering::SeqCst),
        }
    }
}

async fn run_job(
    engine: &InterviewEngine,
    callback: &dyn AnalysisCallback,
    stats: &AnalysisStats,
    job: AnalysisJob,
) {
    let outcome = match engine.analyze_answer(&job.question, &job.answer).await {
        Ok(weakness) => {
            stats.completed.fetch_add(1, Ordering::Relaxed);
            AnalysisOutcome::Weakness(weakness)
        }
        Err(e) => {
            stats.failed.fetch_add(1, Ordering::Relaxed);
            AnalysisOutcome::Failed(format!("{:#}", e))
        }
    };
    callback.on_complete(&job, outcome).await;
    stats.in_flight.fetch_sub(1, Ordering::SeqCst);
}

/// Writes analysis results back into the session store.
///
/// The matching entry is found by question and answer text; with duplicate
/// pairs the earliest entry is the one updated.
pub struct StoreWeaknessWriter {
    store: Arc<dyn SessionStore>,
}

impl StoreWeaknessWriter {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl AnalysisCallback for StoreWeaknessWriter {
    async fn on_complete(&self, job: &AnalysisJob, outcome: AnalysisOutcome) {
        let weakness = match outcome {
            AnalysisOutcome::Weakness(weakness) => weakness,
            AnalysisOutcome::Failed(reason) => {
                warn!(session_id = %job.session_id, "Answer analysis failed: {}", reason);
                return;
            }
        };

        let question = job.question.clone();
        let answer = job.answer.clone();
        let session_id = job.session_id.clone();
        let update = Box::new(move |session: &mut InterviewSession| {
            if !session.apply_weakness(&question, &answer, &weakness) {
                debug!(session_id = %session_id, "No history entry matched analyzed answer");
            }
        });

        match self.store.update(&job.session_id, update).await {
            Ok(true) => debug!(session_id = %job.session_id, "Weakness recorded"),
            Ok(false) => debug!(session_id = %job.session_id, "Session gone before analysis finished"),
            Err(e) => warn!(session_id = %job.session_id, "Failed to record weakness: {:#}", e),
        }
    }
}

#[cfg(test)]
pub(crate) async fn wait_for_idle(queue: &AnalysisQueue) {
    for _ in 0..200 {
        if queue.stats().in_flight == 0 {
            return;
        }
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    panic!("analysis queue did not drain");
}
