//! # Application State Management
//!
//! Shared state handed to every HTTP request handler through `web::Data`.
//!
//! ## What lives here:
//! - **config**: immutable after startup
//! - **sessions**: the interview session store (a trait object, so the
//!   in-memory store can be swapped out)
//! - **engine / speech**: the completion and speech collaborators, wrapped in
//!   the interview logic that uses them
//! - **analysis**: handle to the background weakness-analysis queue
//! - **clock**: time source used for every timing decision
//! - **cookie_key**: signing key for the session cookie
//! - **metrics**: request and interview counters
//!
//! ## Arc<RwLock<T>> Pattern
//! Metrics are written by every request, so they sit behind `Arc<RwLock<_>>`:
//! many readers or one writer at a time. Everything else is either immutable
//! or already shareable (`Arc<dyn ...>`), so cloning `AppState` is cheap.

use crate::config::AppConfig;
use crate::interview::{
    AnalysisQueue, Clock, InMemorySessionStore, InterviewEngine, SessionStore, SpeechAdapter,
    StoreWeaknessWriter, SystemClock,
};
use crate::llm::{CompletionClient, OpenAiClient, SpeechClient};
use actix_web::cookie::Key;
use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub metrics: Arc<RwLock<AppMetrics>>,
    pub sessions: Arc<dyn SessionStore>,
    pub engine: InterviewEngine,
    pub speech: SpeechAdapter,
    pub analysis: AnalysisQueue,
    pub clock: Arc<dyn Clock>,
    pub cookie_key: Key,
    /// When the server started (never changes, so no Arc<RwLock> needed)
    pub start_time: Instant,
}

/// Counters collected across all HTTP requests.
#[derive(Debug, Default, Clone)]
pub struct AppMetrics {
    /// Total number of HTTP requests processed since server start
    pub request_count: u64,

    /// Total number of 4xx/5xx responses since server start
    pub error_count: u64,

    /// Interviews started since server start
    pub interviews_started: u64,

    /// Answers accepted since server start
    pub answers_submitted: u64,

    /// Key: endpoint name (e.g., "GET /api/next-question")
    pub endpoint_metrics: HashMap<String, EndpointMetric>,
}

/// Detailed performance metrics for a specific API endpoint.
#[derive(Debug, Default, Clone)]
pub struct EndpointMetric {
    pub request_count: u64,
    pub total_duration_ms: u64,
    pub error_count: u64,
}

impl AppState {
    /// Build the production state: OpenAI-compatible collaborators, in-memory
    /// session store and the wall clock.
    ///
    /// Spawns the analysis worker, so this must run inside the async runtime.
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = Arc::new(OpenAiClient::new(&config.openai)?);
        Ok(Self::with_components(
            config,
            client.clone(),
            client,
            Arc::new(SystemClock),
        ))
    }

    /// Assemble state from explicit collaborators.
    pub fn with_components(
        config: AppConfig,
        completion: Arc<dyn CompletionClient>,
        speech: Arc<dyn SpeechClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let sessions: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(
            config.session.max_age_secs,
            clock.clone(),
        ));
        let engine = InterviewEngine::new(
            completion,
            config.openai.chat_model.clone(),
            config.openai.summary_model.clone(),
        );
        let (analysis, _worker) = AnalysisQueue::start(
            engine.clone(),
            Arc::new(StoreWeaknessWriter::new(sessions.clone())),
        );

        Self {
            speech: SpeechAdapter::new(speech, &config),
            cookie_key: Key::derive_from(config.session.secret.as_bytes()),
            config: Arc::new(config),
            metrics: Arc::new(RwLock::new(AppMetrics::default())),
            sessions,
            engine,
            analysis,
            clock,
            start_time: Instant::now(),
        }
    }

    /// Increment the total request counter (called by middleware for every request).
    pub fn increment_request_count(&self) {
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.request_count += 1;
        }
    }

    /// Increment the total error counter (called when any request fails).
    pub fn increment_error_count(&self) {
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.error_count += 1;
        }
    }

    /// Record detailed metrics for a specific endpoint.
    ///
    /// The first time we see an endpoint, a new EndpointMetric is created with
    /// default values; later requests update it.
    pub fn record_endpoint_request(&self, endpoint: &str, duration_ms: u64, is_error: bool) {
        if let Ok(mut metrics) = self.metrics.write() {
            let endpoint_metric = metrics.endpoint_metrics.entry(endpoint.to_string()).or_default();
            endpoint_metric.request_count += 1;
            endpoint_metric.total_duration_ms += duration_ms;
            if is_error {
                endpoint_metric.error_count += 1;
            }
        }
    }

    pub fn record_interview_started(&self) {
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.interviews_started += 1;
        }
    }

    pub fn record_answer_submitted(&self) {
        if let Ok(mut metrics) = self.metrics.write() {
            metrics.answers_submitted += 1;
        }
    }

    /// Get a snapshot of current metrics (used for the /metrics endpoint).
    ///
    /// Cloning releases the lock before the response is serialized.
    pub fn get_metrics_snapshot(&self) -> AppMetrics {
        self.metrics
            .read()
            .map(|metrics| metrics.clone())
            .unwrap_or_default()
    }

    /// Get server uptime in seconds.
    pub fn get_uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl EndpointMetric {
    /// Average = Total Duration ÷ Number of Requests
    pub fn average_duration_ms(&self) -> f64 {
        if self.request_count > 0 {
            self.total_duration_ms as f64 / self.request_count as f64
        } else {
            0.0
        }
    }

    /// Error Rate = Number of Errors ÷ Total Requests (0.0 to 1.0)
    pub fn error_rate(&self) -> f64 {
        if self.request_count > 0 {
            self.error_count as f64 / self.request_count as f64
        } else {
            0.0
        }
    }
}
