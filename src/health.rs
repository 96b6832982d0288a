//! Operational endpoints: liveness summary and per-route metrics.

use crate::state::{AppMetrics, AppState};
use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::warn;

fn error_rate(metrics: &AppMetrics) -> f64 {
    if metrics.request_count > 0 {
        metrics.error_count as f64 / metrics.request_count as f64
    } else {
        0.0
    }
}

/// Live sessions, or `None` when the store cannot be queried.
async fn active_sessions(state: &AppState) -> Option<usize> {
    match state.sessions.count().await {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("Session store unavailable: {:#}", e);
            None
        }
    }
}

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let metrics = state.get_metrics_snapshot();
    let sessions = active_sessions(&state).await;
    let analysis = state.analysis.stats();

    HttpResponse::Ok().json(json!({
        "status": if sessions.is_some() { "healthy" } else { "degraded" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": state.get_uptime_seconds(),
        "service": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "environment": state.config.server.environment,
        },
        "metrics": {
            "total_requests": metrics.request_count,
            "total_errors": metrics.error_count,
            "error_rate": error_rate(&metrics),
        },
        "interviews": {
            "active_sessions": sessions,
            "started": metrics.interviews_started,
            "answers_submitted": metrics.answers_submitted,
        },
        "analysis": analysis,
        "models": {
            "chat": state.config.openai.chat_model,
            "summary": state.config.openai.summary_model,
            "speech": state.config.openai.tts_model,
        }
    }))
}

pub async fn detailed_metrics(state: web::Data<AppState>) -> HttpResponse {
    let metrics = state.get_metrics_snapshot();
    let uptime_seconds = state.get_uptime_seconds();

    let mut endpoint_stats: Vec<_> = metrics
        .endpoint_metrics
        .iter()
        .map(|(endpoint, metric)| {
            json!({
                "endpoint": endpoint,
                "request_count": metric.request_count,
                "error_count": metric.error_count,
                "error_rate": metric.error_rate(),
                "average_duration_ms": metric.average_duration_ms(),
                "total_duration_ms": metric.total_duration_ms
            })
        })
        .collect();
    endpoint_stats.sort_by(|a, b| a["endpoint"].as_str().cmp(&b["endpoint"].as_str()));

    HttpResponse::Ok().json(json!({
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime_seconds": uptime_seconds,
        "overall": {
            "total_requests": metrics.request_count,
            "total_errors": metrics.error_count,
            "error_rate": error_rate(&metrics),
            "requests_per_second": if uptime_seconds > 0 {
                metrics.request_count as f64 / uptime_seconds as f64
            } else {
                0.0
            }
        },
        "interviews": {
            "active_sessions": active_sessions(&state).await,
            "started": metrics.interviews_started,
            "answers_submitted": metrics.answers_submitted,
        },
        "analysis": state.analysis.stats(),
        "endpoints": endpoint_stats
    }))
}
