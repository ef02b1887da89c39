//! HTTP routes.
//!
//! | Method | Path | Handler |
//! |---|---|---|
//! | GET | `/.well-known/ssf-configuration` | [`ssf_configuration`] |
//! | POST | `/events` | [`ingest_event`] |
//! | GET | `/` | [`dashboard`] |
//! | GET | `/api/events` | [`event_history`] |
//! | GET | `/health` | [`health`] |

use crate::error::ReceiverError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde_json::{Value, json};
use ssf_caep::{DashboardView, EventHistory, SsfConfiguration, claim_text, validate};
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Build the router with all routes and the body limit applied.
pub fn router(state: AppState) -> Router {
    let body_limit = state.max_body_bytes();
    Router::new()
        .route("/", get(dashboard))
        .route("/events", post(ingest_event))
        .route("/api/events", get(event_history))
        .route("/.well-known/ssf-configuration", get(ssf_configuration))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Accept a pushed SET.
///
/// Appends at most one record. Any rejection leaves the log untouched.
pub async fn ingest_event(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Value>, ReceiverError> {
    let request_id = Uuid::new_v4();
    let span = info_span!("ingest_event", %request_id);

    span.in_scope(|| {
        let Json(payload) = payload.map_err(|rejection| {
            warn!(error = %rejection.body_text(), "Rejected undecodable body");
            ReceiverError::from(rejection)
        })?;

        let set = validate(&payload).map_err(|e| {
            warn!(error = %e, "Rejected malformed SET");
            ReceiverError::from(e)
        })?;

        info!(
            jti = %claim_text(set.jti()),
            issuer = %claim_text(set.iss()),
            "SET received"
        );
        let result = state.processor().process(set);
        info!(
            event_id = %result.event_id,
            decisions = result.decisions.len(),
            total_events = state.log().len(),
            "SET stored"
        );

        Ok(Json(json!({ "status": "received" })))
    })
}

/// Total count plus the ten most recent records, oldest first.
pub async fn event_history(State(state): State<AppState>) -> Json<EventHistory> {
    Json(EventHistory::from_log(state.log()))
}

/// HTML dashboard.
pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let view = DashboardView::from_log(state.log());
    Html(view.render(Utc::now(), state.dashboard_refresh_seconds()))
}

/// SSF configuration metadata.
pub async fn ssf_configuration(State(state): State<AppState>) -> Json<SsfConfiguration> {
    Json(state.discovery().clone())
}

/// Liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
