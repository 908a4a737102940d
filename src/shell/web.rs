//! HTTP front end: the HTML form, a JSON API, and a health probe.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::info;

use super::page::{Outcome, render};
use crate::error::{FailureKind, PlanRequestError};
use crate::planner::{PlanHandler, UserProfile};

/// Shared state for planner routes.
#[derive(Clone)]
pub struct WebState {
    pub handler: Arc<PlanHandler>,
}

/// Build the planner router.
pub fn planner_routes(handler: Arc<PlanHandler>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/plan", post(submit_form))
        .route("/api/plan", post(api_plan))
        .route("/health", get(health))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(WebState { handler })
}

/// Bind `addr` and serve until the process exits.
pub async fn serve(
    addr: std::net::SocketAddr,
    handler: Arc<PlanHandler>,
) -> crate::error::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Planner web form listening");
    axum::serve(listener, planner_routes(handler)).await?;
    Ok(())
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health(State(state): State<WebState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "model": state.handler.model_name(),
        "busy": state.handler.is_busy(),
    }))
}

// ── HTML form ───────────────────────────────────────────────────────────

async fn index(State(state): State<WebState>) -> Html<String> {
    Html(render(
        state.handler.model_name(),
        &UserProfile::default(),
        &Outcome::Empty,
    ))
}

/// POST /plan
///
/// Runs the pipeline once. Failures render in the page (200) so the form
/// stays usable; an overlapping submit gets 409.
async fn submit_form(
    State(state): State<WebState>,
    Form(profile): Form<UserProfile>,
) -> Response {
    let profile = profile.clamped();
    let model = state.handler.model_name();

    match state.handler.on_generate_plan(profile.clone()).await {
        Ok(plan) => Html(render(model, &profile, &Outcome::Ready(&plan))).into_response(),
        Err(PlanRequestError::InFlight) => (
            StatusCode::CONFLICT,
            Html(render(model, &profile, &Outcome::Busy)),
        )
            .into_response(),
        Err(PlanRequestError::Generation(e)) => {
            let detail = format!("{e}\n\nkind: {}", kind_label(e.kind()));
            Html(render(model, &profile, &Outcome::Failed { detail: &detail })).into_response()
        }
    }
}

// ── JSON API ────────────────────────────────────────────────────────────

fn kind_label(kind: FailureKind) -> String {
    serde_json::to_value(kind)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default()
}

fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        FailureKind::InvalidRequest => StatusCode::BAD_REQUEST,
        FailureKind::Network
        | FailureKind::Auth
        | FailureKind::UnknownModel
        | FailureKind::MalformedResponse => StatusCode::BAD_GATEWAY,
    }
}

/// POST /api/plan
async fn api_plan(State(state): State<WebState>, Json(profile): Json<UserProfile>) -> Response {
    match state.handler.on_generate_plan(profile).await {
        Ok(plan) => Json(json!({
            "id": plan.id,
            "name": plan.name,
            "plan": plan.content,
            "usage": plan.usage,
            "estimated_cost": plan.estimated_cost,
            "generated_at": plan.generated_at,
        }))
        .into_response(),
        Err(PlanRequestError::InFlight) => (
            StatusCode::CONFLICT,
            Json(json!({
                "error": "plan generation already in progress",
                "kind": "in_flight",
            })),
        )
            .into_response(),
        Err(PlanRequestError::Generation(e)) => (
            status_for(e.kind()),
            Json(json!({
                "error": "plan generation failed",
                "kind": e.kind(),
                "stage": e.stage,
                "detail": e.source.to_string(),
            })),
        )
            .into_response(),
    }
}
