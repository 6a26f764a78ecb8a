use crate::db_storage::LeadStorage;
use crate::errors::AppError;
use crate::lead_forwarder::LeadForwarder;
use crate::models::{ForwardedLead, Lead, RawSubmission};
use crate::validation::{validate_submission, FormVariant};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use utoipa::IntoParams;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Lead persistence, wrapping the database pool.
    pub storage: LeadStorage,
    /// Best-effort external forwarding (None when no webhook is configured).
    pub forwarder: Option<LeadForwarder>,
}

/// Query parameters of the submission endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubmissionQuery {
    /// Which form produced the submission. Defaults to `location`.
    #[serde(default)]
    pub variant: FormVariant,
}

/// Health check endpoint.
///
/// Returns the service status and version.
#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Service is up")),
    tag = "health"
)]
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "cowork-leads-api",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// POST /api/v1/leads
///
/// Validates an inquiry form submission against its form variant, stores it,
/// and returns the stored lead. For variants that forward, a copy of the raw
/// fields is dispatched to the external form endpoint on a detached task
/// whose outcome never affects this response.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `query` - Query parameters selecting the form variant.
/// * `payload` - JSON object of submitted form fields.
///
/// # Returns
///
/// * `Result<(StatusCode, Json<Lead>), AppError>` - 201 with the stored lead, or an error.
#[utoipa::path(
    post,
    path = "/api/v1/leads",
    params(SubmissionQuery),
    request_body = crate::models::LeadSubmissionDoc,
    responses(
        (status = 201, description = "Lead stored", body = Lead),
        (status = 400, description = "Validation failed; `fields` maps each invalid field to a message"),
        (status = 413, description = "Body larger than the submission limit"),
        (status = 415, description = "Body is not declared as JSON"),
        (status = 503, description = "Storage unavailable, try again later"),
    ),
    tag = "leads"
)]
pub async fn submit_lead(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SubmissionQuery>, QueryRejection>,
    payload: Result<Json<RawSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<Lead>), AppError> {
    let Query(query) = query.map_err(|e| AppError::Rejected {
        status: e.status(),
        message: e.body_text(),
    })?;
    let Json(raw) = payload.map_err(|e| AppError::Rejected {
        status: e.status(),
        message: e.body_text(),
    })?;
    let variant = query.variant;

    tracing::info!(
        "POST /leads - variant: {}, {} field(s)",
        variant.as_str(),
        raw.len()
    );

    let new_lead = validate_submission(&raw, variant)?;

    if variant.rules().forward {
        if let Some(ref forwarder) = state.forwarder {
            // Detached: the handle is dropped and the result only logged
            drop(forwarder.dispatch(ForwardedLead::from(&raw)));
        }
    }

    let lead = state.storage.create_lead(&new_lead).await?;

    tracing::info!("Lead {} accepted from {} form", lead.id, variant.as_str());
    Ok((StatusCode::CREATED, Json(lead)))
}
