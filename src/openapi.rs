use utoipa::OpenApi;

use crate::models::{Lead, LeadSubmissionDoc};
use crate::validation::FormVariant;

/// OpenAPI document for the public endpoints, served under `/api-docs`.
#[derive(OpenApi)]
#[openapi(
    paths(crate::handlers::submit_lead, crate::handlers::health),
    components(schemas(Lead, LeadSubmissionDoc, FormVariant)),
    tags(
        (name = "leads", description = "Inquiry lead intake"),
        (name = "health", description = "Liveness")
    )
)]
pub struct ApiDoc;
