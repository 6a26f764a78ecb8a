//! Co-working Lead Intake API Library
//!
//! Server side of the website's inquiry forms: validates submissions, stores
//! them as insert-only lead rows, and forwards a best-effort copy of inquiry
//! submissions to an external form endpoint.
//!
//! # Modules
//!
//! - `api`: API definitions.
//! - `core`: Core business logic.
//! - `data`: Data access layer.
//! - `integrations`: External service integrations.
//! - `obs`: Observability and logging.
//! - `circuit_breaker`: Circuit breaker guarding the forwarding webhook.
//! - `config`: Configuration management.
//! - `db`: Database connection and pool management.
//! - `db_storage`: Lead persistence.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lead_forwarder`: Best-effort external webhook client.
//! - `models`: Core data models.
//! - `openapi`: Generated OpenAPI document.
//! - `routes`: Router assembly.
//! - `validation`: Form variants and submission validation.

pub mod api;
pub mod core;
pub mod data;
pub mod integrations;
pub mod obs;

// Re-export primary modules for shared use in tests and the binary
pub mod circuit_breaker;
pub mod config;
pub mod db;
pub mod db_storage;
pub mod errors;
pub mod handlers;
pub mod lead_forwarder;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod validation;
