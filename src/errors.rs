use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt;

/// Field-scoped validation failures, keyed by the submitted field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error for `field`. The first message for a field wins.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, msg)| format!("{}: {}", field, msg))
            .collect();
        write!(f, "{}", parts.join(", "))
    }
}

/// Application-specific error types.
#[derive(Debug)]
pub enum AppError {
    /// Submitted fields failed validation.
    Validation(ValidationErrors),
    /// A storage-level constraint rejected the row. Indicates a validator gap.
    ConstraintViolation(String),
    /// The database could not be reached.
    StorageUnavailable(String),
    /// Any other database error.
    DatabaseError(sqlx::Error),
    /// The request was refused before validation: unreadable query, body not
    /// JSON, or body over the size limit. Carries the extractor's status.
    Rejected { status: StatusCode, message: String },
    /// Error with context chain for better debugging.
    WithContext {
        /// The underlying source of the error.
        source: Box<AppError>,
        /// Additional context message.
        context: String,
    },
}

impl AppError {
    /// Strips any context wrappers and returns the underlying error.
    pub fn root(&self) -> &AppError {
        match self {
            AppError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation failed: {}", errors),
            AppError::ConstraintViolation(msg) => write!(f, "Constraint violation: {}", msg),
            AppError::StorageUnavailable(msg) => write!(f, "Storage unavailable: {}", msg),
            AppError::DatabaseError(e) => write!(f, "Database error: {}", e),
            AppError::Rejected { status, message } => {
                write!(f, "Request rejected ({}): {}", status.as_u16(), message)
            }
            AppError::WithContext { source, context } => {
                write!(f, "{}: {}", context, source)
            }
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    /// Maps each error variant to an HTTP status code and JSON body.
    ///
    /// Storage details are logged but never echoed to the client.
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(errors) => {
                tracing::debug!("Validation failed: {}", errors);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": "Validation failed", "fields": errors }),
                )
            }
            AppError::ConstraintViolation(msg) => {
                tracing::error!("Constraint violation reached storage: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
            AppError::StorageUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    json!({ "error": "Service temporarily unavailable, please try again" }),
                )
            }
            AppError::DatabaseError(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Database error" }),
                )
            }
            AppError::Rejected { status, message } => {
                tracing::debug!("Request rejected with {}: {}", status, message);
                (status, json!({ "error": message }))
            }
            AppError::WithContext { source, context } => {
                // Log full context chain, then respond as the underlying error
                tracing::error!("Error with context: {} -> {}", context, source);
                return (*source).into_response();
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<sqlx::Error> for AppError {
    /// Classifies a `sqlx::Error` into the storage failure kinds callers act on.
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                AppError::StorageUnavailable(err.to_string())
            }
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                AppError::StorageUnavailable(err.to_string())
            }
            sqlx::Error::Database(ref db_err) => {
                use sqlx::error::ErrorKind;
                match db_err.kind() {
                    ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                        return AppError::ConstraintViolation(db_err.message().to_string());
                    }
                    _ => {}
                }
                let code = db_err.code().map(|c| c.into_owned()).unwrap_or_default();
                if is_unavailable_sqlstate(&code) {
                    AppError::StorageUnavailable(err.to_string())
                } else {
                    AppError::DatabaseError(err)
                }
            }
            other => AppError::DatabaseError(other),
        }
    }
}

/// SQLSTATE class 08 (connection exception) and 57P0x (server shutting down,
/// crash recovery, cannot connect now).
fn is_unavailable_sqlstate(code: &str) -> bool {
    code.starts_with("08") || code.starts_with("57P0")
}

/// Extension trait for adding context to errors.
/// Similar to `anyhow::Context` but for our `AppError` type.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T, AppError>;
}

impl<T> ResultExt<T> for Result<T, AppError> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(e),
            context: context.into(),
        })
    }
}

/// Extension for sqlx::Error to add context
impl<T> ResultExt<T> for Result<T, sqlx::Error> {
    fn context(self, context: impl Into<String>) -> Result<T, AppError> {
        self.map_err(|e| AppError::WithContext {
            source: Box::new(AppError::from(e)),
            context: context.into(),
        })
    }
}
