use sqlx::PgPool;

use crate::config::DEFAULT_LOCATION;
use crate::errors::{AppError, ResultExt};
use crate::models::{Lead, NewLead};

/// Insert-only storage for inquiry leads.
///
/// Constructed once at startup around the shared pool and handed to the
/// handlers through `AppState`.
#[derive(Clone)]
pub struct LeadStorage {
    pool: PgPool,
    default_location: String,
}

impl LeadStorage {
    pub fn new(pool: PgPool) -> Self {
        Self::with_default_location(pool, DEFAULT_LOCATION)
    }

    pub fn with_default_location(pool: PgPool, default_location: impl Into<String>) -> Self {
        Self {
            pool,
            default_location: default_location.into(),
        }
    }

    /// Inserts `lead` as a new row and returns it with `id` and `created_at`
    /// filled in by the database.
    ///
    /// Exactly one INSERT per call. No deduplication: the same input twice
    /// yields two rows.
    ///
    /// # Errors
    ///
    /// * `ConstraintViolation` - a NOT NULL column received NULL.
    /// * `StorageUnavailable` - the database could not be reached.
    pub async fn create_lead(&self, lead: &NewLead) -> Result<Lead, AppError> {
        let location = lead
            .location
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(self.default_location.as_str());

        let stored = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO leads (name, email, phone, company, location, message)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, name, email, phone, company, location, message, created_at
            "#,
        )
        .bind(&lead.name)
        .bind(&lead.email)
        .bind(&lead.phone)
        .bind(&lead.company)
        .bind(location)
        .bind(&lead.message)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert lead")?;

        tracing::info!(
            "✓ Stored lead id={} location={}",
            stored.id,
            stored.location
        );
        Ok(stored)
    }
}
