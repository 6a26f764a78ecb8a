use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use std::collections::BTreeMap;
use utoipa::ToSchema;

// ============ Database Models ============

/// A stored inquiry lead, exactly as the `leads` table returned it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Storage-generated identifier.
    pub id: i64,
    /// Full display name of the inquirer.
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Branch the inquiry concerns.
    pub location: String,
    pub message: Option<String>,
    /// Storage-generated insert timestamp.
    pub created_at: DateTime<Utc>,
}

/// A validated lead ready for insertion.
///
/// Carries no `id` or `created_at`: both belong to the storage layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub location: Option<String>,
    pub message: Option<String>,
}

// ============ Request Models ============

/// Raw form fields as posted by the browser, before validation.
///
/// Values are kept as strings; JSON `null` counts as absent and other scalars
/// are stringified so a number typed into a phone input is still accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubmission {
    fields: BTreeMap<String, String>,
}

impl RawSubmission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, mostly used by tests.
    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    /// Returns the raw value of `field`, untouched.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Returns the trimmed value of `field`, treating blank input as absent.
    pub fn trimmed(&self, field: &str) -> Option<&str> {
        self.get(field).map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<BTreeMap<String, Value>> for RawSubmission {
    fn from(map: BTreeMap<String, Value>) -> Self {
        let fields = map
            .into_iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::Null => return None,
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    // Nested structures are not form fields
                    Value::Array(_) | Value::Object(_) => return None,
                };
                Some((key, text))
            })
            .collect();
        Self { fields }
    }
}

impl<'de> Deserialize<'de> for RawSubmission {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        BTreeMap::<String, Value>::deserialize(deserializer).map(RawSubmission::from)
    }
}

/// Documented shape of the submission body. Every field is a string; which
/// ones are required depends on the form variant.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct LeadSubmissionDoc {
    /// Used by the `location` form.
    #[schema(example = "Jane Doe")]
    pub name: Option<String>,
    /// Used by the `inquiry` form together with `lastName`.
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[schema(example = "9876543210")]
    pub phone: Option<String>,
    #[schema(example = "Acme")]
    pub company: Option<String>,
    #[schema(example = "Malviya Nagar")]
    pub location: Option<String>,
    pub message: Option<String>,
}

// ============ External Models ============

/// Copy of the submitted fields sent to the external form endpoint.
///
/// Mirrors what the user typed, not the normalized lead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardedLead {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
}

impl From<&RawSubmission> for ForwardedLead {
    fn from(raw: &RawSubmission) -> Self {
        let field = |key: &str| raw.get(key).map(str::to_string);
        Self {
            first_name: field("firstName"),
            last_name: field("lastName"),
            name: field("name"),
            email: field("email"),
            phone: field("phone"),
            company: field("company"),
        }
    }
}
