//! Lead intake validation.
//!
//! The site has several inquiry forms that differ only in which fields they
//! require and how they split the name. All of them are described by a
//! [`FormVariant`] and checked by [`validate_submission`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use utoipa::ToSchema;

use crate::errors::ValidationErrors;
use crate::models::{NewLead, RawSubmission};

// local@domain.tld, with at least one dot in the domain
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*\.[a-zA-Z]{2,}$",
    )
    .expect("valid email regex")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("valid phone regex"));

/// How a form collects the inquirer's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameFields {
    /// A single `name` input.
    Full,
    /// `firstName` and `lastName` inputs, joined with a space.
    Split,
}

/// Field rules of one form variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub name_fields: NameFields,
    /// Phone must be present and exactly 10 digits.
    pub require_phone: bool,
    pub require_company: bool,
    /// Location recorded when the submission carries none.
    pub default_location: Option<&'static str>,
    /// Whether a copy of the raw fields goes to the external form endpoint.
    pub forward: bool,
}

/// The inquiry forms on the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FormVariant {
    /// Home page "Book a tour" form.
    Inquiry,
    /// Per-location detail page form.
    #[default]
    Location,
}

impl FormVariant {
    pub fn rules(self) -> FieldRules {
        match self {
            FormVariant::Inquiry => FieldRules {
                name_fields: NameFields::Split,
                require_phone: true,
                require_company: true,
                default_location: Some("General Inquiry"),
                forward: true,
            },
            FormVariant::Location => FieldRules {
                name_fields: NameFields::Full,
                require_phone: false,
                require_company: false,
                default_location: None,
                forward: false,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormVariant::Inquiry => "inquiry",
            FormVariant::Location => "location",
        }
    }
}

/// Checks a raw email address against standard address syntax.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Checks that a phone number is exactly ten decimal digits.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_RE.is_match(phone)
}

/// Validates a raw submission against `variant` and normalizes it.
///
/// On failure every invalid field gets one message and nothing is returned
/// for persistence.
pub fn validate_submission(
    raw: &RawSubmission,
    variant: FormVariant,
) -> Result<NewLead, ValidationErrors> {
    let rules = variant.rules();
    let mut errors = ValidationErrors::new();

    let name = match rules.name_fields {
        NameFields::Full => {
            let name = raw.trimmed("name");
            if name.is_none() {
                errors.add("name", "Name is required");
            }
            name.map(str::to_string)
        }
        NameFields::Split => {
            let first = raw.trimmed("firstName");
            let last = raw.trimmed("lastName");
            if first.is_none() {
                errors.add("firstName", "First name is required");
            }
            if last.is_none() {
                errors.add("lastName", "Last name is required");
            }
            match (first, last) {
                (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
                _ => None,
            }
        }
    };

    let email = match raw.trimmed("email") {
        None => {
            errors.add("email", "Email is required");
            None
        }
        Some(email) if !is_valid_email(email) => {
            errors.add("email", "Invalid email address");
            None
        }
        Some(email) => Some(email.to_lowercase()),
    };

    let phone = raw.trimmed("phone");
    if rules.require_phone && !phone.is_some_and(is_valid_phone) {
        errors.add("phone", "Phone number must be exactly 10 digits");
    }

    let company = raw.trimmed("company");
    if rules.require_company && company.is_none() {
        errors.add("company", "Company name is required");
    }

    let location = raw
        .trimmed("location")
        .or(rules.default_location)
        .map(str::to_string);

    match (name, email) {
        (Some(name), Some(email)) if errors.is_empty() => Ok(NewLead {
            name,
            email,
            phone: phone.map(str::to_string),
            company: company.map(str::to_string),
            location,
            message: raw.trimmed("message").map(str::to_string),
        }),
        _ => {
            tracing::debug!(
                "Rejected {} submission: {} invalid field(s)",
                variant.as_str(),
                errors.len()
            );
            Err(errors)
        }
    }
}
