/// Property-based tests using proptest
/// Tests invariants that should hold for all submissions
use cowork_leads_api::models::RawSubmission;
use cowork_leads_api::validation::{
    is_valid_email, is_valid_phone, validate_submission, FormVariant,
};
use proptest::prelude::*;

// Property: validation never panics on arbitrary input
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn submission_validation_never_panics(
        name in "\\PC*",
        email in "\\PC*",
        phone in "\\PC*",
        inquiry in proptest::bool::ANY
    ) {
        let raw = RawSubmission::new()
            .with("name", name.clone())
            .with("firstName", name)
            .with("lastName", "Doe")
            .with("email", email)
            .with("phone", phone);
        let variant = if inquiry { FormVariant::Inquiry } else { FormVariant::Location };
        let _ = validate_submission(&raw, variant);
    }
}

// Property: phone rule is exactly ten ASCII digits
proptest! {
    #[test]
    fn ten_digit_phones_accepted(phone in "[0-9]{10}") {
        prop_assert!(is_valid_phone(&phone));
    }

    #[test]
    fn other_digit_counts_rejected(phone in "[0-9]{0,9}|[0-9]{11,20}") {
        prop_assert!(!is_valid_phone(&phone));
    }

    #[test]
    fn inquiry_rejects_non_ten_digit_phone(phone in "[0-9]{1,9}") {
        let raw = RawSubmission::new()
            .with("firstName", "Jane")
            .with("lastName", "Doe")
            .with("email", "jane@x.com")
            .with("phone", phone)
            .with("company", "Acme");
        let errors = validate_submission(&raw, FormVariant::Inquiry).unwrap_err();
        prop_assert!(errors.contains("phone"));
        prop_assert_eq!(errors.len(), 1);
    }
}

// Property: accepted leads always carry a non-empty name and a valid email
proptest! {
    #[test]
    fn accepted_leads_have_name_and_email(
        name in "[A-Za-z ]{0,20}",
        local in "[a-z]{1,10}",
        domain in "[a-z]{1,10}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        let raw = RawSubmission::new().with("name", name.clone()).with("email", email.clone());

        match validate_submission(&raw, FormVariant::Location) {
            Ok(lead) => {
                prop_assert!(!lead.name.is_empty());
                prop_assert_eq!(lead.name.as_str(), name.trim());
                prop_assert!(is_valid_email(&lead.email));
            }
            Err(errors) => {
                // Only a blank name can fail with a well-formed email
                prop_assert!(name.trim().is_empty());
                prop_assert!(errors.contains("name"));
                prop_assert!(!errors.contains("email"));
            }
        }
    }

    #[test]
    fn emails_without_at_sign_rejected(email in "[a-z0-9.]{1,30}") {
        prop_assert!(!is_valid_email(&email));
    }
}
