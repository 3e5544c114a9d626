//! Form validation
//!
//! Presence and format checks only. Errors are collected per field so a page
//! can render each message next to its input.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use artmart_common::{Error, Result};

/// Phone numbers as typed into the shop registration form
static PHONE_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^\+?[0-9][0-9 \-]{6,16}[0-9]$").expect("phone regex is valid")
});

/// Field name -> messages, ordered by field name
pub type FieldErrors = BTreeMap<String, Vec<String>>;

fn validate_phone(value: &str) -> std::result::Result<(), ValidationError> {
    if PHONE_REGEX.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("phone")
            .with_message(Cow::Borrowed("Enter a valid phone number")))
    }
}

fn validate_iso_date(value: &str) -> std::result::Result<(), ValidationError> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| {
            ValidationError::new("date")
                .with_message(Cow::Borrowed("Enter a date as YYYY-MM-DD"))
        })
}

/// Artwork upload form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkForm {
    #[validate(length(min = 1, max = 120, message = "Title is required (max 120 characters)"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: String,

    #[validate(range(min = 0.01, message = "Price must be greater than zero"))]
    pub price: f64,

    #[validate(url(message = "Image URL must be a valid URL"))]
    pub image_url: String,

    #[validate(length(min = 1, message = "Category is required"))]
    pub category: String,
}

/// Shop registration form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShopRegistrationForm {
    #[validate(length(min = 2, max = 80, message = "Shop name must be 2-80 characters"))]
    pub name: String,

    #[validate(length(min = 1, message = "Owner name is required"))]
    pub owner_name: String,

    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,

    #[validate(custom(function = "validate_phone"))]
    pub phone: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
}

/// Challenge creation form (moderators)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeForm {
    #[validate(length(min = 1, max = 100, message = "Title is required (max 100 characters)"))]
    pub title: String,

    #[validate(length(min = 10, message = "Description must be at least 10 characters"))]
    pub description: String,

    #[validate(length(min = 1, message = "Theme is required"))]
    pub theme: String,

    #[validate(custom(function = "validate_iso_date"))]
    pub deadline: String,
}

/// Challenge entry form; also the body of `POST /api/submissions`
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionForm {
    #[validate(length(min = 1, message = "Choose a challenge"))]
    pub challenge_id: String,

    #[validate(length(min = 1, message = "Choose an artwork"))]
    pub artwork_id: String,

    #[validate(length(max = 500, message = "Note must be at most 500 characters"))]
    pub note: String,
}

/// Run the form's checks and collect messages per field.
///
/// Returns an empty map when the form is valid.
pub fn collect_field_errors<T: Validate>(form: &T) -> FieldErrors {
    let mut collected = FieldErrors::new();
    let Err(errors) = form.validate() else {
        return collected;
    };

    for (field, field_errors) in errors.field_errors() {
        let field = field.to_string();
        let messages = field_errors
            .iter()
            .map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("Invalid {}", field),
            })
            .collect::<Vec<_>>();
        collected.entry(field).or_default().extend(messages);
    }

    collected
}

/// Validate a form, folding all field messages into one validation error
pub fn validate_form<T: Validate>(form: &T) -> Result<()> {
    let errors = collect_field_errors(form);
    if errors.is_empty() {
        return Ok(());
    }

    tracing::debug!(fields = errors.len(), "Form validation failed");

    let summary = errors
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ");
    Err(Error::Validation(summary))
}
