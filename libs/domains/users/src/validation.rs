//! Validation of untrusted user input.
//!
//! Rules, collected for every field rather than stopping at the first:
//!
//! | field   | rules                              |
//! |---------|------------------------------------|
//! | name    | required, plain text, 2..=100 chars |
//! | age     | required, 0..=120                   |
//! | city    | required, plain text                |
//! | state   | required, plain text                |
//! | pincode | required, plain text, 4..=10 chars  |
//!
//! Plain text is not blank and has no control characters. SQLite's
//! `length()` stops at a NUL and PostgreSQL text refuses one, so such values
//! would otherwise slip past validation and fail the schema checks.

use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{UserFields, UserPayload};

/// Rejects empty and whitespace-only strings, then control characters
pub(crate) fn plain_text(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("must not be blank")));
    }
    if value.chars().any(char::is_control) {
        return Err(ValidationError::new("control_character")
            .with_message(Cow::Borrowed("must not contain control characters")));
    }
    Ok(())
}

/// Turn a request body into well-formed fields or the full set of violations.
///
/// Never touches storage.
pub fn validate_payload(payload: UserPayload) -> Result<UserFields, ValidationErrors> {
    payload.validate()?;

    // `required` guarantees every field once validate() passed
    let UserPayload {
        name: Some(name),
        age: Some(age),
        city: Some(city),
        state: Some(state),
        pincode: Some(pincode),
    } = payload
    else {
        return Err(ValidationErrors::new());
    };

    Ok(UserFields {
        name,
        age,
        city,
        state,
        pincode,
    })
}
