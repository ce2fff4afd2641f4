//! Visitor-submitted forms and their validation rules. Handlers call
//! `validate()` and turn the result into a field → messages map with
//! [`field_errors`] so invalid submissions can be re-displayed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use validator::{Validate, ValidationErrors};

#[derive(Serialize, Deserialize, Validate, Default, Debug, Clone)]
#[serde(default)]
pub struct CommentForm {
    #[validate(length(min = 1, max = 80, message = "Name must be between 1 and 80 characters."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(length(min = 1, message = "This field is required."))]
    pub body: String,
}

#[derive(Serialize, Deserialize, Validate, Default, Debug, Clone)]
#[serde(default)]
pub struct SharePostForm {
    #[validate(length(min = 1, max = 25, message = "Name must be between 1 and 25 characters."))]
    pub name: String,
    #[validate(email(message = "Enter a valid email address."))]
    pub email: String,
    #[validate(email(message = "Enter a valid recipient email address."))]
    pub to: String,
    // Optional free-text note, no rules.
    pub comments: String,
}

pub fn field_errors(errors: &ValidationErrors) -> HashMap<&'static str, Vec<String>> {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, field_errs)| {
            let messages = field_errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => e.code.to_string(),
                })
                .collect();
            (field, messages)
        })
        .collect()
}
