//! Submit-time rule sets for each form
//!
//! Each rule set runs its checks in display order and stops at the first
//! failure, so only one message is ever shown.

use super::form_state::{FormKind, FormValues};
use super::validators::{
    validate_email, validate_file, validate_password, validate_phone, ValidationError,
};
use std::str::FromStr;

/// Role picked on the signup form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Guest,
    Member,
}

impl FromStr for UserRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "guest" => Ok(UserRole::Guest),
            "member" => Ok(UserRole::Member),
            _ => Err(()),
        }
    }
}

/// Run the rule set of `kind` against `values`
pub fn validate_form(kind: FormKind, values: &FormValues) -> Result<(), ValidationError> {
    match kind {
        FormKind::Login => validate_login(values),
        FormKind::Signup => validate_signup(values),
        FormKind::Contact => validate_contact(values),
    }
}

fn required(values: &FormValues, field: &str, label: &str) -> Result<(), ValidationError> {
    if values.text(field).trim().is_empty() {
        return Err(ValidationError::for_field(field, format!("{label} is required")));
    }
    Ok(())
}

fn email(values: &FormValues) -> Result<(), ValidationError> {
    if !validate_email(values.text("email")) {
        return Err(ValidationError::for_field(
            "email",
            "Please enter a valid email address",
        ));
    }
    Ok(())
}

fn phone(values: &FormValues) -> Result<(), ValidationError> {
    if !validate_phone(values.text("phone")) {
        return Err(ValidationError::for_field(
            "phone",
            "Please enter a valid phone number",
        ));
    }
    Ok(())
}

fn validate_login(values: &FormValues) -> Result<(), ValidationError> {
    email(values)?;
    if values.text("password").is_empty() {
        return Err(ValidationError::for_field(
            "password",
            "Please enter your password",
        ));
    }
    Ok(())
}

fn validate_signup(values: &FormValues) -> Result<(), ValidationError> {
    required(values, "name", "Name")?;
    email(values)?;
    phone(values)?;
    required(values, "college", "College")?;

    let password = values.text("password");
    if let Some(err) = validate_password(password) {
        return Err(err.with_field("password"));
    }
    if values.text("confirm_password") != password {
        return Err(ValidationError::for_field(
            "confirm_password",
            "Passwords do not match",
        ));
    }

    let role = UserRole::from_str(values.text("role"))
        .map_err(|_| ValidationError::for_field("role", "Please select a valid role"))?;
    if role == UserRole::Member && values.text("secret_code").trim().is_empty() {
        return Err(ValidationError::for_field(
            "secret_code",
            "Secret code is required for members",
        ));
    }

    let file = values.file("college_id").ok_or_else(|| {
        ValidationError::for_field("college_id", "Please upload your college ID")
    })?;
    if let Some(err) = validate_file(file) {
        return Err(err.with_field("college_id"));
    }

    Ok(())
}

fn validate_contact(values: &FormValues) -> Result<(), ValidationError> {
    required(values, "name", "Name")?;
    required(values, "email", "Email")?;
    email(values)?;
    if !values.text("phone").is_empty() {
        phone(values)?;
    }
    required(values, "subject", "Subject")?;
    required(values, "message", "Message")?;
    Ok(())
}
