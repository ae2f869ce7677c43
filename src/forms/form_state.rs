//! Form state management
//!
//! One [`FormValues`] per form. Values are stored by field name and are
//! never validated here; validation happens at submit time.

use super::field::{FieldSpec, FieldValue};
use std::collections::HashMap;
use std::fmt;

const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("email", "Email"),
    FieldSpec::secret("password", "Password"),
];

const SIGNUP_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Full Name"),
    FieldSpec::text("email", "Email"),
    FieldSpec::text("phone", "Phone"),
    FieldSpec::text("college", "College"),
    FieldSpec::secret("password", "Password"),
    FieldSpec::secret("confirm_password", "Confirm Password"),
    FieldSpec::choice("role", "Role (Guest/Member)", "Guest"),
    FieldSpec::secret("secret_code", "Secret Code (members)"),
    FieldSpec::file("college_id", "College ID (path)"),
];

const CONTACT_FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "Name"),
    FieldSpec::text("email", "Email"),
    FieldSpec::text("phone", "Phone (optional)"),
    FieldSpec::text("subject", "Subject"),
    FieldSpec::multiline("message", "Message"),
];

/// The independent forms of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Login,
    Signup,
    Contact,
}

impl FormKind {
    pub const ALL: [FormKind; 3] = [FormKind::Login, FormKind::Signup, FormKind::Contact];

    /// Field layout of this form, in display order
    pub fn fields(self) -> &'static [FieldSpec] {
        match self {
            FormKind::Login => LOGIN_FIELDS,
            FormKind::Signup => SIGNUP_FIELDS,
            FormKind::Contact => CONTACT_FIELDS,
        }
    }

    #[cfg(test)]
    pub fn spec(self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }

    pub fn title(self) -> &'static str {
        match self {
            FormKind::Login => "Login",
            FormKind::Signup => "Sign Up",
            FormKind::Contact => "Contact",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Login => write!(f, "login"),
            FormKind::Signup => write!(f, "signup"),
            FormKind::Contact => write!(f, "contact"),
        }
    }
}

/// Current values of one form, keyed by field name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    kind: FormKind,
    values: HashMap<String, FieldValue>,
    active_field_index: usize,
}

impl FormValues {
    /// Create a form holding every field's initial value
    pub fn new(kind: FormKind) -> Self {
        let values = kind
            .fields()
            .iter()
            .map(|spec| (spec.name.to_string(), spec.initial_value()))
            .collect();
        Self {
            kind,
            values,
            active_field_index: 0,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    /// Overwrite or insert a field value
    pub fn set_field(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Text of a field, empty when unset or not a text field
    pub fn text(&self, name: &str) -> &str {
        self.values.get(name).map(FieldValue::as_text).unwrap_or("")
    }

    pub fn file(&self, name: &str) -> Option<&super::field::UploadedFile> {
        self.values.get(name).and_then(FieldValue::as_file)
    }

    /// Restore every field to its initial value. Focus returns to the first field.
    pub fn reset(&mut self) {
        self.values.clear();
        for spec in self.kind.fields() {
            self.values
                .insert(spec.name.to_string(), spec.initial_value());
        }
        self.set_active_field(0);
    }

    /// True when every field holds its initial value and nothing extra was set
    pub fn is_empty(&self) -> bool {
        let fields = self.kind.fields();
        self.values.len() == fields.len()
            && fields
                .iter()
                .all(|spec| self.values.get(spec.name) == Some(&spec.initial_value()))
    }

    pub fn field_count(&self) -> usize {
        self.kind.fields().len()
    }

    pub fn active_field(&self) -> usize {
        self.active_field_index
    }

    pub fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }

    pub fn active_spec(&self) -> &'static FieldSpec {
        &self.kind.fields()[self.active_field_index]
    }

    pub fn is_last_field_active(&self) -> bool {
        self.active_field_index + 1 == self.field_count()
    }

    pub fn next_field(&mut self) {
        let count = self.field_count();
        self.active_field_index = (self.active_field_index + 1) % count;
    }

    pub fn prev_field(&mut self) {
        if self.active_field_index == 0 {
            self.active_field_index = self.field_count() - 1;
        } else {
            self.active_field_index -= 1;
        }
    }

    /// Push a character to the focused text field. File fields are ignored.
    pub fn push_char(&mut self, c: char) {
        let spec = self.active_spec();
        if spec.is_file() {
            return;
        }
        if let Some(FieldValue::Text(s)) = self.values.get_mut(spec.name) {
            s.push(c);
        } else {
            self.values
                .insert(spec.name.to_string(), FieldValue::Text(c.to_string()));
        }
    }

    /// Remove the last character from the focused text field
    pub fn pop_char(&mut self) {
        let name = self.active_spec().name;
        if let Some(FieldValue::Text(s)) = self.values.get_mut(name) {
            s.pop();
        }
    }
}
