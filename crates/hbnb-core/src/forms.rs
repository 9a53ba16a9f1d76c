//! Forms the controller knows how to handle, and where their fields come from.

use std::collections::HashMap;
use std::fmt;

/// Field ids read by the submit handlers.
pub mod field {
    pub const EMAIL: &str = "email";
    pub const PASSWORD: &str = "password";
    pub const REVIEW: &str = "review";
    pub const RATING: &str = "rating";
}

/// A form the controller binds a handler to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormId {
    Login,
    Signup,
    Review,
}

impl FormId {
    pub const ALL: [FormId; 3] = [FormId::Login, FormId::Signup, FormId::Review];

    /// Element id of the form on the page
    pub fn element_id(&self) -> &'static str {
        match self {
            FormId::Login => "login-form",
            FormId::Signup => "signup-form",
            FormId::Review => "review-form",
        }
    }

    /// Recognize a form by element id
    pub fn from_element_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.element_id() == id)
    }
}

impl fmt::Display for FormId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

/// Read access to the current values of form fields.
///
/// Missing fields read as empty, like an input with no value.
pub trait FormFieldSource {
    fn value(&self, field: &str) -> Option<String>;

    fn value_or_empty(&self, field: &str) -> String {
        self.value(field).unwrap_or_default()
    }
}

/// Field values held in a map.
#[derive(Debug, Clone, Default)]
pub struct FieldMap {
    values: HashMap<String, String>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: &str, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
    }

    /// Empty every field, like `form.reset()` on a form with no defaults
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

impl FormFieldSource for FieldMap {
    fn value(&self, field: &str) -> Option<String> {
        self.values.get(field).cloned()
    }
}

impl FormFieldSource for HashMap<String, String> {
    fn value(&self, field: &str) -> Option<String> {
        self.get(field).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        for form in FormId::ALL {
            assert_eq!(FormId::from_element_id(form.element_id()), Some(form));
        }
        assert_eq!(FormId::from_element_id("search-form"), None);
        assert_eq!(FormId::Review.to_string(), "review-form");
    }

    #[test]
    fn test_field_map() {
        let mut fields = FieldMap::new().with(field::EMAIL, "a@b.com");
        assert_eq!(fields.value(field::EMAIL).as_deref(), Some("a@b.com"));
        assert_eq!(fields.value_or_empty(field::PASSWORD), "");

        fields.reset();
        assert_eq!(fields.value(field::EMAIL), None);
    }
}
