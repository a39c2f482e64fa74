// Form document state. Holds the field values of the record currently
// shown in a form, normalized into `FieldValue` at the boundary. The host
// framework owns the persistent record; this is the transient editing
// view the scripts work on.

use serde::{Deserialize, Serialize};
use shared::fields::FieldValue;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDoc {
    pub doctype: String,
    /// Record name, e.g. "HR-EMP-00001".
    pub name: String,
    fields: HashMap<String, FieldValue>,
}

impl FormDoc {
    pub fn new(doctype: &str, name: &str) -> Self {
        FormDoc {
            doctype: doctype.to_string(),
            name: name.to_string(),
            fields: HashMap::new(),
        }
    }

    /// Builder-style field assignment, mainly for wiring up forms.
    pub fn with_field(mut self, field: &str, value: FieldValue) -> Self {
        self.set(field, value);
        self
    }

    /// Current value of a field; absent fields read as empty.
    pub fn get(&self, field: &str) -> FieldValue {
        self.fields.get(field).cloned().unwrap_or(FieldValue::Empty)
    }

    pub fn text(&self, field: &str) -> Option<String> {
        self.fields
            .get(field)
            .and_then(|value| value.as_text())
            .map(|text| text.to_string())
    }

    pub fn set(&mut self, field: &str, value: FieldValue) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn is_set(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }
}
