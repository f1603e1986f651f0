use std::{collections::BTreeMap, fmt};

use thiserror::Error;

use crate::domain::DraftField;

/// Per-field validation messages, ordered by form position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    messages: BTreeMap<DraftField, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: DraftField, message: impl Into<String>) {
        self.messages.insert(field, message.into());
    }

    pub fn get(&self, field: DraftField) -> Option<&str> {
        self.messages.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DraftField, &str)> {
        self.messages
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Error)]
#[error("draft failed validation: {0}")]
pub struct InvalidDraft(pub FieldErrors);

impl From<FieldErrors> for InvalidDraft {
    fn from(value: FieldErrors) -> Self {
        Self(value)
    }
}
