// src/deal.rs

use serde::{Deserialize, Serialize};

/// A deal document. The identifier is assigned by the caller and addresses the
/// document in the index; it never appears in the document body.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Deal {
    #[serde(skip)]
    id: String,
    title: String,
    value: i64,
}

impl Deal {
    pub fn new(id: impl Into<String>, title: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            value,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    pub(crate) fn with_id(mut self, id: String) -> Self {
        self.id = id;
        self
    }
}

/// Partial-update body: `{"doc": {...}}`.
#[derive(Debug, Serialize, Clone)]
pub struct UpdateEnvelope<'a> {
    pub doc: &'a Deal,
}

impl<'a> UpdateEnvelope<'a> {
    pub fn new(doc: &'a Deal) -> Self {
        Self { doc }
    }
}
