#![allow(dead_code)]

//! Schema-light resume document model.
//!
//! A resume is an arbitrary nested JSON tree: the provider contract promises
//! "same schema as input", not any fixed field set. Consumers must treat
//! every section besides name/title/profile as optional, so all accessors
//! here are null-safe and nothing enforces a schema.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResumeDocument(pub Value);

impl Default for ResumeDocument {
    fn default() -> Self {
        ResumeDocument(Value::Null)
    }
}

impl ResumeDocument {
    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn profile(&self) -> Option<&str> {
        self.str_field("profile")
    }

    /// Ordered work-experience entries, if the section exists.
    pub fn work_experience(&self) -> Option<&Vec<Value>> {
        self.list_field("work_experience")
    }

    pub fn projects(&self) -> Option<&Vec<Value>> {
        self.list_field("projects")
    }

    /// Mapping from skill category to list of skill strings, if present.
    pub fn skills(&self) -> Option<&Map<String, Value>> {
        self.0.get("skills").and_then(Value::as_object)
    }

    pub fn expertise(&self) -> Option<&Vec<Value>> {
        self.list_field("expertise")
    }

    pub fn achievements(&self) -> Option<&Vec<Value>> {
        self.list_field("achievements")
    }

    pub fn qualities(&self) -> Option<&Vec<Value>> {
        self.list_field("qualities")
    }

    /// True for the null document (e.g. a reply that carried no `resume` key).
    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    fn list_field(&self, key: &str) -> Option<&Vec<Value>> {
        self.0.get(key).and_then(Value::as_array)
    }
}
