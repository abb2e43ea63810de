//! Builder for notes written into a test library.

#![allow(dead_code)]

use serde_json::{Value, json};

/// A note to be written as a `*.qvnote` directory.
#[derive(Debug, Clone)]
pub struct TestNote {
    pub id: String,
    pub title: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub tags: Vec<String>,
    pub cells: Vec<Value>,
    pub resources: Vec<(String, Vec<u8>)>,
}

impl TestNote {
    pub fn new(id: &str, title: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            created_at: 1_705_314_600,
            updated_at: 1_705_318_200,
            tags: Vec::new(),
            cells: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_markdown(mut self, text: &str) -> Self {
        self.cells.push(json!({"type": "markdown", "data": text}));
        self
    }

    pub fn with_html(mut self, html: &str) -> Self {
        self.cells.push(json!({"type": "text", "data": html}));
        self
    }

    pub fn with_code(mut self, language: &str, code: &str) -> Self {
        self.cells
            .push(json!({"type": "code", "language": language, "data": code}));
        self
    }

    pub fn with_resource(mut self, name: &str, bytes: &[u8]) -> Self {
        self.resources.push((name.to_string(), bytes.to_vec()));
        self
    }

    pub(super) fn meta_json(&self) -> Value {
        json!({
            "uuid": self.id,
            "title": self.title,
            "created_at": self.created_at,
            "updated_at": self.updated_at,
            "tags": self.tags,
        })
    }

    pub(super) fn content_json(&self) -> Value {
        json!({"title": self.title, "cells": self.cells})
    }
}
