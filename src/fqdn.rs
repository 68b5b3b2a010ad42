// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! FQDN templating for routes that declare no hostname of their own.
//!
//! A template is a comma-separated list of hostname patterns with
//! placeholders resolved against the route's metadata:
//!
//! - `{{name}}` - the resource name
//! - `{{namespace}}` - the resource namespace
//! - `{{label:key}}` - a label value
//! - `{{annotation:key}}` - an annotation value
//!
//! Rendering splits the result on commas, strips whitespace and trims
//! trailing dots, so `"{{name}}.internal, {{name}}.example.com."` produces
//! two hostnames per route.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use thiserror::Error;

/// Errors from parsing or rendering an FQDN template.
#[derive(Error, Debug, Clone)]
pub enum TemplateError {
    /// The template references a placeholder this engine does not know.
    #[error("unknown placeholder {placeholder:?} in FQDN template")]
    UnknownPlaceholder {
        /// The offending placeholder, braces included
        placeholder: String,
    },

    /// A `{{` was opened but never closed.
    #[error("unterminated placeholder in FQDN template at offset {offset}")]
    Unterminated {
        /// Byte offset of the opening braces
        offset: usize,
    },

    /// Rendering needed a label or annotation the object does not carry.
    #[error("object {namespace}/{name} has no {kind} {key:?} required by FQDN template")]
    MissingField {
        /// Namespace of the object being rendered
        namespace: String,
        /// Name of the object being rendered
        name: String,
        /// "label" or "annotation"
        kind: &'static str,
        /// The missing key
        key: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Namespace,
    Label(String),
    Annotation(String),
}

/// A parsed FQDN template, validated at construction so rendering can only
/// fail on missing labels/annotations.
#[derive(Clone, Debug)]
pub struct FqdnTemplate {
    segments: Vec<Segment>,
}

impl FqdnTemplate {
    /// Parse a template string.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] for unknown or unterminated placeholders.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut rest = template;
        let mut offset = 0;

        while let Some(start) = rest.find("{{") {
            if start > 0 {
                segments.push(Segment::Literal(rest[..start].to_string()));
            }
            let after = &rest[start + 2..];
            let end = after
                .find("}}")
                .ok_or(TemplateError::Unterminated { offset: offset + start })?;
            let inner = after[..end].trim();
            segments.push(match inner {
                "name" => Segment::Name,
                "namespace" => Segment::Namespace,
                _ => {
                    if let Some(key) = inner.strip_prefix("label:") {
                        Segment::Label(key.trim().to_string())
                    } else if let Some(key) = inner.strip_prefix("annotation:") {
                        Segment::Annotation(key.trim().to_string())
                    } else {
                        return Err(TemplateError::UnknownPlaceholder {
                            placeholder: format!("{{{{{inner}}}}}"),
                        });
                    }
                }
            });
            offset += start + 2 + end + 2;
            rest = &after[end + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self { segments })
    }

    /// Render the template against an object's metadata, producing the
    /// cleaned-up hostname list.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::MissingField`] when the template references
    /// a label or annotation the object does not have.
    pub fn render(&self, meta: &ObjectMeta) -> Result<Vec<String>, TemplateError> {
        let name = meta.name.as_deref().unwrap_or_default();
        let namespace = meta.namespace.as_deref().unwrap_or_default();

        let mut rendered = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => rendered.push_str(text),
                Segment::Name => rendered.push_str(name),
                Segment::Namespace => rendered.push_str(namespace),
                Segment::Label(key) => {
                    let value = meta
                        .labels
                        .as_ref()
                        .and_then(|l| l.get(key))
                        .ok_or_else(|| missing(meta, "label", key))?;
                    rendered.push_str(value);
                }
                Segment::Annotation(key) => {
                    let value = meta
                        .annotations
                        .as_ref()
                        .and_then(|a| a.get(key))
                        .ok_or_else(|| missing(meta, "annotation", key))?;
                    rendered.push_str(value);
                }
            }
        }

        Ok(rendered
            .split(',')
            .map(|h| h.trim().trim_end_matches('.').to_string())
            .filter(|h| !h.is_empty())
            .collect())
    }
}

fn missing(meta: &ObjectMeta, kind: &'static str, key: &str) -> TemplateError {
    TemplateError::MissingField {
        namespace: meta.namespace.clone().unwrap_or_default(),
        name: meta.name.clone().unwrap_or_default(),
        kind,
        key: key.to_string(),
    }
}

#[cfg(test)]
#[path = "fqdn_tests.rs"]
mod fqdn_tests;
