// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Annotation keys and readers used across the source layer.
//!
//! Routes and Gateways can carry `gwdns.firestoned.io/` annotations that
//! override or supplement what their spec declares: extra hostnames, explicit
//! DNS targets, a record TTL, and a controller gate that lets several DNS
//! controllers share a cluster without stepping on each other.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;
use tracing::warn;

use crate::errors::SourceError;

// ============================================================================
// Annotation Keys
// ============================================================================

/// Annotation listing extra hostnames for a resource (comma-separated)
pub const HOSTNAME_ANNOTATION: &str = "gwdns.firestoned.io/hostname";

/// Annotation overriding the DNS targets derived from status addresses
/// (comma-separated IPs or hostnames)
pub const TARGET_ANNOTATION: &str = "gwdns.firestoned.io/target";

/// Annotation setting the record TTL (integer seconds, or with s/m/h suffix)
pub const TTL_ANNOTATION: &str = "gwdns.firestoned.io/ttl";

/// Annotation naming the controller responsible for a resource
pub const CONTROLLER_ANNOTATION: &str = "gwdns.firestoned.io/controller";

/// Value of [`CONTROLLER_ANNOTATION`] that designates this controller
pub const CONTROLLER_VALUE: &str = "gwdns";

fn annotation<'a>(meta: &'a ObjectMeta, key: &str) -> Option<&'a str> {
    meta.annotations
        .as_ref()
        .and_then(|a| a.get(key))
        .map(String::as_str)
}

/// Split a comma-separated annotation value into cleaned-up entries.
///
/// Whitespace is stripped, trailing dots are trimmed, and empty entries are
/// dropped.
fn split_hosts(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|h| h.trim().trim_end_matches('.').to_string())
        .filter(|h| !h.is_empty())
        .collect()
}

/// Hostnames declared via the hostname annotation.
#[must_use]
pub fn hostnames_from_annotations(meta: &ObjectMeta) -> Vec<String> {
    annotation(meta, HOSTNAME_ANNOTATION)
        .map(split_hosts)
        .unwrap_or_default()
}

/// Explicit DNS targets declared via the target annotation.
///
/// An empty vector means "no override"; callers fall back to the Gateway's
/// status addresses.
#[must_use]
pub fn targets_from_annotation(meta: &ObjectMeta) -> Vec<String> {
    annotation(meta, TARGET_ANNOTATION)
        .map(|v| {
            v.split(',')
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Record TTL declared via the TTL annotation, in seconds.
///
/// Accepts a plain integer or an integer with an `s`, `m` or `h` suffix.
/// An unparsable value logs a warning and yields `None`, so a typo degrades
/// to the provider default instead of dropping the record.
#[must_use]
pub fn ttl_from_annotations(meta: &ObjectMeta) -> Option<i64> {
    let raw = annotation(meta, TTL_ANNOTATION)?;
    match parse_ttl(raw) {
        Some(ttl) => Some(ttl),
        None => {
            warn!("Ignoring invalid TTL annotation value {raw:?}");
            None
        }
    }
}

fn parse_ttl(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (digits, unit) = match raw.find(|c: char| !c.is_ascii_digit()) {
        Some(idx) => raw.split_at(idx),
        None => (raw, ""),
    };
    let value: i64 = digits.parse().ok()?;
    match unit {
        "" | "s" => Some(value),
        "m" => Some(value * 60),
        "h" => Some(value * 3600),
        _ => None,
    }
}

/// Whether this controller is responsible for the resource.
///
/// True when the controller annotation is absent or names us.
#[must_use]
pub fn matches_controller(meta: &ObjectMeta) -> bool {
    annotation(meta, CONTROLLER_ANNOTATION).is_none_or(|v| v == CONTROLLER_VALUE)
}

/// One parsed term of an annotation filter expression.
#[derive(Clone, Debug, PartialEq, Eq)]
enum FilterTerm {
    /// `key=value` / `key==value`
    Equals(String, String),
    /// `key!=value`
    NotEquals(String, String),
    /// bare `key`
    Exists(String),
    /// `!key`
    NotExists(String),
}

/// A selector-style filter over resource annotations.
///
/// Supports the comma-separated forms `key=value`, `key==value`,
/// `key!=value`, `key` and `!key`, all of which must hold for a resource to
/// pass. An empty expression matches everything.
#[derive(Clone, Debug, Default)]
pub struct AnnotationFilter {
    terms: Vec<FilterTerm>,
}

impl AnnotationFilter {
    /// Parse a filter expression.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidAnnotationFilter`] when a term is
    /// malformed (empty key, or an unsupported operator).
    pub fn parse(expression: &str) -> Result<Self, SourceError> {
        let mut terms = Vec::new();
        for raw in expression.split(',') {
            let term = raw.trim();
            if term.is_empty() {
                continue;
            }
            terms.push(Self::parse_term(term).ok_or_else(|| {
                SourceError::InvalidAnnotationFilter {
                    filter: expression.to_string(),
                    reason: format!("unsupported term {term:?}"),
                }
            })?);
        }
        Ok(Self { terms })
    }

    fn parse_term(term: &str) -> Option<FilterTerm> {
        if let Some((key, value)) = term.split_once("!=") {
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            return Some(FilterTerm::NotEquals(
                key.to_string(),
                value.trim().to_string(),
            ));
        }
        if let Some((key, value)) = term.split_once('=') {
            let key = key.trim();
            let value = value.trim().trim_start_matches('=').trim();
            if key.is_empty() {
                return None;
            }
            return Some(FilterTerm::Equals(key.to_string(), value.to_string()));
        }
        if let Some(key) = term.strip_prefix('!') {
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            return Some(FilterTerm::NotExists(key.to_string()));
        }
        if term.contains(|c: char| c.is_whitespace() || c == '(' || c == ')') {
            return None;
        }
        Some(FilterTerm::Exists(term.to_string()))
    }

    /// Whether the given annotations satisfy every term of the filter.
    #[must_use]
    pub fn matches(&self, annotations: Option<&BTreeMap<String, String>>) -> bool {
        static EMPTY: BTreeMap<String, String> = BTreeMap::new();
        let annotations = annotations.unwrap_or(&EMPTY);
        self.terms.iter().all(|term| match term {
            FilterTerm::Equals(key, value) => annotations.get(key) == Some(value),
            FilterTerm::NotEquals(key, value) => annotations.get(key) != Some(value),
            FilterTerm::Exists(key) => annotations.contains_key(key),
            FilterTerm::NotExists(key) => !annotations.contains_key(key),
        })
    }

    /// True when the filter has no terms and therefore matches everything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
#[path = "annotations_tests.rs"]
mod annotations_tests;
