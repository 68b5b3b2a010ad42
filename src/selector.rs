// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Label selector matching for listener namespace policies.
//!
//! A Gateway listener can restrict which namespaces routes may bind from via
//! `allowedRoutes.namespaces.selector`. This module evaluates such a
//! [`LabelSelector`] against a namespace's labels, with Kubernetes
//! semantics: `matchLabels` and `matchExpressions` are ANDed, and an empty
//! selector matches everything.

use crate::crd::{LabelSelector, LabelSelectorRequirement};
use std::collections::BTreeMap;
use thiserror::Error;

/// Error for a selector expression the resolver cannot evaluate.
///
/// The resolver treats this as "deny" for the affected listener rather than
/// failing the route: a malformed selector on one Gateway must not block
/// bindings to the others.
#[derive(Error, Debug, Clone)]
pub enum SelectorError {
    /// The requirement uses an operator outside In/NotIn/Exists/DoesNotExist.
    #[error("invalid selector operator {operator:?} for key {key:?}")]
    InvalidOperator {
        /// The label key the requirement applies to
        key: String,
        /// The unsupported operator
        operator: String,
    },

    /// In/NotIn requirements need at least one value.
    #[error("selector requirement for key {key:?} has no values")]
    MissingValues {
        /// The label key the requirement applies to
        key: String,
    },
}

/// Evaluate a label selector against a label set.
///
/// # Errors
///
/// Returns a [`SelectorError`] when a `matchExpressions` entry is malformed.
pub fn matches_selector(
    selector: &LabelSelector,
    labels: &BTreeMap<String, String>,
) -> Result<bool, SelectorError> {
    if let Some(match_labels) = &selector.match_labels {
        for (key, value) in match_labels {
            if labels.get(key) != Some(value) {
                return Ok(false);
            }
        }
    }

    if let Some(expressions) = &selector.match_expressions {
        for requirement in expressions {
            if !matches_requirement(requirement, labels)? {
                return Ok(false);
            }
        }
    }

    Ok(true)
}

fn matches_requirement(
    requirement: &LabelSelectorRequirement,
    labels: &BTreeMap<String, String>,
) -> Result<bool, SelectorError> {
    let values = requirement.values.as_deref().unwrap_or_default();
    match requirement.operator.as_str() {
        "In" => {
            if values.is_empty() {
                return Err(SelectorError::MissingValues {
                    key: requirement.key.clone(),
                });
            }
            Ok(labels
                .get(&requirement.key)
                .is_some_and(|v| values.contains(v)))
        }
        "NotIn" => {
            if values.is_empty() {
                return Err(SelectorError::MissingValues {
                    key: requirement.key.clone(),
                });
            }
            Ok(labels
                .get(&requirement.key)
                .is_none_or(|v| !values.contains(v)))
        }
        "Exists" => Ok(labels.contains_key(&requirement.key)),
        "DoesNotExist" => Ok(!labels.contains_key(&requirement.key)),
        other => Err(SelectorError::InvalidOperator {
            key: requirement.key.clone(),
            operator: other.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "selector_tests.rs"]
mod selector_tests;
