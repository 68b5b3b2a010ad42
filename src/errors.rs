// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the source layer.
//!
//! The taxonomy follows the batch model of a resolution cycle: failures that
//! prevent building the Gateway/Namespace snapshot are fatal for the whole
//! cycle, failures scoped to one route abort only that route, and per-parent
//! anomalies (missing gateway, unaccepted route, foreign parent kind,
//! malformed listener selector) are not errors at all — the resolver skips
//! them with a log line, because a partial binding result is still useful.

use thiserror::Error;

use crate::fqdn::TemplateError;

/// Errors surfaced by the per-kind sources and the resolver.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Listing Routes, Gateways or Namespaces from the API server failed.
    ///
    /// Fatal for the resolution batch: without the candidate universe there
    /// is no meaningful partial result. The surrounding controller retries
    /// the whole cycle.
    #[error("failed to list {kind}: {source}")]
    ListFailed {
        /// Kind that failed to list (e.g. "HTTPRoute", "Gateway")
        kind: &'static str,
        /// Underlying Kubernetes client error
        #[source]
        source: kube::Error,
    },

    /// Executing the FQDN template against a route failed.
    ///
    /// Aborts resolution for that one route only; the batch caller logs it
    /// and continues with the remaining routes.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// The configured annotation filter expression could not be parsed.
    ///
    /// Raised at source construction, never mid-cycle.
    #[error("invalid annotation filter {filter:?}: {reason}")]
    InvalidAnnotationFilter {
        /// The filter expression as configured
        filter: String,
        /// Explanation of what is malformed
        reason: String,
    },
}
