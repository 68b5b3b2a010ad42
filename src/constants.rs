// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the gwdns source controller.
//!
//! This module contains the API identifiers and defaults used throughout the
//! codebase. Constants are organized by category for easy maintenance.

// ============================================================================
// Gateway API Constants
// ============================================================================

/// API group of the Gateway API resources we consume
pub const GATEWAY_GROUP: &str = "gateway.networking.k8s.io";

/// Kind name for `Gateway` resources
pub const KIND_GATEWAY: &str = "Gateway";

/// Kind name for `HTTPRoute` resources
pub const KIND_HTTP_ROUTE: &str = "HTTPRoute";

/// Kind name for `TLSRoute` resources
pub const KIND_TLS_ROUTE: &str = "TLSRoute";

/// Kind name for `TCPRoute` resources
pub const KIND_TCP_ROUTE: &str = "TCPRoute";

/// Condition type a parent Gateway sets once it has accepted a route
pub const CONDITION_ACCEPTED: &str = "Accepted";

/// Condition status value meaning the condition holds
pub const CONDITION_STATUS_TRUE: &str = "True";

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 4;

/// Default interval between resolution cycles for the dump binary (seconds)
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;
