// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider-agnostic DNS endpoint records.
//!
//! The final shape a source hands to the synchronization layer: one record
//! per (hostname, record type), with targets grouped by the record type each
//! target calls for — IPv4 addresses become A records, IPv6 become AAAA, and
//! anything else is assumed to be a hostname and becomes a CNAME.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::net::IpAddr;

/// Endpoint label carrying the cluster resource a record was derived from,
/// as `<kind>/<namespace>/<name>`.
pub const RESOURCE_LABEL_KEY: &str = "resource";

/// DNS record type of an endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    AAAA,
    /// Canonical name record.
    CNAME,
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::AAAA => write!(f, "AAAA"),
            Self::CNAME => write!(f, "CNAME"),
        }
    }
}

/// One desired DNS record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    /// Fully qualified hostname of the record.
    pub dns_name: String,

    /// Record targets, sorted and de-duplicated.
    pub targets: Vec<String>,

    /// Record type, inferred from the targets.
    pub record_type: RecordType,

    /// Record TTL in seconds; `None` means provider default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub record_ttl: Option<i64>,

    /// Bookkeeping labels, notably [`RESOURCE_LABEL_KEY`].
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub labels: BTreeMap<String, String>,
}

impl Endpoint {
    /// Attach a label, builder-style.
    #[must_use]
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        self.labels.insert(key.to_string(), value.to_string());
        self
    }
}

/// Record type a single target calls for.
fn suitable_type(target: &str) -> RecordType {
    match target.parse::<IpAddr>() {
        Ok(IpAddr::V4(_)) => RecordType::A,
        Ok(IpAddr::V6(_)) => RecordType::AAAA,
        Err(_) => RecordType::CNAME,
    }
}

/// Build the endpoint records for one resolved hostname.
///
/// Targets are grouped by their suitable record type, producing up to one
/// A, one AAAA and one CNAME endpoint. An empty hostname (the "any host"
/// sentinel of hostname-less route kinds) produces no records — there is no
/// DNS name to publish.
#[must_use]
pub fn endpoints_for_hostname(
    hostname: &str,
    targets: &[String],
    ttl: Option<i64>,
) -> Vec<Endpoint> {
    if hostname.is_empty() {
        return Vec::new();
    }

    let mut grouped: BTreeMap<RecordType, Vec<String>> = BTreeMap::new();
    for target in targets {
        grouped
            .entry(suitable_type(target))
            .or_default()
            .push(target.clone());
    }

    grouped
        .into_iter()
        .map(|(record_type, targets)| Endpoint {
            dns_name: hostname.to_string(),
            targets,
            record_type,
            record_ttl: ttl,
            labels: BTreeMap::new(),
        })
        .collect()
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod endpoint_tests;
