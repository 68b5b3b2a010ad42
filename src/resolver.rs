// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Route-to-listener resolution.
//!
//! Given one route and the Gateway/Namespace snapshot indexed at cycle
//! start, [`RouteResolver::resolve`] determines which Gateway listeners the
//! route may bind to, which hostnames route and listener jointly serve, and
//! which addresses serve each hostname. The result is a deterministic,
//! de-duplicated `hostname → targets` map.
//!
//! Resolution walks the route's parent status entries. Each parent passes
//! through a series of gates — Gateway kind/group, Gateway existence,
//! acceptance, section/port selection, protocol family, namespace/kind
//! admission — before hostname intersection runs per listener. Per-parent
//! anomalies skip that parent with a log line; only host-set construction
//! (template execution) can fail the route.
//!
//! Hostname intersection is most-specific-wins: for listener `*.example.com`
//! and route `foo.example.com` the binding is `foo.example.com`, whichever
//! side declared the wildcard. This mirrors DNS wildcard precedence — the
//! more specific name identifies the actual binding that should receive
//! targets.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::annotations::targets_from_annotation;
use crate::constants::{
    CONDITION_ACCEPTED, CONDITION_STATUS_TRUE, GATEWAY_GROUP, KIND_GATEWAY,
};
use crate::crd::{
    Condition, FromNamespaces, Gateway, Listener, ParentReference,
};
use crate::errors::SourceError;
use crate::hostset::HostSetBuilder;
use crate::index::{GatewayEntry, GatewayIndex, NamespaceIndex};
use crate::route::RouteObject;
use crate::selector::matches_selector;

/// Resolves routes against an immutable per-cycle snapshot.
///
/// Carries no mutable state: concurrent cycles each build their own
/// resolver, so no locking is needed and a cycle always sees one consistent
/// view.
pub struct RouteResolver {
    gateways: GatewayIndex,
    namespaces: NamespaceIndex,
    host_set: HostSetBuilder,
}

impl RouteResolver {
    /// Build a resolver over a Gateway and Namespace snapshot.
    #[must_use]
    pub fn new(
        gateways: &[Gateway],
        namespaces: &[k8s_openapi::api::core::v1::Namespace],
        host_set: HostSetBuilder,
    ) -> Self {
        Self {
            gateways: GatewayIndex::build(gateways),
            namespaces: NamespaceIndex::build(namespaces),
            host_set,
        }
    }

    /// Resolve one route to its `hostname → targets` bindings.
    ///
    /// An empty map is a normal outcome (the route bound nowhere), not an
    /// error. Target lists are sorted and free of duplicates.
    ///
    /// # Errors
    ///
    /// Only host-set construction can fail, via a template execution error;
    /// see [`SourceError::Template`].
    pub fn resolve<R: RouteObject>(
        &self,
        route: &R,
    ) -> Result<BTreeMap<String, Vec<String>>, SourceError> {
        let route_hosts = self.host_set.hosts(route)?;
        let route_namespace = route
            .metadata()
            .namespace
            .as_deref()
            .unwrap_or_default();

        let mut bindings: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for parent in route.parent_statuses() {
            let parent_ref = &parent.parent_ref;
            if !refers_to_gateway(parent_ref) {
                debug!(
                    route = %route.describe(),
                    parent = %parent_ref.name,
                    "Skipping non-Gateway parent reference"
                );
                continue;
            }

            let gateway_namespace =
                str_val(parent_ref.namespace.as_deref(), route_namespace);
            let Some(entry) = self.gateways.get(gateway_namespace, &parent_ref.name) else {
                debug!(
                    route = %route.describe(),
                    gateway = format!("{gateway_namespace}/{}", parent_ref.name),
                    "Skipping parent: Gateway not found in snapshot"
                );
                continue;
            };

            if !is_accepted(&parent.conditions) {
                debug!(
                    route = %route.describe(),
                    gateway = format!("{gateway_namespace}/{}", parent_ref.name),
                    "Skipping parent: route not accepted by Gateway"
                );
                continue;
            }

            let listeners = match parent_ref.section_name.as_deref() {
                Some(section) => entry.listeners.by_section(section),
                None => entry.listeners.all(),
            };
            let targets = gateway_targets(&entry.gateway);

            for listener in listeners {
                if !listener_selected(listener, parent_ref) {
                    continue;
                }
                if !route.protocol().matches_listener(listener.protocol) {
                    continue;
                }
                if !self.route_is_allowed::<R>(entry, listener, route_namespace) {
                    continue;
                }

                let listener_host = str_val(listener.hostname.as_deref(), "");
                for route_host in &route_hosts {
                    // Empty on both sides is "nothing to bind" for kinds
                    // that have hostnames, and a universal match for kinds
                    // that do not.
                    if listener_host.is_empty() && route_host.is_empty() && R::HAS_HOSTNAMES {
                        continue;
                    }
                    if let Some(host) = match_host(listener_host, route_host) {
                        bindings
                            .entry(host)
                            .or_default()
                            .extend(targets.iter().cloned());
                    }
                }
            }
        }

        for targets in bindings.values_mut() {
            targets.sort();
            targets.dedup();
        }

        Ok(bindings)
    }

    /// Evaluate a listener's `allowedRoutes` policy for a route.
    fn route_is_allowed<R: RouteObject>(
        &self,
        entry: &GatewayEntry,
        listener: &Listener,
        route_namespace: &str,
    ) -> bool {
        let allowed = listener.allowed_routes.as_ref();

        if let Some(kinds) = allowed.and_then(|a| a.kinds.as_ref()) {
            if !kinds.is_empty()
                && !kinds.iter().any(|k| {
                    k.kind == R::KIND
                        && str_val(k.group.as_deref(), GATEWAY_GROUP) == GATEWAY_GROUP
                })
            {
                return false;
            }
        }

        let namespaces = allowed.and_then(|a| a.namespaces.as_ref());
        let from = namespaces
            .and_then(|n| n.from)
            .unwrap_or(FromNamespaces::Same);
        let gateway_namespace = entry
            .gateway
            .metadata
            .namespace
            .as_deref()
            .unwrap_or_default();

        match from {
            FromNamespaces::All => true,
            FromNamespaces::Same => gateway_namespace == route_namespace,
            FromNamespaces::Selector => {
                let Some(selector) = namespaces.and_then(|n| n.selector.as_ref()) else {
                    warn!(
                        gateway = format!(
                            "{gateway_namespace}/{}",
                            entry.gateway.metadata.name.as_deref().unwrap_or_default()
                        ),
                        "Listener allows routes from Selector but declares no selector; denying"
                    );
                    return false;
                };
                let Some(labels) = self.namespaces.labels(route_namespace) else {
                    debug!(
                        namespace = route_namespace,
                        "Namespace not in snapshot; selector policy denies"
                    );
                    return false;
                };
                match matches_selector(selector, labels) {
                    Ok(matched) => matched,
                    Err(err) => {
                        warn!(
                            gateway = format!(
                                "{gateway_namespace}/{}",
                                entry.gateway.metadata.name.as_deref().unwrap_or_default()
                            ),
                            error = %err,
                            "Invalid namespace selector on listener; denying"
                        );
                        false
                    }
                }
            }
        }
    }
}

/// Default an optional string to a fallback.
fn str_val<'a>(value: Option<&'a str>, default: &'a str) -> &'a str {
    value.unwrap_or(default)
}

/// Whether a parent reference targets a Gateway (group and kind defaulted to
/// the canonical values when unset). Routes can also parent to e.g. a mesh;
/// those are not resolved here.
fn refers_to_gateway(parent_ref: &ParentReference) -> bool {
    str_val(parent_ref.group.as_deref(), GATEWAY_GROUP) == GATEWAY_GROUP
        && str_val(parent_ref.kind.as_deref(), KIND_GATEWAY) == KIND_GATEWAY
}

/// Whether the parent has accepted the route.
fn is_accepted(conditions: &[Condition]) -> bool {
    conditions
        .iter()
        .any(|c| c.r#type == CONDITION_ACCEPTED && c.status == CONDITION_STATUS_TRUE)
}

/// Port narrowing from the parent reference, applied after section lookup.
fn listener_selected(listener: &Listener, parent_ref: &ParentReference) -> bool {
    match parent_ref.port {
        Some(port) => listener.port == Some(port),
        None => true,
    }
}

/// A Gateway's DNS targets: the target annotation override when present,
/// otherwise its status addresses.
fn gateway_targets(gateway: &Gateway) -> Vec<String> {
    let overridden = targets_from_annotation(&gateway.metadata);
    if !overridden.is_empty() {
        return overridden;
    }
    gateway
        .status
        .as_ref()
        .and_then(|s| s.addresses.as_ref())
        .map(|addrs| addrs.iter().map(|a| a.value.clone()).collect())
        .unwrap_or_default()
}

/// Most-specific-wins hostname overlap.
///
/// Both sides are lowercased. An empty side matches anything and yields the
/// other side. Otherwise both are split on `.`: segment counts must agree,
/// segments must be equal, and a `*` is honored only as the very first
/// label, where the concrete side wins as the more specific result.
fn match_host(listener_host: &str, route_host: &str) -> Option<String> {
    let listener_host = listener_host.to_ascii_lowercase();
    let route_host = route_host.to_ascii_lowercase();

    if listener_host.is_empty() {
        return Some(route_host);
    }
    if route_host.is_empty() {
        return Some(listener_host);
    }

    let listener_labels: Vec<&str> = listener_host.split('.').collect();
    let route_labels: Vec<&str> = route_host.split('.').collect();
    if listener_labels.len() != route_labels.len() {
        return None;
    }

    let listener_wild = listener_labels[0] == "*";
    let route_wild = route_labels[0] == "*";

    for (position, (l, r)) in listener_labels.iter().zip(&route_labels).enumerate() {
        if l == r {
            continue;
        }
        if position == 0 && (listener_wild || route_wild) {
            continue;
        }
        return None;
    }

    if listener_wild && !route_wild {
        Some(route_host)
    } else if route_wild && !listener_wild {
        Some(listener_host)
    } else {
        // Identical strings (including the both-wildcard case).
        Some(route_host)
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod resolver_tests;
