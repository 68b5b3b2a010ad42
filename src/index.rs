// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Snapshot indexes the resolver works against.
//!
//! Built once per resolution cycle from the listed Gateways and Namespaces,
//! then treated as immutable: the resolver never observes a cache update
//! mid-cycle. Listener lookup is deliberately two-path — a by-section map of
//! one-element slices plus a separate all-listeners slice — instead of a
//! single map with a magic empty key, so the two lookups cannot alias.

use std::collections::BTreeMap;

use crate::crd::{Gateway, Listener};

/// A Gateway's listeners, indexed for parent-reference lookup.
#[derive(Clone, Debug, Default)]
pub struct ListenerSet {
    by_section: BTreeMap<String, Vec<Listener>>,
    all: Vec<Listener>,
}

impl ListenerSet {
    fn new(listeners: &[Listener]) -> Self {
        let mut by_section: BTreeMap<String, Vec<Listener>> = BTreeMap::new();
        for listener in listeners {
            if let Some(name) = &listener.name {
                by_section
                    .entry(name.clone())
                    .or_default()
                    .push(listener.clone());
            }
        }
        Self {
            by_section,
            all: listeners.to_vec(),
        }
    }

    /// Listeners for one section name. Missing sections yield an empty slice.
    #[must_use]
    pub fn by_section(&self, section: &str) -> &[Listener] {
        self.by_section.get(section).map_or(&[], Vec::as_slice)
    }

    /// Every listener of the Gateway, used when a parent reference does not
    /// name a section.
    #[must_use]
    pub fn all(&self) -> &[Listener] {
        &self.all
    }
}

/// One indexed Gateway: the object itself plus its listener lookup.
#[derive(Clone, Debug)]
pub struct GatewayEntry {
    /// The Gateway as listed at cycle start.
    pub gateway: Gateway,
    /// Listener lookup for this Gateway.
    pub listeners: ListenerSet,
}

/// Lookup from (namespace, name) to a Gateway's listener set.
#[derive(Clone, Debug, Default)]
pub struct GatewayIndex {
    entries: BTreeMap<(String, String), GatewayEntry>,
}

impl GatewayIndex {
    /// Index a Gateway snapshot. Gateways without namespace or name are
    /// skipped; the API server does not produce them.
    #[must_use]
    pub fn build(gateways: &[Gateway]) -> Self {
        let mut entries = BTreeMap::new();
        for gateway in gateways {
            let (Some(namespace), Some(name)) =
                (&gateway.metadata.namespace, &gateway.metadata.name)
            else {
                continue;
            };
            entries.insert(
                (namespace.clone(), name.clone()),
                GatewayEntry {
                    gateway: gateway.clone(),
                    listeners: ListenerSet::new(&gateway.spec.listeners),
                },
            );
        }
        Self { entries }
    }

    /// Look up a Gateway by namespace and name.
    #[must_use]
    pub fn get(&self, namespace: &str, name: &str) -> Option<&GatewayEntry> {
        self.entries
            .get(&(namespace.to_string(), name.to_string()))
    }

    /// Number of indexed Gateways.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Lookup from namespace name to its label set.
#[derive(Clone, Debug, Default)]
pub struct NamespaceIndex {
    labels: BTreeMap<String, BTreeMap<String, String>>,
}

impl NamespaceIndex {
    /// Index a Namespace snapshot.
    #[must_use]
    pub fn build(namespaces: &[k8s_openapi::api::core::v1::Namespace]) -> Self {
        let mut labels = BTreeMap::new();
        for namespace in namespaces {
            let Some(name) = &namespace.metadata.name else {
                continue;
            };
            labels.insert(
                name.clone(),
                namespace.metadata.labels.clone().unwrap_or_default(),
            );
        }
        Self { labels }
    }

    /// Labels of a namespace, or `None` when the namespace is not in the
    /// snapshot (which makes selector-based policies unevaluable).
    #[must_use]
    pub fn labels(&self, name: &str) -> Option<&BTreeMap<String, String>> {
        self.labels.get(name)
    }
}

#[cfg(test)]
#[path = "index_tests.rs"]
mod index_tests;
