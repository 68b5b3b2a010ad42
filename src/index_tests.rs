// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `index.rs`

use crate::crd::ProtocolType;
use crate::index::{GatewayIndex, NamespaceIndex};
use crate::test_support::{gateway, listener, named_listener, namespace, namespace_with_labels};

#[test]
fn test_gateway_lookup_by_namespace_and_name() {
    let index = GatewayIndex::build(&[
        gateway("infra", "edge", vec![], &["1.2.3.4"]),
        gateway("default", "edge", vec![], &["5.6.7.8"]),
    ]);

    assert_eq!(index.len(), 2);
    assert!(index.get("infra", "edge").is_some());
    assert!(index.get("default", "edge").is_some());
    assert!(index.get("infra", "missing").is_none());
    assert!(index.get("other", "edge").is_none());
}

#[test]
fn test_empty_index() {
    let index = GatewayIndex::build(&[]);

    assert!(index.is_empty());
    assert!(index.get("default", "edge").is_none());
}

#[test]
fn test_section_lookup_returns_only_that_listener() {
    let gw = gateway(
        "infra",
        "edge",
        vec![
            named_listener("web", ProtocolType::Http, Some("foo.example.com")),
            named_listener("tls", ProtocolType::Tls, Some("bar.example.com")),
        ],
        &["1.2.3.4"],
    );
    let index = GatewayIndex::build(&[gw]);
    let entry = index.get("infra", "edge").unwrap();

    let web = entry.listeners.by_section("web");
    assert_eq!(web.len(), 1);
    assert_eq!(web[0].hostname.as_deref(), Some("foo.example.com"));

    assert!(entry.listeners.by_section("missing").is_empty());
}

#[test]
fn test_all_listeners_includes_unnamed() {
    let gw = gateway(
        "infra",
        "edge",
        vec![
            named_listener("web", ProtocolType::Http, None),
            listener(ProtocolType::Tcp, None),
        ],
        &["1.2.3.4"],
    );
    let index = GatewayIndex::build(&[gw]);
    let entry = index.get("infra", "edge").unwrap();

    // The unnamed listener is reachable via all() but has no section.
    assert_eq!(entry.listeners.all().len(), 2);
    assert!(entry.listeners.by_section("").is_empty());
}

#[test]
fn test_namespace_labels_lookup() {
    let index = NamespaceIndex::build(&[
        namespace_with_labels("prod-ns", &[("env", "prod")]),
        namespace("plain-ns"),
    ]);

    assert_eq!(
        index.labels("prod-ns").unwrap().get("env").map(String::as_str),
        Some("prod")
    );
    assert!(index.labels("plain-ns").unwrap().is_empty());
    assert!(index.labels("missing-ns").is_none());
}
