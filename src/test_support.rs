// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Shared fixture builders for unit tests.

use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::BTreeMap;

use crate::constants::{CONDITION_ACCEPTED, CONDITION_STATUS_TRUE, GATEWAY_GROUP, KIND_GATEWAY};
use crate::crd::{
    Condition, Gateway, GatewaySpec, GatewayStatus, GatewayStatusAddress, HTTPRoute,
    HTTPRouteSpec, Listener, ParentReference, ProtocolType, RouteParentStatus, RouteStatus,
    TCPRoute, TCPRouteSpec, TLSRoute, TLSRouteSpec,
};

pub(crate) fn object_meta(namespace: &str, name: &str) -> ObjectMeta {
    ObjectMeta {
        name: Some(name.to_string()),
        namespace: Some(namespace.to_string()),
        ..Default::default()
    }
}

pub(crate) fn annotations(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

pub(crate) fn namespace(name: &str) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub(crate) fn namespace_with_labels(name: &str, labels: &[(&str, &str)]) -> Namespace {
    Namespace {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: Some(annotations(labels)),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub(crate) fn listener(protocol: ProtocolType, hostname: Option<&str>) -> Listener {
    Listener {
        name: None,
        hostname: hostname.map(ToString::to_string),
        port: None,
        protocol,
        allowed_routes: None,
    }
}

pub(crate) fn named_listener(
    name: &str,
    protocol: ProtocolType,
    hostname: Option<&str>,
) -> Listener {
    Listener {
        name: Some(name.to_string()),
        ..listener(protocol, hostname)
    }
}

pub(crate) fn gateway_status(addresses: &[&str]) -> GatewayStatus {
    GatewayStatus {
        addresses: Some(
            addresses
                .iter()
                .map(|a| GatewayStatusAddress {
                    r#type: Some("IPAddress".to_string()),
                    value: (*a).to_string(),
                })
                .collect(),
        ),
        conditions: None,
    }
}

pub(crate) fn gateway(
    namespace: &str,
    name: &str,
    listeners: Vec<Listener>,
    addresses: &[&str],
) -> Gateway {
    Gateway {
        metadata: object_meta(namespace, name),
        spec: GatewaySpec {
            gateway_class_name: None,
            listeners,
        },
        status: Some(gateway_status(addresses)),
    }
}

pub(crate) fn parent_ref(namespace: &str, name: &str) -> ParentReference {
    ParentReference {
        group: Some(GATEWAY_GROUP.to_string()),
        kind: Some(KIND_GATEWAY.to_string()),
        namespace: Some(namespace.to_string()),
        name: name.to_string(),
        section_name: None,
        port: None,
    }
}

pub(crate) fn accepted(parent_ref: ParentReference) -> RouteParentStatus {
    RouteParentStatus {
        parent_ref,
        controller_name: None,
        conditions: vec![Condition {
            r#type: CONDITION_ACCEPTED.to_string(),
            status: CONDITION_STATUS_TRUE.to_string(),
            ..Default::default()
        }],
    }
}

pub(crate) fn http_route(
    namespace: &str,
    name: &str,
    hostnames: &[&str],
    parents: Vec<RouteParentStatus>,
) -> HTTPRoute {
    HTTPRoute {
        metadata: object_meta(namespace, name),
        spec: HTTPRouteSpec {
            parent_refs: None,
            hostnames: if hostnames.is_empty() {
                None
            } else {
                Some(hostnames.iter().map(ToString::to_string).collect())
            },
        },
        status: Some(RouteStatus { parents }),
    }
}

pub(crate) fn tls_route(
    namespace: &str,
    name: &str,
    hostnames: &[&str],
    parents: Vec<RouteParentStatus>,
) -> TLSRoute {
    TLSRoute {
        metadata: object_meta(namespace, name),
        spec: TLSRouteSpec {
            parent_refs: None,
            hostnames: if hostnames.is_empty() {
                None
            } else {
                Some(hostnames.iter().map(ToString::to_string).collect())
            },
        },
        status: Some(RouteStatus { parents }),
    }
}

pub(crate) fn tcp_route(
    namespace: &str,
    name: &str,
    parents: Vec<RouteParentStatus>,
) -> TCPRoute {
    TCPRoute {
        metadata: object_meta(namespace, name),
        spec: TCPRouteSpec { parent_refs: None },
        status: Some(RouteStatus { parents }),
    }
}
