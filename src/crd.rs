// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Gateway API resource types consumed by the source controller.
//!
//! These are typed views of the upstream `gateway.networking.k8s.io` CRDs —
//! we consume them, we do not own them. Only the fields the resolver and the
//! per-kind sources actually read are declared; everything else in the
//! upstream schema is ignored on deserialization.
//!
//! # Resource Types
//!
//! - [`Gateway`] - binding points (listeners) plus published status addresses
//! - [`HTTPRoute`] - HTTP routes declaring hostnames and parent Gateways
//! - [`TLSRoute`] - TLS passthrough routes (`v1alpha2`)
//! - [`TCPRoute`] - TCP routes, which have no hostname concept (`v1alpha2`)
//!
//! # Example: constructing a Gateway for tests
//!
//! ```rust
//! use gwdns::crd::{Gateway, GatewaySpec, Listener, ProtocolType};
//! use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
//!
//! let gateway = Gateway {
//!     metadata: ObjectMeta {
//!         name: Some("edge".to_string()),
//!         namespace: Some("infra".to_string()),
//!         ..Default::default()
//!     },
//!     spec: GatewaySpec {
//!         gateway_class_name: Some("istio".to_string()),
//!         listeners: vec![Listener {
//!             name: Some("web".to_string()),
//!             hostname: Some("*.example.com".to_string()),
//!             port: Some(443),
//!             protocol: ProtocolType::Https,
//!             allowed_routes: None,
//!         }],
//!     },
//!     status: None,
//! };
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Label selector to match Kubernetes resources.
///
/// A label selector is a label query over a set of resources. The result of matchLabels and
/// matchExpressions are `ANDed`. An empty label selector matches all objects.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LabelSelector {
    /// Map of {key,value} pairs. A single {key,value} in the matchLabels map is equivalent
    /// to an element of matchExpressions, whose key field is "key", the operator is "In",
    /// and the values array contains only "value". All requirements must be satisfied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,

    /// List of label selector requirements. All requirements must be satisfied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_expressions: Option<Vec<LabelSelectorRequirement>>,
}

/// A label selector requirement is a selector that contains values, a key, and an operator
/// that relates the key and values.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct LabelSelectorRequirement {
    /// The label key that the selector applies to.
    pub key: String,

    /// Operator represents a key's relationship to a set of values.
    /// Valid operators are In, `NotIn`, Exists and `DoesNotExist`.
    pub operator: String,

    /// An array of string values. If the operator is In or `NotIn`,
    /// the values array must be non-empty. If the operator is Exists or `DoesNotExist`,
    /// the values array must be empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,
}

/// Condition represents an observation of a resource's current state.
///
/// Routes report one condition list per parent Gateway; the source only ever
/// reads these, it never writes them.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct Condition {
    /// Type of condition, e.g. "Accepted", "ResolvedRefs", "Programmed".
    pub r#type: String,

    /// Status of the condition: True, False, or Unknown.
    pub status: String,

    /// Brief CamelCase reason for the condition's last transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message indicating details about the transition.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Last time the condition transitioned from one status to another (RFC3339 format).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<String>,
}

/// Listener protocol, as declared in `spec.listeners[].protocol`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ProtocolType {
    /// Plaintext HTTP.
    #[serde(rename = "HTTP")]
    Http,
    /// HTTP over TLS. Matches the same routes as HTTP.
    #[serde(rename = "HTTPS")]
    Https,
    /// TLS passthrough.
    #[serde(rename = "TLS")]
    Tls,
    /// Raw TCP.
    #[serde(rename = "TCP")]
    Tcp,
    /// Raw UDP.
    #[serde(rename = "UDP")]
    Udp,
}

/// Namespace admission policy for a listener (`allowedRoutes.namespaces.from`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum FromNamespaces {
    /// Routes from every namespace may bind.
    All,
    /// Only routes in the Gateway's own namespace may bind. The default.
    Same,
    /// Only routes in namespaces matched by `selector` may bind.
    Selector,
}

/// Namespace policy of a listener's `allowedRoutes`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteNamespaces {
    /// Which namespaces routes may be attached from. Defaults to `Same`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<FromNamespaces>,

    /// Namespace label selector, only consulted when `from` is `Selector`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<LabelSelector>,
}

/// A (group, kind) pair in a listener's route-kind allow-list.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
pub struct RouteGroupKind {
    /// API group of the allowed kind. Defaults to the Gateway API group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Kind of the allowed route, e.g. "HTTPRoute".
    pub kind: String,
}

/// Which routes a listener admits, by namespace and by kind.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllowedRoutes {
    /// Namespace admission policy. Unset means "same namespace only".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespaces: Option<RouteNamespaces>,

    /// Kind allow-list. Unset or empty means all kinds the listener's
    /// protocol supports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kinds: Option<Vec<RouteGroupKind>>,
}

/// A Gateway's named binding point.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Listener {
    /// Section name, referenced by a route's `parentRef.sectionName`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Hostname pattern served by this listener. Unset means "any host".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,

    /// Network port the listener accepts traffic on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,

    /// Listener protocol.
    pub protocol: ProtocolType,

    /// Route admission policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_routes: Option<AllowedRoutes>,
}

/// A network address published in a Gateway's status once it is programmed.
#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatusAddress {
    /// Address type, e.g. "IPAddress" or "Hostname".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#type: Option<String>,

    /// The address value itself.
    pub value: String,
}

/// Status of a Gateway. A Gateway with no addresses still resolves bindings,
/// just with an empty target set.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GatewayStatus {
    /// Addresses serving this Gateway's listeners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<GatewayStatusAddress>>,

    /// Gateway-level conditions. Not consulted by the resolver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
}

/// `Gateway` declares one or more listeners and publishes status addresses
/// once programmed by its controller.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "Gateway",
    namespaced,
    doc = "Gateway represents an instance of a service-traffic handling infrastructure, declaring listeners that routes may bind to."
)]
#[kube(status = "GatewayStatus")]
#[serde(rename_all = "camelCase")]
pub struct GatewaySpec {
    /// Name of the GatewayClass this Gateway belongs to. Not consulted by
    /// the resolver.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gateway_class_name: Option<String>,

    /// Binding points exposed by this Gateway.
    #[serde(default)]
    pub listeners: Vec<Listener>,
}

/// A route's reference to a parent Gateway, optionally narrowed to one
/// listener section and/or port.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParentReference {
    /// API group of the parent. Defaults to the Gateway API group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Kind of the parent. Defaults to "Gateway".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Namespace of the parent. Defaults to the route's own namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    /// Name of the parent Gateway.
    pub name: String,

    /// Listener section to bind to. Unset means all listeners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_name: Option<String>,

    /// Listener port to bind to. Unset means any port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
}

/// A route's own view of how one parent Gateway processed it.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RouteParentStatus {
    /// The parent this status entry describes.
    pub parent_ref: ParentReference,

    /// Controller that wrote this entry.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub controller_name: Option<String>,

    /// Conditions, notably "Accepted".
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// Common route status: one entry per parent that has processed the route.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema)]
pub struct RouteStatus {
    /// Per-parent processing status.
    #[serde(default)]
    pub parents: Vec<RouteParentStatus>,
}

/// `HTTPRoute` declares hostnames and parent Gateways for HTTP traffic.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "gateway.networking.k8s.io",
    version = "v1",
    kind = "HTTPRoute",
    namespaced,
    doc = "HTTPRoute provides a way to route HTTP requests, declaring hostnames and the Gateways it wishes to bind to."
)]
#[kube(status = "RouteStatus")]
#[serde(rename_all = "camelCase")]
pub struct HTTPRouteSpec {
    /// Gateways this route wants to be attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_refs: Option<Vec<ParentReference>>,

    /// Hostnames this route serves. Empty means "inherit from the listener".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,
}

/// `TLSRoute` declares SNI hostnames and parent Gateways for TLS passthrough.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "gateway.networking.k8s.io",
    version = "v1alpha2",
    kind = "TLSRoute",
    namespaced,
    doc = "TLSRoute routes TLS connections by SNI hostname without terminating TLS."
)]
#[kube(status = "RouteStatus")]
#[serde(rename_all = "camelCase")]
pub struct TLSRouteSpec {
    /// Gateways this route wants to be attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_refs: Option<Vec<ParentReference>>,

    /// SNI hostnames this route serves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hostnames: Option<Vec<String>>,
}

/// `TCPRoute` declares parent Gateways for raw TCP traffic. TCP has no
/// hostname concept; the route serves whatever hostname its listener does.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "gateway.networking.k8s.io",
    version = "v1alpha2",
    kind = "TCPRoute",
    namespaced,
    doc = "TCPRoute routes raw TCP connections to backends via a parent Gateway listener."
)]
#[kube(status = "RouteStatus")]
#[serde(rename_all = "camelCase")]
pub struct TCPRouteSpec {
    /// Gateways this route wants to be attached to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_refs: Option<Vec<ParentReference>>,
}
