// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! The route capability set the resolver depends on.
//!
//! HTTPRoute, TLSRoute and TCPRoute are distinct API kinds, but resolution
//! only needs a handful of capabilities from each: metadata, the declared
//! hostnames, a protocol, and the per-parent status entries. [`RouteObject`]
//! captures exactly that set so the resolver never touches a concrete kind.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

use crate::constants::{KIND_HTTP_ROUTE, KIND_TCP_ROUTE, KIND_TLS_ROUTE};
use crate::crd::{HTTPRoute, ProtocolType, RouteParentStatus, TCPRoute, TLSRoute};

/// Protocol a route speaks, used for listener compatibility checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Protocol {
    /// Plaintext HTTP.
    Http,
    /// HTTP over TLS.
    Https,
    /// TLS passthrough.
    Tls,
    /// Raw TCP.
    Tcp,
    /// Raw UDP.
    Udp,
}

impl Protocol {
    /// Whether a listener speaking `listener` can serve this route.
    ///
    /// HTTP and HTTPS are one family; everything else must match exactly.
    #[must_use]
    pub fn matches_listener(self, listener: ProtocolType) -> bool {
        match self {
            Self::Http | Self::Https => {
                matches!(listener, ProtocolType::Http | ProtocolType::Https)
            }
            Self::Tls => listener == ProtocolType::Tls,
            Self::Tcp => listener == ProtocolType::Tcp,
            Self::Udp => listener == ProtocolType::Udp,
        }
    }
}

/// Capability set of a generic route.
///
/// The resolver and the host-set builder depend only on this trait, never on
/// the concrete kinds, so adding a route kind means one more impl block.
pub trait RouteObject {
    /// Kind name as it appears in listener kind allow-lists.
    const KIND: &'static str;

    /// Whether this kind has a hostname concept at all. False for TCP/UDP
    /// kinds, where an empty host on both sides is a universal match rather
    /// than "nothing to bind".
    const HAS_HOSTNAMES: bool;

    /// Object metadata snapshot.
    fn metadata(&self) -> &ObjectMeta;

    /// Hostname patterns from the native spec, in declaration order.
    fn hostnames(&self) -> &[String];

    /// Protocol this route speaks.
    fn protocol(&self) -> Protocol;

    /// The route's view of which parents have processed it.
    fn parent_statuses(&self) -> &[RouteParentStatus];

    /// `namespace/name` for log lines.
    fn describe(&self) -> String {
        format!(
            "{}/{}",
            self.metadata().namespace.as_deref().unwrap_or_default(),
            self.metadata().name.as_deref().unwrap_or_default(),
        )
    }
}

const NO_HOSTNAMES: &[String] = &[];

impl RouteObject for HTTPRoute {
    const KIND: &'static str = KIND_HTTP_ROUTE;
    const HAS_HOSTNAMES: bool = true;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn hostnames(&self) -> &[String] {
        self.spec.hostnames.as_deref().unwrap_or(NO_HOSTNAMES)
    }

    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    fn parent_statuses(&self) -> &[RouteParentStatus] {
        self.status.as_ref().map_or(&[], |s| &s.parents)
    }
}

impl RouteObject for TLSRoute {
    const KIND: &'static str = KIND_TLS_ROUTE;
    const HAS_HOSTNAMES: bool = true;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn hostnames(&self) -> &[String] {
        self.spec.hostnames.as_deref().unwrap_or(NO_HOSTNAMES)
    }

    fn protocol(&self) -> Protocol {
        Protocol::Tls
    }

    fn parent_statuses(&self) -> &[RouteParentStatus] {
        self.status.as_ref().map_or(&[], |s| &s.parents)
    }
}

impl RouteObject for TCPRoute {
    const KIND: &'static str = KIND_TCP_ROUTE;
    const HAS_HOSTNAMES: bool = false;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn hostnames(&self) -> &[String] {
        NO_HOSTNAMES
    }

    fn protocol(&self) -> Protocol {
        Protocol::Tcp
    }

    fn parent_statuses(&self) -> &[RouteParentStatus] {
        self.status.as_ref().map_or(&[], |s| &s.parents)
    }
}
