// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # gwdns - Gateway API DNS Source Controller for Kubernetes
//!
//! gwdns watches Gateway API route objects (HTTPRoute, TLSRoute, TCPRoute)
//! and converts each into the set of DNS records it calls for: which
//! hostnames the route serves, and which Gateway addresses serve them.
//!
//! ## Overview
//!
//! The heart of the crate is the route-to-listener resolution engine: given
//! a route and the cluster's Gateways, decide which listeners the route is
//! actually permitted to bind to (namespace policy, kind allow-lists,
//! protocol compatibility, acceptance status), intersect the hostnames of
//! route and listener with most-specific-wins wildcard matching, and
//! accumulate the Gateway status addresses serving each resulting hostname.
//!
//! ## Modules
//!
//! - [`crd`] - typed views of the Gateway API resources we consume
//! - [`route`] - the route capability set the resolver depends on
//! - [`resolver`] - the route-to-listener resolution engine
//! - [`hostset`] - candidate hostname collection per route
//! - [`index`] - per-cycle Gateway and Namespace snapshot indexes
//! - [`selector`] - namespace label-selector evaluation
//! - [`fqdn`] - FQDN templating for hostname-less routes
//! - [`annotations`] - annotation keys and readers
//! - [`endpoint`] - provider-agnostic DNS endpoint records
//! - [`source`] - per-kind sources tying listing and resolution together
//!
//! ## Example
//!
//! ```rust,no_run
//! use gwdns::source::{HttpRouteSource, Source, SourceConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = kube::Client::try_default().await?;
//! let source = HttpRouteSource::new(client, SourceConfig::default())?;
//! for endpoint in source.endpoints().await? {
//!     println!("{} {} {:?}", endpoint.dns_name, endpoint.record_type, endpoint.targets);
//! }
//! # Ok(())
//! # }
//! ```

pub mod annotations;
pub mod constants;
pub mod crd;
pub mod endpoint;
pub mod errors;
pub mod fqdn;
pub mod hostset;
pub mod index;
pub mod resolver;
pub mod route;
pub mod selector;
pub mod source;

#[cfg(test)]
mod test_support;
