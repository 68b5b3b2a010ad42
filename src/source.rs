// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Per-kind route sources: list, resolve, emit endpoints.
//!
//! A [`GatewayRouteSource`] is generic over the route kind. Each cycle it
//! lists routes, Gateways and Namespaces once, builds a [`RouteResolver`]
//! over that snapshot, resolves every route, and converts the resulting
//! bindings into [`Endpoint`] records. Listing failures abort the cycle;
//! everything scoped to a single route is logged and skipped so one bad
//! object cannot starve the rest of the cluster's records.
//!
//! The whole per-cycle computation lives in [`endpoints_from_snapshot`],
//! a pure function over the listed objects, so it can be exercised in tests
//! without an API server.

use async_trait::async_trait;
use k8s_openapi::api::core::v1::Namespace;
use k8s_openapi::NamespaceResourceScope;
use kube::api::ListParams;
use kube::{Api, Client};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::marker::PhantomData;
use tracing::{debug, warn};

use crate::annotations::{matches_controller, ttl_from_annotations, AnnotationFilter};
use crate::crd::{Gateway, HTTPRoute, TCPRoute, TLSRoute};
use crate::endpoint::{endpoints_for_hostname, Endpoint, RESOURCE_LABEL_KEY};
use crate::errors::SourceError;
use crate::fqdn::FqdnTemplate;
use crate::hostset::HostSetBuilder;
use crate::resolver::RouteResolver;
use crate::route::RouteObject;

/// A producer of desired DNS endpoint records.
#[async_trait]
pub trait Source: Send + Sync {
    /// Compute the desired endpoints from the current cluster state.
    async fn endpoints(&self) -> Result<Vec<Endpoint>, SourceError>;
}

/// Configuration shared by all route sources.
#[derive(Clone, Debug, Default)]
pub struct SourceConfig {
    /// Only consider routes in this namespace. `None` means all namespaces.
    pub namespace: Option<String>,

    /// Only consider Gateways in this namespace. `None` means all.
    pub gateway_namespace: Option<String>,

    /// Label selector applied when listing routes.
    pub label_filter: Option<String>,

    /// Label selector applied when listing Gateways.
    pub gateway_label_filter: Option<String>,

    /// Annotation filter applied to routes after listing.
    pub annotation_filter: Option<String>,

    /// FQDN template for routes that declare no hostname.
    pub fqdn_template: Option<String>,

    /// Append template hostnames even when the route declares its own.
    pub combine_fqdn_annotation: bool,

    /// Ignore the hostname annotation on routes.
    pub ignore_hostname_annotation: bool,
}

/// Source for one Gateway API route kind.
pub struct GatewayRouteSource<R> {
    client: Client,
    config: SourceConfig,
    annotation_filter: AnnotationFilter,
    fqdn_template: Option<FqdnTemplate>,
    _kind: PhantomData<R>,
}

/// Source over `HTTPRoute` objects.
pub type HttpRouteSource = GatewayRouteSource<HTTPRoute>;
/// Source over `TLSRoute` objects.
pub type TlsRouteSource = GatewayRouteSource<TLSRoute>;
/// Source over `TCPRoute` objects.
pub type TcpRouteSource = GatewayRouteSource<TCPRoute>;

impl<R> GatewayRouteSource<R>
where
    R: RouteObject
        + kube::Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug
        + Send
        + Sync,
{
    /// Create a source, parsing the template and annotation filter up front.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Template`] or
    /// [`SourceError::InvalidAnnotationFilter`] when the configured
    /// expressions do not parse.
    pub fn new(client: Client, config: SourceConfig) -> Result<Self, SourceError> {
        let fqdn_template = config
            .fqdn_template
            .as_deref()
            .map(FqdnTemplate::parse)
            .transpose()?;
        let annotation_filter = config
            .annotation_filter
            .as_deref()
            .map(AnnotationFilter::parse)
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            client,
            config,
            annotation_filter,
            fqdn_template,
            _kind: PhantomData,
        })
    }

    fn host_set(&self) -> HostSetBuilder {
        HostSetBuilder::new(
            self.fqdn_template.clone(),
            self.config.combine_fqdn_annotation,
            self.config.ignore_hostname_annotation,
        )
    }

    async fn list_routes(&self) -> Result<Vec<R>, SourceError> {
        let api: Api<R> = match self.config.namespace.as_deref() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let mut params = ListParams::default();
        if let Some(labels) = self.config.label_filter.as_deref() {
            params = params.labels(labels);
        }
        let list = api.list(&params).await.map_err(|source| {
            SourceError::ListFailed { kind: R::KIND, source }
        })?;
        Ok(list.items)
    }

    async fn list_gateways(&self) -> Result<Vec<Gateway>, SourceError> {
        let api: Api<Gateway> = match self.config.gateway_namespace.as_deref() {
            Some(namespace) => Api::namespaced(self.client.clone(), namespace),
            None => Api::all(self.client.clone()),
        };
        let mut params = ListParams::default();
        if let Some(labels) = self.config.gateway_label_filter.as_deref() {
            params = params.labels(labels);
        }
        let list = api.list(&params).await.map_err(|source| {
            SourceError::ListFailed { kind: "Gateway", source }
        })?;
        Ok(list.items)
    }

    async fn list_namespaces(&self) -> Result<Vec<Namespace>, SourceError> {
        let api: Api<Namespace> = Api::all(self.client.clone());
        let list = api.list(&ListParams::default()).await.map_err(|source| {
            SourceError::ListFailed { kind: "Namespace", source }
        })?;
        Ok(list.items)
    }
}

#[async_trait]
impl<R> Source for GatewayRouteSource<R>
where
    R: RouteObject
        + kube::Resource<Scope = NamespaceResourceScope, DynamicType = ()>
        + Clone
        + DeserializeOwned
        + Debug
        + Send
        + Sync,
{
    async fn endpoints(&self) -> Result<Vec<Endpoint>, SourceError> {
        let routes = self.list_routes().await?;
        let gateways = self.list_gateways().await?;
        let namespaces = self.list_namespaces().await?;
        debug!(
            routes = routes.len(),
            gateways = gateways.len(),
            namespaces = namespaces.len(),
            kind = R::KIND,
            "Listed snapshot for resolution cycle"
        );
        endpoints_from_snapshot(
            &routes,
            &gateways,
            &namespaces,
            &self.annotation_filter,
            self.host_set(),
        )
    }
}

/// Resolve a full snapshot into endpoint records.
///
/// Pure over its inputs; this is the whole per-cycle computation minus the
/// API listing.
///
/// # Errors
///
/// Never fails per-route — route-scoped problems are logged and skipped.
/// The `Result` is kept for parity with the listing path and future fatal
/// conditions.
pub fn endpoints_from_snapshot<R: RouteObject>(
    routes: &[R],
    gateways: &[Gateway],
    namespaces: &[Namespace],
    annotation_filter: &AnnotationFilter,
    host_set: HostSetBuilder,
) -> Result<Vec<Endpoint>, SourceError> {
    let resolver = RouteResolver::new(gateways, namespaces, host_set);
    let mut endpoints = Vec::new();

    for route in routes {
        let meta = route.metadata();
        if !matches_controller(meta) {
            debug!(
                route = %route.describe(),
                "Skipping route: controller annotation names another controller"
            );
            continue;
        }
        if !annotation_filter.matches(meta.annotations.as_ref()) {
            continue;
        }

        let bindings = match resolver.resolve(route) {
            Ok(bindings) => bindings,
            Err(err) => {
                warn!(
                    route = %route.describe(),
                    error = %err,
                    "Skipping route: resolution failed"
                );
                continue;
            }
        };
        if bindings.is_empty() {
            debug!(
                route = %route.describe(),
                "No endpoints could be generated from route"
            );
            continue;
        }

        let ttl = ttl_from_annotations(meta);
        let resource = format!("{}/{}", R::KIND.to_lowercase(), route.describe());
        let mut route_endpoints = Vec::new();
        for (hostname, targets) in &bindings {
            for endpoint in endpoints_for_hostname(hostname, targets, ttl) {
                route_endpoints.push(endpoint.with_label(RESOURCE_LABEL_KEY, &resource));
            }
        }
        debug!(
            route = %route.describe(),
            endpoints = route_endpoints.len(),
            "Endpoints generated from route"
        );
        endpoints.extend(route_endpoints);
    }

    Ok(endpoints)
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod source_tests;
