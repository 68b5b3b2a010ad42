// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Candidate hostname collection for a route.
//!
//! A route's candidate hostnames come from three places, in order: its
//! native spec, the hostname annotation (unless suppressed), and the FQDN
//! template (as a fallback when nothing else produced hosts, or additively
//! when combining is enabled). Routes whose native spec declared zero
//! hostnames additionally get an empty-string sentinel meaning "inherit
//! whatever hostname the bound listener specifies".

use crate::annotations::hostnames_from_annotations;
use crate::errors::SourceError;
use crate::fqdn::FqdnTemplate;
use crate::route::RouteObject;

/// Builds the ordered, de-duplicated candidate hostname list for a route.
///
/// Pure over its inputs; the only failure mode is template execution.
#[derive(Clone, Debug, Default)]
pub struct HostSetBuilder {
    fqdn_template: Option<FqdnTemplate>,
    combine_fqdn_annotation: bool,
    ignore_hostname_annotation: bool,
}

impl HostSetBuilder {
    /// Create a builder.
    ///
    /// Note: `combine_fqdn_annotation` and `ignore_hostname_annotation` are
    /// honored whether or not a template is configured. Changing that would
    /// silently alter records for existing users, so the behavior is kept
    /// even though the flags only make a visible difference alongside a
    /// template.
    #[must_use]
    pub fn new(
        fqdn_template: Option<FqdnTemplate>,
        combine_fqdn_annotation: bool,
        ignore_hostname_annotation: bool,
    ) -> Self {
        Self {
            fqdn_template,
            combine_fqdn_annotation,
            ignore_hostname_annotation,
        }
    }

    /// Candidate hostnames for `route`, ordered and de-duplicated.
    ///
    /// # Errors
    ///
    /// Propagates [`crate::fqdn::TemplateError`] from template execution.
    pub fn hosts<R: RouteObject>(&self, route: &R) -> Result<Vec<String>, SourceError> {
        let declared = route.hostnames();
        let mut hosts: Vec<String> = declared.to_vec();

        if !self.ignore_hostname_annotation {
            hosts.extend(hostnames_from_annotations(route.metadata()));
        }

        if let Some(template) = &self.fqdn_template {
            if hosts.is_empty() || self.combine_fqdn_annotation {
                hosts.extend(template.render(route.metadata())?);
            }
        }

        // The sentinel does not depend on what annotations or the template
        // produced, only on the native spec being hostless.
        if declared.is_empty() {
            hosts.push(String::new());
        }

        dedup_preserving_order(&mut hosts);
        Ok(hosts)
    }
}

fn dedup_preserving_order(hosts: &mut Vec<String>) {
    let mut seen = std::collections::BTreeSet::new();
    hosts.retain(|h| seen.insert(h.clone()));
}

#[cfg(test)]
#[path = "hostset_tests.rs"]
mod hostset_tests;
