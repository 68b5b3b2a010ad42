// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `annotations.rs`

use crate::annotations::{
    hostnames_from_annotations, matches_controller, targets_from_annotation,
    ttl_from_annotations, AnnotationFilter, CONTROLLER_ANNOTATION, HOSTNAME_ANNOTATION,
    TARGET_ANNOTATION, TTL_ANNOTATION,
};
use crate::test_support::{annotations, object_meta};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;

fn meta_with(pairs: &[(&str, &str)]) -> ObjectMeta {
    ObjectMeta {
        annotations: Some(annotations(pairs)),
        ..object_meta("default", "route")
    }
}

#[test]
fn test_hostname_annotation_splits_and_cleans() {
    let meta = meta_with(&[(
        HOSTNAME_ANNOTATION,
        "foo.example.com, bar.example.com. ,,  baz.example.com",
    )]);

    assert_eq!(
        hostnames_from_annotations(&meta),
        vec!["foo.example.com", "bar.example.com", "baz.example.com"]
    );
}

#[test]
fn test_hostname_annotation_absent() {
    assert!(hostnames_from_annotations(&object_meta("default", "route")).is_empty());
}

#[test]
fn test_target_annotation_splits() {
    let meta = meta_with(&[(TARGET_ANNOTATION, "1.2.3.4, lb.example.com ,")]);

    assert_eq!(
        targets_from_annotation(&meta),
        vec!["1.2.3.4", "lb.example.com"]
    );
    assert!(targets_from_annotation(&object_meta("default", "route")).is_empty());
}

#[test]
fn test_ttl_annotation_plain_seconds() {
    let meta = meta_with(&[(TTL_ANNOTATION, "300")]);
    assert_eq!(ttl_from_annotations(&meta), Some(300));
}

#[test]
fn test_ttl_annotation_suffixes() {
    assert_eq!(
        ttl_from_annotations(&meta_with(&[(TTL_ANNOTATION, "15s")])),
        Some(15)
    );
    assert_eq!(
        ttl_from_annotations(&meta_with(&[(TTL_ANNOTATION, "2m")])),
        Some(120)
    );
    assert_eq!(
        ttl_from_annotations(&meta_with(&[(TTL_ANNOTATION, "1h")])),
        Some(3600)
    );
}

#[test]
fn test_ttl_annotation_invalid_degrades_to_none() {
    assert_eq!(
        ttl_from_annotations(&meta_with(&[(TTL_ANNOTATION, "soon")])),
        None
    );
    assert_eq!(
        ttl_from_annotations(&meta_with(&[(TTL_ANNOTATION, "10d")])),
        None
    );
    assert_eq!(
        ttl_from_annotations(&object_meta("default", "route")),
        None
    );
}

#[test]
fn test_controller_annotation_gate() {
    // Absent annotation: we are responsible.
    assert!(matches_controller(&object_meta("default", "route")));
    assert!(matches_controller(&meta_with(&[(
        CONTROLLER_ANNOTATION,
        "gwdns"
    )])));
    assert!(!matches_controller(&meta_with(&[(
        CONTROLLER_ANNOTATION,
        "some-other-controller"
    )])));
}

#[test]
fn test_annotation_filter_empty_matches_everything() {
    let filter = AnnotationFilter::parse("").unwrap();

    assert!(filter.is_empty());
    assert!(filter.matches(None));
    assert!(filter.matches(Some(&annotations(&[("any", "thing")]))));
}

#[test]
fn test_annotation_filter_equals() {
    let filter = AnnotationFilter::parse("team=dns").unwrap();

    assert!(filter.matches(Some(&annotations(&[("team", "dns")]))));
    assert!(!filter.matches(Some(&annotations(&[("team", "web")]))));
    assert!(!filter.matches(None));
}

#[test]
fn test_annotation_filter_double_equals() {
    let filter = AnnotationFilter::parse("team==dns").unwrap();

    assert!(filter.matches(Some(&annotations(&[("team", "dns")]))));
    assert!(!filter.matches(Some(&annotations(&[("team", "web")]))));
}

#[test]
fn test_annotation_filter_not_equals() {
    let filter = AnnotationFilter::parse("team!=web").unwrap();

    assert!(filter.matches(Some(&annotations(&[("team", "dns")]))));
    // Absent keys satisfy !=.
    assert!(filter.matches(None));
    assert!(!filter.matches(Some(&annotations(&[("team", "web")]))));
}

#[test]
fn test_annotation_filter_exists_and_not_exists() {
    let filter = AnnotationFilter::parse("published, !legacy").unwrap();

    assert!(filter.matches(Some(&annotations(&[("published", "true")]))));
    assert!(!filter.matches(Some(&annotations(&[
        ("published", "true"),
        ("legacy", "yes")
    ]))));
    assert!(!filter.matches(None));
}

#[test]
fn test_annotation_filter_terms_are_anded() {
    let filter = AnnotationFilter::parse("team=dns,env=prod").unwrap();

    assert!(filter.matches(Some(&annotations(&[("team", "dns"), ("env", "prod")]))));
    assert!(!filter.matches(Some(&annotations(&[("team", "dns")]))));
}

#[test]
fn test_annotation_filter_rejects_malformed_terms() {
    assert!(AnnotationFilter::parse("=value").is_err());
    assert!(AnnotationFilter::parse("!").is_err());
    assert!(AnnotationFilter::parse("key in (a,b)").is_err());
}
