//! Tests for the reference resolver.

use std::sync::Arc;

use rstest::rstest;

use crate::context::ReferenceResolver;
use crate::context::error::ContextError;

#[rstest]
fn resolves_by_name_and_type() {
    let resolver = ReferenceResolver::new();
    resolver.bind("answer", 42_u32).expect("bind");

    assert_eq!(resolver.resolve::<u32>("answer").expect("resolve"), Some(42));
    assert_eq!(resolver.resolve::<String>("answer").expect("resolve"), None);
    assert!(resolver.is_bound("answer"));
}

#[rstest]
fn require_reports_missing_names() {
    let resolver = ReferenceResolver::new();
    assert_eq!(
        resolver.require::<u32>("missing"),
        Err(ContextError::UnresolvedReference("missing".to_owned()))
    );
}

#[rstest]
fn resolve_all_filters_by_type_in_name_order() {
    let resolver = ReferenceResolver::new();
    resolver.bind("b", "two".to_owned()).expect("bind");
    resolver.bind("a", "one".to_owned()).expect("bind");
    resolver.bind("n", 3_i64).expect("bind");

    let strings = resolver.resolve_all::<String>().expect("resolve");
    assert_eq!(
        strings,
        vec![("a".to_owned(), "one".to_owned()), ("b".to_owned(), "two".to_owned())]
    );
}

#[rstest]
fn resolve_or_bind_creates_once() {
    let resolver = ReferenceResolver::new();
    let first: Arc<String> = resolver
        .resolve_or_bind("queue", || Arc::new("created".to_owned()))
        .expect("bind");
    let second: Arc<String> = resolver
        .resolve_or_bind("queue", || Arc::new("other".to_owned()))
        .expect("resolve");

    assert!(Arc::ptr_eq(&first, &second));
}

#[rstest]
fn clones_share_bindings() {
    let resolver = ReferenceResolver::new();
    let other = resolver.clone();
    other.bind("shared", true).expect("bind");
    assert_eq!(resolver.resolve::<bool>("shared").expect("resolve"), Some(true));
}
