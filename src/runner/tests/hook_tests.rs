//! Tests for hook filters and name patterns.

use std::collections::BTreeSet;

use rstest::rstest;

use crate::runner::domain::{Hook, TestCase, matches_pattern};

#[rstest]
#[case("*", "anything", true)]
#[case("*", "", true)]
#[case("order*", "order_create", true)]
#[case("*_create", "order_create", true)]
#[case("order*create", "order_bulk_create", true)]
#[case("o*r*e", "orange", true)]
#[case("order", "order", true)]
#[case("order", "orders", false)]
#[case("*_delete", "order_create", false)]
#[case("a*b*c", "acb", false)]
#[case("", "", true)]
#[case("", "x", false)]
fn star_matches_any_run_of_characters(#[case] pattern: &str, #[case] text: &str, #[case] expected: bool) {
    assert_eq!(matches_pattern(pattern, text), expected);
}

#[rstest]
fn unfiltered_hook_applies_to_every_test() {
    assert!(Hook::new().applies_to(&TestCase::new("anything").in_package("com.example")));
}

#[rstest]
#[case("order_create", "shop.orders", true)]
#[case("order_create", "shop.billing", false)]
#[case("invoice_create", "shop.orders", false)]
fn every_pattern_must_match(#[case] name: &str, #[case] package: &str, #[case] expected: bool) {
    let hook = Hook::new()
        .with_name_pattern("order_*")
        .with_package_pattern("shop.orders*");

    assert_eq!(hook.applies_to(&TestCase::new(name).in_package(package)), expected);
}

#[rstest]
fn group_filter_needs_one_shared_group() {
    let hook = Hook::new().with_group("smoke").with_group("nightly");

    assert!(hook.applies_to(&TestCase::new("a").in_group("nightly")));
    assert!(!hook.applies_to(&TestCase::new("b").in_group("slow")));
    assert!(!hook.applies_to(&TestCase::new("c")));
}

#[rstest]
fn package_filtered_hooks_never_apply_to_suites() {
    let groups = BTreeSet::new();

    assert!(Hook::new().with_name_pattern("orders*").applies_to_suite("orders-suite", &groups));
    assert!(!Hook::new().with_package_pattern("*").applies_to_suite("orders-suite", &groups));
}
