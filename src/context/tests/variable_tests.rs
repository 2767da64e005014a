//! Tests for variable storage and placeholder replacement.

use rstest::{fixture, rstest};
use serde_json::json;

use crate::context::TestContext;
use crate::context::error::ContextError;

#[fixture]
fn context() -> TestContext {
    TestContext::new()
}

#[rstest]
fn set_and_get_variable(context: TestContext) {
    context.set_variable("greeting", "hello").expect("set");
    assert_eq!(context.get_variable("greeting").expect("get"), json!("hello"));
    assert_eq!(context.get_variable("${greeting}").expect("get"), json!("hello"));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("${}")]
fn empty_variable_name_is_rejected(context: TestContext, #[case] name: &str) {
    assert_eq!(
        context.set_variable(name, "value"),
        Err(ContextError::InvalidVariableName)
    );
}

#[rstest]
fn unknown_variable_fails(context: TestContext) {
    assert_eq!(
        context.get_variable("missing"),
        Err(ContextError::UnknownVariable("missing".to_owned()))
    );
}

#[rstest]
fn placeholders_are_replaced_left_to_right(context: TestContext) {
    context.set_variable("a", "1").expect("set");
    context.set_variable("b", json!(2)).expect("set");
    let text = context
        .replace_dynamic_content("${a}+${b}=3")
        .expect("resolve");
    assert_eq!(text, "1+2=3");
}

#[rstest]
fn replaced_values_are_not_rescanned(context: TestContext) {
    context.set_variable("outer", "${inner}").expect("set");
    let text = context.replace_dynamic_content("${outer}").expect("resolve");
    assert_eq!(text, "${inner}");
}

#[rstest]
fn escaped_placeholder_stays_literal(context: TestContext) {
    let text = context
        .replace_dynamic_content("value is ${//name//}")
        .expect("resolve");
    assert_eq!(text, "value is ${name}");
}

#[rstest]
fn unclosed_placeholder_fails(context: TestContext) {
    assert!(matches!(
        context.replace_dynamic_content("broken ${name"),
        Err(ContextError::UnclosedVariable(_))
    ));
}

#[rstest]
fn quoted_replacement_wraps_values(context: TestContext) {
    context.set_variable("status", "open").expect("set");
    let text = context
        .replace_dynamic_content_quoted("${status} = 'open'")
        .expect("resolve");
    assert_eq!(text, "'open' = 'open'");
}

#[rstest]
fn dotted_names_navigate_json_values(context: TestContext) {
    context
        .set_variable("order", json!({"items": [{"id": 7}, {"id": 9}]}))
        .expect("set");
    assert_eq!(context.get_variable("order.items[1].id").expect("get"), json!(9));
    assert_eq!(
        context
            .replace_dynamic_content("id=${order.items[0].id}")
            .expect("resolve"),
        "id=7"
    );
}

#[rstest]
fn exact_name_wins_over_navigation(context: TestContext) {
    context.set_variable("a.b", "flat").expect("set");
    context.set_variable("a", json!({"b": "nested"})).expect("set");
    assert_eq!(context.get_variable("a.b").expect("get"), json!("flat"));
}

#[rstest]
fn single_placeholder_value_keeps_type(context: TestContext) {
    context.set_variable("count", json!(3)).expect("set");
    let resolved = context
        .resolve_dynamic_value(&json!({"n": "${count}", "label": "n=${count}"}))
        .expect("resolve");
    assert_eq!(resolved, json!({"n": 3, "label": "n=3"}));
}

#[rstest]
fn snapshot_lists_all_variables(context: TestContext) {
    context
        .set_variables([("x", json!(1)), ("y", json!(2))])
        .expect("set");
    let snapshot = context.variables().expect("snapshot");
    assert_eq!(snapshot.get("x"), Some(&json!(1)));
    assert_eq!(snapshot.get("y"), Some(&json!(2)));
    assert_eq!(context.remove_variable("x").expect("remove"), Some(json!(1)));
    assert!(!context.has_variable("x"));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_writers_do_not_lose_updates(context: TestContext) {
    let mut tasks = tokio::task::JoinSet::new();
    for idx in 0..32 {
        let shared = context.clone();
        tasks.spawn(async move { shared.set_variable(&format!("v{idx}"), json!(idx)) });
    }
    while let Some(result) = tasks.join_next().await {
        result.expect("task").expect("set");
    }
    assert_eq!(context.variables().expect("snapshot").len(), 32);
}
