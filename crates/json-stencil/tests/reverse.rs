//! Integration tests for reverse-template construction and application.

use json_stencil::{apply, apply_reverse, build_reverse, ErrorKind, MissingKeyPolicy, Options};
use serde_json::{json, Value};

fn round_trip(template: &Value, context: &Value) -> Value {
    let options = Options::default();
    let result = apply(template, context, &options).expect("apply must succeed");
    let reverse = build_reverse(template, &options).expect("build_reverse must succeed");
    apply_reverse(&reverse, &result).expect("apply_reverse must succeed")
}

#[test]
fn reconstructs_referenced_context() {
    let template = json!({
        "title": "${/doc/title}",
        "meta": {"pages": "${/doc/pages}", "draft": "${/flags/draft}"},
        "authors": ["${/doc/authors/0}", "${/doc/authors/1}"],
        "note": "static"
    });
    let context = json!({
        "doc": {"title": "Spec", "pages": 12, "authors": ["Ann", "Bo"]},
        "flags": {"draft": false}
    });
    // Array elements come back keyed by index, as objects.
    assert_eq!(
        round_trip(&template, &context),
        json!({
            "doc": {"title": "Spec", "pages": 12, "authors": {"0": "Ann", "1": "Bo"}},
            "flags": {"draft": false}
        })
    );
}

#[test]
fn restricted_to_referenced_paths() {
    let template = json!({"n": "${/user/name}"});
    let context = json!({"user": {"name": "Ann", "age": 41}, "other": true});
    assert_eq!(round_trip(&template, &context), json!({"user": {"name": "Ann"}}));
}

#[test]
fn whole_subtrees_round_trip() {
    let template = json!({"profile": "${/user}", "copy": ["${/list}"]});
    let context = json!({"user": {"name": "Ann", "tags": ["x"]}, "list": [1, [2], {"3": null}]});
    assert_eq!(round_trip(&template, &context), context);
}

#[test]
fn escaped_keys_round_trip() {
    let template = json!({"out/key": {"~t": "${/in~1key/~0v}"}});
    let context = json!({"in/key": {"~v": [1, 2]}});
    let reverse = build_reverse(&template, &Options::default()).unwrap();
    assert_eq!(reverse, json!({"in/key": {"~v": "/out~1key/~0t"}}));
    assert_eq!(round_trip(&template, &context), context);
}

#[test]
fn long_result_keys_round_trip() {
    let long = "k".repeat(1100);
    let mut inner = serde_json::Map::new();
    inner.insert(long.clone(), json!(["${/x}", "${/deep/y}"]));
    let mut template = serde_json::Map::new();
    template.insert(long.clone(), Value::Object(inner));
    let template = Value::Object(template);
    let context = json!({"x": 1, "deep": {"y": [null, "two"]}});

    let reverse = build_reverse(&template, &Options::default()).unwrap();
    assert_eq!(reverse["x"], json!(format!("/{long}/{long}/0")));
    assert_eq!(round_trip(&template, &context), context);
}

#[test]
fn custom_markers_are_honored() {
    let options = Options::default().with_markers("<<", ">>");
    let template = json!({"a": "<</x>>", "b": "${/y}"});
    let reverse = build_reverse(&template, &options).unwrap();
    assert_eq!(reverse, json!({"x": "/a"}));
}

#[test]
fn interpolated_strings_do_not_contribute() {
    let template = json!({"msg": "Hi ${/name}", "name": "${/name}"});
    let reverse = build_reverse(&template, &Options::default()).unwrap();
    assert_eq!(reverse, json!({"name": "/name"}));
}

#[test]
fn build_rejects_interpolation() {
    let options = Options::default().with_interpolation(true);
    let err = build_reverse(&json!({}), &options).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}

#[test]
fn build_validates_options() {
    let options = Options::default().with_markers("", "}");
    assert_eq!(
        build_reverse(&json!({}), &options).unwrap_err().kind(),
        ErrorKind::Configuration
    );
}

#[test]
fn build_allows_remove_policy() {
    let options = Options::default().with_missing_key(MissingKeyPolicy::Remove);
    assert_eq!(
        build_reverse(&json!("${/x}"), &options).unwrap(),
        json!({"x": ""})
    );
}

#[test]
fn conflict_policy_is_deeper_wins_then_last_write() {
    let template = json!({
        "a": "${/user}",
        "b": "${/user/name}",
        "c": "${/user}",
        "d": "${/user/id}",
        "e": "${/user/id}"
    });
    let reverse = build_reverse(&template, &Options::default()).unwrap();
    assert_eq!(reverse, json!({"user": {"name": "/b", "id": "/e"}}));
}

#[test]
fn conflicting_template_still_reconstructs_consistently() {
    let template = json!({"whole": "${/user}", "name": "${/user/name}"});
    let context = json!({"user": {"name": "Ann", "age": 41}});
    assert_eq!(round_trip(&template, &context), json!({"user": {"name": "Ann"}}));
}

#[test]
fn apply_reverse_reports_missing_pointer() {
    let reverse = json!({"user": {"name": "/name"}});
    let err = apply_reverse(&reverse, &json!({"other": 1})).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(err.to_string().contains("/name"), "got: {err}");
}

#[test]
fn apply_reverse_rejects_non_object_root() {
    for root in [json!("/x"), json!([]), json!(1), json!(false)] {
        let err = apply_reverse(&root, &json!({"x": 1})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed, "{root}");
    }
}

#[test]
fn apply_reverse_rejects_non_string_leaves() {
    for leaf in [json!(1), json!(null), json!(["/x"]), json!(true)] {
        let err = apply_reverse(&json!({"k": leaf}), &json!({"x": 1})).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Malformed, "{leaf}");
    }
}
