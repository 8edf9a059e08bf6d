//! Matcher Parity Tests
//!
//! `to_have_props` and `to_contain_props` must produce byte-identical
//! messages for every failure except undeclared properties:
//! - Non-object candidates are rejected with their rendering
//! - Non-callable entries are rejected before any field is checked
//! - Field failures are aggregated in declaration order
//! - Only the strict matcher rejects extra properties

use propshape::prop_types as pt;
use propshape::shape::ShapeResult;
use propshape::{expect, Candidate, Expectation, Record, Shape, ShapeEntry, ShapeError};
use serde_json::json;

// =============================================================================
// Helper Functions
// =============================================================================

type Matcher = fn(&Expectation, &Shape) -> ShapeResult<()>;

const MATCHERS: [(&str, Matcher); 2] = [
    ("to_have_props", Expectation::to_have_props),
    ("to_contain_props", Expectation::to_contain_props),
];

fn user_shape() -> Shape {
    Shape::new()
        .field("num", pt::number().is_required())
        .field("str", pt::string().is_required())
        .field("optional", pt::any())
        .field(
            "obj",
            pt::shape([("arr", pt::array_of(pt::string()).is_required())]).is_required(),
        )
}

fn valid_input() -> Record {
    Record::new()
        .with("num", f64::INFINITY)
        .with("str", "Hello")
        .with(
            "obj",
            Record::new()
                .with("bool", false)
                .with("arr", vec!["a", "b", "asdf"]),
        )
}

fn assert_message(result: ShapeResult<()>, expected: &str, matcher: &str) {
    match result {
        Ok(()) => panic!("{} passed, expected: {}", matcher, expected),
        Err(err) => assert_eq!(err.message(), expected, "matcher: {}", matcher),
    }
}

// =============================================================================
// Non-object Candidates
// =============================================================================

#[test]
fn test_number_candidate_rejected() {
    for (name, matcher) in MATCHERS {
        assert_message(
            matcher(&expect(4), &user_shape()),
            "cannot validate props for non-object `4`",
            name,
        );
    }
}

#[test]
fn test_null_candidate_rejected() {
    for (name, matcher) in MATCHERS {
        assert_message(
            matcher(&expect(json!(null)), &user_shape()),
            "cannot validate props for non-object `null`",
            name,
        );
    }
}

#[test]
fn test_undefined_candidate_rejected() {
    for (name, matcher) in MATCHERS {
        assert_message(
            matcher(&expect(Candidate::Undefined), &user_shape()),
            "cannot validate props for non-object `undefined`",
            name,
        );
    }
}

#[test]
fn test_array_candidate_rejected() {
    for (name, matcher) in MATCHERS {
        let result = matcher(&expect(json!([1, 2, 3])), &user_shape());
        assert!(matches!(result, Err(ShapeError::NotAnObject { .. })));
        assert_message(result, "cannot validate props for non-object `[ 1, 2, 3 ]`", name);
    }
}

// =============================================================================
// Shape Definition Errors
// =============================================================================

#[test]
fn test_non_callable_entry_rejected() {
    let shape = Shape::new().entry("foo", Candidate::from("bar"));
    for (name, matcher) in MATCHERS {
        assert_message(
            matcher(&expect(json!({})), &shape),
            "invalid validator (not a function): bar",
            name,
        );
    }
}

// =============================================================================
// Field Failures
// =============================================================================

#[test]
fn test_mismatch_lists_every_failure() {
    let input = json!({
        "num": "asdf",
        "obj": { "arr": ["a", "b", true] }
    });
    let expected = "invalid propTypes\n \
- Invalid prop `num` of type `string` supplied to `expectation`, expected `number`.\n \
- Required prop `str` was not specified in `expectation`.\n \
- Invalid prop `obj.arr[2]` of type `boolean` supplied to `expectation`, expected `string`.";

    for (name, matcher) in MATCHERS {
        let result = matcher(&expect(input.clone()), &user_shape());
        if let Err(err) = &result {
            let fields: Vec<&str> = err.failures().iter().map(|f| f.field.as_str()).collect();
            assert_eq!(fields, vec!["num", "str", "obj"]);
        }
        assert_message(result, expected, name);
    }
}

#[test]
fn test_shape_name_appears_in_messages() {
    let shape = Shape::from_entries([
        ("__name__", ShapeEntry::from(Candidate::from("My Shape"))),
        ("num", ShapeEntry::from(pt::number())),
    ]);
    let expected =
        "invalid propTypes\n - Invalid prop `num` of type `string` supplied to `My Shape`, expected `number`.";

    assert_message(
        expect(json!({"num": "1"})).to_have_props(&shape),
        expected,
        "to_have_props",
    );
    assert_message(
        expect(json!({"num": "1", "foo": "bar"})).to_contain_props(&shape),
        expected,
        "to_contain_props",
    );
}

// =============================================================================
// Extra Properties
// =============================================================================

#[test]
fn test_extra_props_policy() {
    let input = valid_input().with("extraProperty", "property");

    assert_message(
        expect(input.clone()).to_have_props(&user_shape()),
        "input has extra props: extraProperty",
        "to_have_props",
    );
    assert!(expect(input).to_contain_props(&user_shape()).is_ok());
}

#[test]
fn test_extra_props_reported_before_field_failures() {
    let input = json!({"num": "wrong", "b": 1, "a": 2});
    let err = expect(input).to_have_props(&user_shape()).unwrap_err();
    assert_eq!(err.extra_props(), Some(&["b".to_string(), "a".to_string()][..]));
    assert_eq!(err.message(), "input has extra props: b, a");
}

// =============================================================================
// Passing Candidates
// =============================================================================

#[test]
fn test_matching_candidate_passes() {
    for (name, matcher) in MATCHERS {
        assert!(
            matcher(&expect(valid_input()), &user_shape()).is_ok(),
            "matcher: {}",
            name
        );
    }
}

#[test]
fn test_empty_shape_accepts_empty_record() {
    for (_, matcher) in MATCHERS {
        assert!(matcher(&expect(json!({})), &Shape::new()).is_ok());
    }
}
