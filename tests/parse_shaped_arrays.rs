//! Shaped array and shaped list parsing.

use pretty_assertions::assert_eq;

use phpdoc_types::error::ParseError;
use phpdoc_types::parse_type;
use phpdoc_types::types::{
    ArrayType, ShapedArrayElement, ShapedArrayTail, ShapedArrayType, Type,
};

fn parse_shape(raw: &str) -> ShapedArrayType {
    match parse_type(raw) {
        Ok(Type::ShapedArray(shape)) => shape,
        other => panic!("expected a shaped array for `{raw}`, got {other:?}"),
    }
}

fn element(key: Type, ty: Type, optional: bool) -> ShapedArrayElement {
    ShapedArrayElement::new(key, ty, optional)
}

// ─── Basic shapes ───────────────────────────────────────────────────────────

#[test]
fn test_map_with_string_keys() {
    let shape = parse_shape("array{name: string, age: int}");
    assert_eq!(
        shape,
        ShapedArrayType::map(vec![
            element(Type::StringValue("name".into()), Type::String, false),
            element(Type::StringValue("age".into()), Type::Int, false),
        ])
    );
}

#[test]
fn test_implicit_integer_keys() {
    let shape = parse_shape("array{string, int}");
    assert_eq!(
        shape,
        ShapedArrayType::map(vec![
            element(Type::IntegerValue(0), Type::String, false),
            element(Type::IntegerValue(1), Type::Int, false),
        ])
    );
}

#[test]
fn test_quoted_string_keys() {
    let shape = parse_shape("array{'first key': int, \"second key\": string}");
    assert_eq!(
        shape.elements[0].key,
        Type::StringValue("first key".into())
    );
    assert_eq!(
        shape.elements[1].key,
        Type::StringValue("second key".into())
    );
}

#[test]
fn test_non_literal_key_is_coerced_to_string() {
    // `int` in key position is not a literal, so its textual form is used.
    let shape = parse_shape("array{int: string}");
    assert_eq!(shape.elements[0].key, Type::StringValue("int".into()));
}

#[test]
fn test_optional_element() {
    let shape = parse_shape("array{name: string, age?: int}");
    assert!(!shape.elements[0].optional);
    assert!(shape.elements[1].optional, "`age?` should be optional");
}

#[test]
fn test_trailing_comma_is_accepted() {
    let shape = parse_shape("array{name: string,}");
    assert_eq!(shape.elements.len(), 1);
}

#[test]
fn test_nested_shapes() {
    let shape = parse_shape("array{user: array{name: string}, tags: list{string}}");
    assert!(matches!(shape.elements[0].ty, Type::ShapedArray(_)));
    assert!(matches!(shape.elements[1].ty, Type::ShapedArray(_)));
}

#[test]
fn test_union_element_type() {
    let shape = parse_shape("array{id: int|string}");
    match &shape.elements[0].ty {
        Type::Union(union) => assert_eq!(union.types(), &[Type::Int, Type::String]),
        other => panic!("expected a union element type, got {other:?}"),
    }
}

// ─── The constructor matrix: {map, list} × {sealed, tail, marker} ───────────

#[test]
fn test_sealed_map() {
    let shape = parse_shape("array{a: int}");
    assert!(!shape.is_list);
    assert_eq!(shape.tail, ShapedArrayTail::Sealed);
    assert!(!shape.is_unsealed());
}

#[test]
fn test_sealed_list() {
    let shape = parse_shape("list{int}");
    assert!(shape.is_list);
    assert_eq!(shape.tail, ShapedArrayTail::Sealed);
}

#[test]
fn test_unsealed_map_with_tail_type() {
    let shape = parse_shape("array{a: int, ...array<string, int>}");
    assert!(!shape.is_list);
    assert!(shape.is_unsealed());
    assert_eq!(
        shape.tail,
        ShapedArrayTail::Unsealed(ArrayType::new(Type::String, Type::Int))
    );
}

#[test]
fn test_unsealed_list_with_tail_type() {
    let shape = parse_shape("list{int, ...array<int, string>}");
    assert!(shape.is_list);
    assert_eq!(
        shape.tail,
        ShapedArrayTail::Unsealed(ArrayType::new(Type::Int, Type::String))
    );
}

#[test]
fn test_unsealed_map_without_tail_type() {
    let shape = parse_shape("array{a: int, ...}");
    assert!(!shape.is_list);
    assert_eq!(shape.tail, ShapedArrayTail::UnsealedWithoutType);
}

#[test]
fn test_unsealed_list_without_tail_type() {
    let shape = parse_shape("list{int, ...}");
    assert!(shape.is_list);
    assert_eq!(shape.tail, ShapedArrayTail::UnsealedWithoutType);
}

// ─── List key constraints ───────────────────────────────────────────────────

#[test]
fn test_list_monotonic_keys_succeed() {
    let shape = parse_shape("list{0: string, 1: int, 2: bool}");
    let keys: Vec<&Type> = shape.elements.iter().map(|e| &e.key).collect();
    assert_eq!(
        keys,
        vec![
            &Type::IntegerValue(0),
            &Type::IntegerValue(1),
            &Type::IntegerValue(2)
        ]
    );
}

#[test]
fn test_list_key_not_starting_at_zero() {
    assert_eq!(
        parse_type("list{1: string}"),
        Err(ParseError::ShapedListNonMonotonicKey {
            key: 1,
            expected: 0
        })
    );
}

#[test]
fn test_list_key_with_gap() {
    assert_eq!(
        parse_type("list{0: string, 2: int}"),
        Err(ParseError::ShapedListNonMonotonicKey {
            key: 2,
            expected: 1
        })
    );
}

#[test]
fn test_list_keys_out_of_order() {
    assert_eq!(
        parse_type("list{1: string, 0: int}"),
        Err(ParseError::ShapedListNonMonotonicKey {
            key: 1,
            expected: 0
        })
    );
}

#[test]
fn test_list_string_key_is_rejected() {
    assert_eq!(
        parse_type("list{foo: string}"),
        Err(ParseError::ShapedListStringKey {
            key: "'foo'".into()
        })
    );
}

#[test]
fn test_map_allows_arbitrary_integer_keys() {
    // Maps have no monotonicity constraint.
    let shape = parse_shape("array{42: string, -1: int}");
    assert_eq!(shape.elements[0].key, Type::IntegerValue(42));
    assert_eq!(shape.elements[1].key, Type::IntegerValue(-1));
}

#[test]
fn test_list_tail_must_keep_integer_keys() {
    assert_eq!(
        parse_type("list{0: int, ...array<string, int>}"),
        Err(ParseError::ShapedListStringKey {
            key: "string".into()
        })
    );
}

#[test]
fn test_list_tail_with_array_key_domain_is_accepted() {
    // `array-key` admits plain integer keys, so it is a valid list tail.
    let shape = parse_shape("list{0: int, ...array<array-key, int>}");
    assert_eq!(
        shape.tail,
        ShapedArrayTail::Unsealed(ArrayType::new(Type::ArrayKey, Type::Int))
    );

    let shape = parse_shape("list{0: int, ...array}");
    assert_eq!(
        shape.tail,
        ShapedArrayTail::Unsealed(ArrayType::new(Type::ArrayKey, Type::Mixed))
    );
}

#[test]
fn test_list_tail_with_literal_integer_key_is_rejected() {
    // A literal key admits only that one key, not the full integer domain.
    assert_eq!(
        parse_type("list{0: int, ...array<5, int>}"),
        Err(ParseError::ShapedListStringKey { key: "5".into() })
    );
}

// ─── Optional ordering in lists ─────────────────────────────────────────────

#[test]
fn test_list_optional_after_required_succeeds() {
    let shape = parse_shape("list{0: int, 1?: string}");
    assert!(!shape.elements[0].optional);
    assert!(shape.elements[1].optional);
}

#[test]
fn test_list_required_after_optional_fails() {
    assert_eq!(
        parse_type("list{0?: int, 1: string}"),
        Err(ParseError::ShapedListRequiredValueAfterOptional { key: "1".into() })
    );
}

#[test]
fn test_map_allows_required_after_optional() {
    let shape = parse_shape("array{a?: int, b: string}");
    assert!(shape.elements[0].optional);
    assert!(!shape.elements[1].optional);
}

// ─── Failure conditions ─────────────────────────────────────────────────────

#[test]
fn test_empty_map_shape_is_rejected() {
    assert_eq!(
        parse_type("array{}"),
        Err(ParseError::ShapedArrayEmptyElements)
    );
}

#[test]
fn test_empty_list_shape_is_rejected() {
    assert_eq!(
        parse_type("list{}"),
        Err(ParseError::ShapedArrayEmptyElements)
    );
}

#[test]
fn test_missing_comma_between_elements() {
    assert!(matches!(
        parse_type("array{a: int b: string}"),
        Err(ParseError::ShapedArrayCommaMissing { .. })
    ));
}

#[test]
fn test_missing_closing_bracket() {
    let result = parse_type("array{a: int, b: string");
    match result {
        Err(ParseError::ShapedArrayClosingBracketMissing { elements }) => {
            // The partial state names both elements already parsed.
            assert_eq!(elements.len(), 2, "partial elements: {elements:?}");
        }
        other => panic!("expected missing closing bracket, got {other:?}"),
    }
}

#[test]
fn test_missing_colon_after_optional_marker() {
    assert!(matches!(
        parse_type("array{a? int}"),
        Err(ParseError::ShapedArrayColonTokenMissing { .. })
    ));
}

#[test]
fn test_missing_element_type_after_colon() {
    assert!(matches!(
        parse_type("array{a:"),
        Err(ParseError::ShapedArrayElementTypeMissing { .. })
    ));
}

#[test]
fn test_unsealed_marker_without_elements() {
    assert!(matches!(
        parse_type("array{...array<string, int>}"),
        Err(ParseError::ShapedArrayWithoutElementsWithUnsealedType { .. })
    ));
}

#[test]
fn test_unsealed_tail_must_be_an_array_type() {
    assert!(matches!(
        parse_type("array{a: int, ...string}"),
        Err(ParseError::ShapedArrayInvalidUnsealedType { .. })
    ));
}

#[test]
fn test_unexpected_tokens_after_unsealed_tail() {
    let result = parse_type("array{a: int, ...array<string, int> oops}");
    match result {
        Err(ParseError::ShapedArrayUnexpectedTokenAfterUnsealedType { unexpected, .. }) => {
            assert_eq!(unexpected.len(), 1);
            assert_eq!(unexpected[0].symbol, "oops");
        }
        other => panic!("expected unexpected-token failure, got {other:?}"),
    }
}
