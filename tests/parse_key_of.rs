//! `key-of<T>` resolution.

use pretty_assertions::assert_eq;

use phpdoc_types::error::ParseError;
use phpdoc_types::parse_type;
use phpdoc_types::parser::TypeParser;
use phpdoc_types::types::{EnumCase, EnumCaseValue, EnumType, Type};

fn parser_with_enums() -> TypeParser {
    let mut parser = TypeParser::new();
    parser.register_enum(EnumType::new(
        "Status",
        vec![
            EnumCase::new("Draft", Some(EnumCaseValue::Int(1))),
            EnumCase::new("Published", Some(EnumCaseValue::Int(2))),
            EnumCase::new("Archived", Some(EnumCaseValue::Int(3))),
        ],
    ));
    parser.register_enum(EnumType::new(
        "Single",
        vec![EnumCase::new("Only", Some(EnumCaseValue::Str("only".into())))],
    ));
    parser.register_enum(EnumType::new(
        "Suit",
        vec![
            EnumCase::new("Hearts", None),
            EnumCase::new("Spades", None),
        ],
    ));
    parser
}

// ─── Shaped arrays ──────────────────────────────────────────────────────────

#[test]
fn test_key_of_shape_yields_keys_in_declaration_order() {
    let ty = parse_type("key-of<array{a: int, b: string, c: bool}>").unwrap();
    match ty {
        Type::Union(union) => assert_eq!(
            union.types(),
            &[
                Type::StringValue("a".into()),
                Type::StringValue("b".into()),
                Type::StringValue("c".into()),
            ]
        ),
        other => panic!("expected a union of keys, got {other:?}"),
    }
}

#[test]
fn test_key_of_shape_with_single_key_is_not_wrapped() {
    let ty = parse_type("key-of<array{only: int}>").unwrap();
    assert_eq!(ty, Type::StringValue("only".into()));
}

#[test]
fn test_key_of_shape_with_integer_keys() {
    let ty = parse_type("key-of<list{string, string}>").unwrap();
    match ty {
        Type::Union(union) => assert_eq!(
            union.types(),
            &[Type::IntegerValue(0), Type::IntegerValue(1)]
        ),
        other => panic!("expected a union of integer keys, got {other:?}"),
    }
}

// ─── Generic arrays ─────────────────────────────────────────────────────────

#[test]
fn test_key_of_array_returns_key_type() {
    assert_eq!(
        parse_type("key-of<array<string, int>>").unwrap(),
        Type::String
    );
    assert_eq!(parse_type("key-of<array<int>>").unwrap(), Type::ArrayKey);
    assert_eq!(parse_type("key-of<list<string>>").unwrap(), Type::Int);
}

// ─── Enums ──────────────────────────────────────────────────────────────────

#[test]
fn test_key_of_backed_enum_yields_case_values_in_order() {
    let ty = parser_with_enums().parse("key-of<Status>").unwrap();
    match ty {
        Type::Union(union) => assert_eq!(
            union.types(),
            &[
                Type::IntegerValue(1),
                Type::IntegerValue(2),
                Type::IntegerValue(3),
            ]
        ),
        other => panic!("expected a union of case values, got {other:?}"),
    }
}

#[test]
fn test_key_of_single_case_enum_is_not_wrapped() {
    let ty = parser_with_enums().parse("key-of<Single>").unwrap();
    assert_eq!(ty, Type::StringValue("only".into()));
}

#[test]
fn test_key_of_pure_enum_is_rejected() {
    assert!(matches!(
        parser_with_enums().parse("key-of<Suit>"),
        Err(ParseError::KeyOfIncorrectSubType { .. })
    ));
}

// ─── Failure conditions ─────────────────────────────────────────────────────

#[test]
fn test_key_of_incorrect_sub_type() {
    assert_eq!(
        parse_type("key-of<int>"),
        Err(ParseError::KeyOfIncorrectSubType { sub_type: Type::Int })
    );
}

#[test]
fn test_key_of_missing_opening_bracket() {
    assert_eq!(
        parse_type("key-of int"),
        Err(ParseError::KeyOfOpeningBracketMissing)
    );
    assert_eq!(
        parse_type("key-of"),
        Err(ParseError::KeyOfOpeningBracketMissing)
    );
}

#[test]
fn test_key_of_missing_closing_bracket() {
    assert_eq!(
        parse_type("key-of<array<string, int>"),
        Err(ParseError::KeyOfClosingBracketMissing {
            sub_type: Type::Array(phpdoc_types::types::ArrayType::new(
                Type::String,
                Type::Int
            ))
        })
    );
}
