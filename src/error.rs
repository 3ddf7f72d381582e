//! Structured parse errors.
//!
//! Every failure aborts the current parse immediately and is surfaced to the
//! caller as one [`ParseError`] variant. Variants carry the partially parsed
//! state (elements collected so far, offending sub-type or tokens) so a
//! caller can render a precise diagnostic; there is no recovery or retry
//! inside the parser.

use thiserror::Error;

use crate::token::Token;
use crate::types::{ArrayType, ShapedArrayElement, Type};

/// A structured type-expression parse failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The token stream ended while a construct was still incomplete.
    #[error("unexpected end of type expression")]
    EndOfStream,

    /// No grammar rule accepts the next token in type position.
    #[error("unexpected token `{}` in type expression", .token.symbol)]
    UnrecognizedToken { token: Token },

    /// A complete type was parsed but tokens remain.
    #[error("unexpected token `{}` after type expression", .token.symbol)]
    UnexpectedToken { token: Token },

    /// An identifier that is neither a built-in type nor a registered enum.
    #[error("cannot parse unknown symbol `{symbol}`")]
    UnknownSymbol { symbol: String },

    /// `array<K, V>` with a key type outside the `int|string|array-key`
    /// domain.
    #[error("invalid array key type `{key}`, it must be a valid string or integer")]
    InvalidArrayKey { key: Type },

    /// Missing `>` after the parameters of `array<…>` / `list<…>`.
    #[error("missing closing bracket in generic signature `array<{key}, {value}>`")]
    ArrayClosingBracketMissing { key: Type, value: Type },

    /// Two shaped-array elements without a separating comma.
    #[error("a comma is missing in shaped array signature `{}`", partial_shape(.elements))]
    ShapedArrayCommaMissing { elements: Vec<ShapedArrayElement> },

    /// The stream ended before the closing `}` of a shaped array.
    #[error("missing closing curly bracket in shaped array signature `{}`", partial_shape(.elements))]
    ShapedArrayClosingBracketMissing { elements: Vec<ShapedArrayElement> },

    /// An element was marked optional with `?` but no colon followed.
    #[error("missing colon in shaped array signature `{}`, after type `{ty}`", partial_shape(.elements))]
    ShapedArrayColonTokenMissing {
        elements: Vec<ShapedArrayElement>,
        ty: Type,
    },

    /// A key and colon were parsed but the stream ended before the element
    /// type.
    #[error("missing element type for key `{key}` in shaped array signature `{}`", partial_shape(.elements))]
    ShapedArrayElementTypeMissing {
        elements: Vec<ShapedArrayElement>,
        key: Type,
        optional: bool,
    },

    /// A shaped array with zero declared elements (`array{}`).
    #[error("missing elements in shaped array signature `array{{}}`")]
    ShapedArrayEmptyElements,

    /// An unsealed tail type without any declared element
    /// (`array{...array<string, int>}`).
    #[error("unsealed shaped array must have at least one declared element, got only `...{tail}`")]
    ShapedArrayWithoutElementsWithUnsealedType { tail: Type },

    /// The unsealed tail is not an array type (`array{foo: int, ...string}`).
    #[error("invalid unsealed type `{tail}` in shaped array signature `{}`, it should be a valid array type", partial_shape(.elements))]
    ShapedArrayInvalidUnsealedType {
        elements: Vec<ShapedArrayElement>,
        tail: Type,
    },

    /// Tokens between the unsealed tail type and the closing `}`.
    #[error("unexpected {} after unsealed type `{tail}` in shaped array signature `{}`", unexpected_symbols(.unexpected), partial_shape(.elements))]
    ShapedArrayUnexpectedTokenAfterUnsealedType {
        elements: Vec<ShapedArrayElement>,
        tail: ArrayType,
        unexpected: Vec<Token>,
    },

    /// A shaped-list key that breaks the contiguous `0, 1, 2, …` sequence.
    #[error("invalid key `{key}` in shaped list, expected `{expected}`: list keys must be a contiguous sequence starting at 0")]
    ShapedListNonMonotonicKey { key: i64, expected: usize },

    /// A string key in a shaped list, either on an element or via the
    /// unsealed tail's key domain.
    #[error("invalid string key `{key}` in shaped list, only sequential integer keys are allowed")]
    ShapedListStringKey { key: String },

    /// A required element after an optional one in a shaped list.
    #[error("required element `{key}` cannot follow an optional element in a shaped list")]
    ShapedListRequiredValueAfterOptional { key: String },

    /// `key-of` not followed by `<`.
    #[error("missing opening bracket after `key-of`, expected `key-of<…>`")]
    KeyOfOpeningBracketMissing,

    /// `key-of<T` without the closing `>`.
    #[error("missing closing bracket in signature `key-of<{sub_type}>`")]
    KeyOfClosingBracketMissing { sub_type: Type },

    /// `key-of` applied to a type that is neither array-like nor a backed
    /// enum.
    #[error("invalid type `{sub_type}` inside `key-of<…>`, it must be an array type, a shaped array or a backed enum")]
    KeyOfIncorrectSubType { sub_type: Type },
}

/// Render the elements collected so far as `array{…, …}` for diagnostics.
fn partial_shape(elements: &[ShapedArrayElement]) -> String {
    let mut out = String::from("array{");
    for (index, element) in elements.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        out.push_str(&element.to_string());
    }
    out.push('}');
    out
}

fn unexpected_symbols(tokens: &[Token]) -> String {
    let symbols: Vec<&str> = tokens.iter().map(|token| token.symbol.as_str()).collect();
    format!("token(s) `{}`", symbols.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_missing_message_includes_partial_shape() {
        let error = ParseError::ShapedArrayCommaMissing {
            elements: vec![ShapedArrayElement::new(
                Type::StringValue("foo".into()),
                Type::Int,
                false,
            )],
        };
        assert_eq!(
            error.to_string(),
            "a comma is missing in shaped array signature `array{'foo': int}`"
        );
    }

    #[test]
    fn non_monotonic_key_message() {
        let error = ParseError::ShapedListNonMonotonicKey {
            key: 2,
            expected: 1,
        };
        assert!(error.to_string().contains("invalid key `2`"));
        assert!(error.to_string().contains("expected `1`"));
    }
}
