//! The `array` / `list` rule: plain, angle-bracket generic, or shaped.
//!
//! With the `array`/`list` keyword already consumed, the next token decides
//! the form: `{` hands over to the shaped-array rule, `<` parses generic
//! parameters, anything else leaves a bare `array` / `list` with the widest
//! key and value domains.

use super::shaped_array;
use crate::error::ParseError;
use crate::stream::TokenStream;
use crate::token::TokenKind;
use crate::types::{ArrayType, Type};

pub(crate) fn array_type(stream: &mut TokenStream, is_list: bool) -> Result<Type, ParseError> {
    match stream.peek_kind() {
        Some(TokenKind::OpeningCurlyBracket) => {
            shaped_array::shaped_array_type(stream, is_list).map(Type::ShapedArray)
        }
        Some(TokenKind::OpeningBracket) => generic_array_type(stream, is_list),
        _ => Ok(Type::Array(if is_list {
            ArrayType::any_list()
        } else {
            ArrayType::any()
        })),
    }
}

/// Parse `array<V>`, `array<K, V>` or `list<V>`, with the stream positioned
/// at the opening `<`.
fn generic_array_type(stream: &mut TokenStream, is_list: bool) -> Result<Type, ParseError> {
    stream.forward()?; // the `<`

    let first = stream.read()?;

    let array = if !is_list && stream.peek_kind() == Some(TokenKind::Comma) {
        stream.forward()?;
        let value = stream.read()?;

        if !is_valid_key(&first) {
            return Err(ParseError::InvalidArrayKey { key: first });
        }

        ArrayType::new(first, value)
    } else if is_list {
        // Lists fix their key domain; only the value type is spelled out.
        ArrayType::new(Type::Int, first)
    } else {
        ArrayType::new(Type::ArrayKey, first)
    };

    if stream.done() || stream.forward()?.kind != TokenKind::ClosingBracket {
        return Err(ParseError::ArrayClosingBracketMissing {
            key: *array.key,
            value: *array.value,
        });
    }

    Ok(Type::Array(array))
}

/// Whether a type is usable as a generic array key: the `int`, `string` or
/// `array-key` domains, or a literal key.
fn is_valid_key(key: &Type) -> bool {
    matches!(
        key,
        Type::Int
            | Type::String
            | Type::ArrayKey
            | Type::IntegerValue(_)
            | Type::StringValue(_)
    )
}
