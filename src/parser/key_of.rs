//! The `key-of<T>` rule.
//!
//! Projects the key type(s) out of an array-like sub-type, or the case
//! values out of a backed enum. A multi-key result becomes a union in
//! declaration order; a single key is returned directly, not wrapped in a
//! union of one.

use crate::error::ParseError;
use crate::stream::TokenStream;
use crate::token::TokenKind;
use crate::types::{EnumCaseValue, Type, UnionType};

/// Parse the remainder of a `key-of<T>` expression, with the stream
/// positioned right after the `key-of` symbol.
pub(crate) fn key_of_type(stream: &mut TokenStream) -> Result<Type, ParseError> {
    if stream.done() || stream.forward()?.kind != TokenKind::OpeningBracket {
        return Err(ParseError::KeyOfOpeningBracketMissing);
    }

    let sub_type = stream.read()?;

    if stream.done() || stream.forward()?.kind != TokenKind::ClosingBracket {
        return Err(ParseError::KeyOfClosingBracketMissing { sub_type });
    }

    match sub_type {
        Type::ShapedArray(shape) => {
            let mut keys: Vec<Type> = shape
                .elements
                .iter()
                .map(|element| element.key.clone())
                .collect();

            if keys.len() > 1 {
                return Ok(Type::Union(UnionType::new(keys)));
            }
            match keys.pop() {
                Some(key) => Ok(key),
                // Parsed shapes always carry at least one element; an empty
                // one can only be hand-built.
                None => Err(ParseError::KeyOfIncorrectSubType {
                    sub_type: Type::ShapedArray(shape),
                }),
            }
        }
        Type::Array(array) => Ok(*array.key),
        Type::Enum(enum_type) => {
            if !enum_type.is_backed() {
                return Err(ParseError::KeyOfIncorrectSubType {
                    sub_type: Type::Enum(enum_type),
                });
            }

            let mut cases = Vec::with_capacity(enum_type.cases.len());
            for case in &enum_type.cases {
                match &case.value {
                    Some(EnumCaseValue::Int(value)) => cases.push(Type::IntegerValue(*value)),
                    Some(EnumCaseValue::Str(value)) => cases.push(Type::StringValue(value.clone())),
                    None => {
                        return Err(ParseError::KeyOfIncorrectSubType {
                            sub_type: Type::Enum(enum_type.clone()),
                        });
                    }
                }
            }

            if cases.len() > 1 {
                return Ok(Type::Union(UnionType::new(cases)));
            }
            match cases.pop() {
                Some(case) => Ok(case),
                None => Err(ParseError::KeyOfIncorrectSubType {
                    sub_type: Type::Enum(enum_type),
                }),
            }
        }
        other => Err(ParseError::KeyOfIncorrectSubType { sub_type: other }),
    }
}
