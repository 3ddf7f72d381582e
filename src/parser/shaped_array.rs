//! The shaped-array/list rule: `array{…}` and `list{…}`.
//!
//! This is the densest rule of the grammar. A bare type inside the braces is
//! ambiguous until more context is known: it is a key if a colon follows,
//! otherwise it is the element's type with an implicit integer key. The rule
//! always attempts the key interpretation first and backtracks logically (no
//! stream rewind) when no colon shows up.
//!
//! Failure checks are ordered; each one carries the elements parsed so far
//! so callers can point at the exact spot that went wrong.

use crate::error::ParseError;
use crate::stream::TokenStream;
use crate::token::TokenKind;
use crate::types::{ArrayType, ShapedArrayElement, ShapedArrayType, Type};

/// Parse a shaped array, with the stream positioned at the opening `{`.
///
/// `is_list` enables the list-specific constraints: contiguous zero-based
/// integer keys, no string keys, and no required element after an optional
/// one.
pub(crate) fn shaped_array_type(
    stream: &mut TokenStream,
    is_list: bool,
) -> Result<ShapedArrayType, ParseError> {
    stream.forward()?; // the `{`

    let mut elements: Vec<ShapedArrayElement> = Vec::new();
    let mut index: usize = 0;
    let mut is_unsealed = false;
    let mut unsealed_type: Option<ArrayType> = None;
    let mut was_optional = false;

    while !stream.done() {
        if stream.peek_kind() == Some(TokenKind::ClosingCurlyBracket) {
            stream.forward()?;
            break;
        }

        if !elements.is_empty() && stream.forward()?.kind != TokenKind::Comma {
            return Err(ParseError::ShapedArrayCommaMissing { elements });
        }

        if stream.done() {
            return Err(ParseError::ShapedArrayClosingBracketMissing { elements });
        }

        // Trailing comma before the closing brace is accepted.
        if stream.peek_kind() == Some(TokenKind::ClosingCurlyBracket) {
            stream.forward()?;
            break;
        }

        let mut optional = false;

        if stream.peek_kind() == Some(TokenKind::TripleDots) {
            is_unsealed = true;
            stream.forward()?;
        }

        if stream.done() {
            return Err(ParseError::ShapedArrayClosingBracketMissing { elements });
        }

        // A vacant symbol in this position is a bare string key (or, without
        // a following colon, a plain string value).
        let ty_read: Type = match stream.peek()?.kind {
            TokenKind::Vacant => Type::StringValue(stream.forward()?.symbol),
            TokenKind::ClosingCurlyBracket if is_unsealed => {
                // `…, ...}` — unsealed with no tail type spelled out.
                stream.forward()?;
                break;
            }
            _ => stream.read()?,
        };

        if is_unsealed {
            if elements.is_empty() {
                return Err(ParseError::ShapedArrayWithoutElementsWithUnsealedType {
                    tail: ty_read,
                });
            }

            let tail = match ty_read {
                Type::Array(array) => array,
                other => {
                    return Err(ParseError::ShapedArrayInvalidUnsealedType {
                        elements,
                        tail: other,
                    });
                }
            };

            if stream.done() {
                return Err(ParseError::ShapedArrayClosingBracketMissing { elements });
            }

            if stream.peek_kind() != Some(TokenKind::ClosingCurlyBracket) {
                let mut unexpected = Vec::new();
                while !stream.done() && stream.peek_kind() != Some(TokenKind::ClosingCurlyBracket)
                {
                    unexpected.push(stream.forward()?);
                }
                return Err(ParseError::ShapedArrayUnexpectedTokenAfterUnsealedType {
                    elements,
                    tail,
                    unexpected,
                });
            }

            unsealed_type = Some(tail);
            continue; // the loop top consumes the closing brace
        }

        if stream.done() {
            // e.g. `array{int` — record the element for the diagnostic.
            elements.push(ShapedArrayElement::new(
                Type::IntegerValue(index as i64),
                ty_read,
                false,
            ));
            return Err(ParseError::ShapedArrayClosingBracketMissing { elements });
        }

        if stream.peek_kind() == Some(TokenKind::Nullable) {
            stream.forward()?;
            optional = true;

            if stream.done() {
                return Err(ParseError::ShapedArrayColonTokenMissing {
                    elements,
                    ty: ty_read,
                });
            }
        }

        let key: Type;
        let mut element_type: Option<Type> = None;

        if stream.peek_kind() == Some(TokenKind::Colon) {
            stream.forward()?;

            // The value read so far was the key after all. Non-literal keys
            // are coerced to a string key via their textual form.
            key = match ty_read {
                literal @ (Type::IntegerValue(_) | Type::StringValue(_)) => literal,
                other => Type::StringValue(other.to_string()),
            };

            match &key {
                Type::IntegerValue(value) => {
                    let expected = index;
                    index += 1;
                    if is_list && *value != expected as i64 {
                        return Err(ParseError::ShapedListNonMonotonicKey {
                            key: *value,
                            expected,
                        });
                    }
                }
                _ if is_list => {
                    return Err(ParseError::ShapedListStringKey {
                        key: key.to_string(),
                    });
                }
                _ => {}
            }
        } else {
            if optional {
                return Err(ParseError::ShapedArrayColonTokenMissing {
                    elements,
                    ty: ty_read,
                });
            }

            // No colon: the parsed value is the element type, keyed by the
            // running index.
            key = Type::IntegerValue(index as i64);
            index += 1;
            element_type = Some(ty_read);
        }

        let ty = match element_type {
            Some(ty) => ty,
            None => {
                if stream.done() {
                    return Err(ParseError::ShapedArrayElementTypeMissing {
                        elements,
                        key,
                        optional,
                    });
                }
                stream.read()?
            }
        };

        if is_list && !optional && was_optional {
            return Err(ParseError::ShapedListRequiredValueAfterOptional {
                key: key.to_string(),
            });
        }
        was_optional = optional;

        elements.push(ShapedArrayElement::new(key, ty, optional));

        if stream.done() {
            return Err(ParseError::ShapedArrayClosingBracketMissing { elements });
        }
    }

    if elements.is_empty() {
        return Err(ParseError::ShapedArrayEmptyElements);
    }

    // A list's unsealed tail must admit plain integer keys.
    if is_list {
        if let Some(tail) = &unsealed_type {
            if !tail.has_integer_key_domain() {
                return Err(ParseError::ShapedListStringKey {
                    key: tail.key.to_string(),
                });
            }
        }
    }

    Ok(match (unsealed_type, is_unsealed, is_list) {
        (Some(tail), _, true) => ShapedArrayType::unsealed_list(tail, elements),
        (Some(tail), _, false) => ShapedArrayType::unsealed(tail, elements),
        (None, true, true) => ShapedArrayType::unsealed_list_without_type(elements),
        (None, true, false) => ShapedArrayType::unsealed_without_type(elements),
        (None, false, true) => ShapedArrayType::list(elements),
        (None, false, false) => ShapedArrayType::map(elements),
    })
}
