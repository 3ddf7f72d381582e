//! The recursive-descent grammar.
//!
//! [`TypeParser`] is the public entry point: it lexes a raw annotation
//! string, wraps the tokens in a [`TokenStream`] and reads exactly one type
//! expression from it. The per-construct rules live in the submodules; each
//! rule is a pure function that takes the stream by transient reference,
//! consumes tokens and returns an AST node or a [`ParseError`].
//!
//! `read_type` and the rules are mutually recursive through
//! [`TokenStream::read`]: a rule that needs a nested type expression (a
//! shaped-array element type, a generic parameter, the `key-of` sub-type)
//! calls back into the stream, which dispatches on the next token's kind.

mod generic;
mod key_of;
mod shaped_array;

use std::collections::HashMap;

use crate::error::ParseError;
use crate::stream::TokenStream;
use crate::token::{TokenKind, tokenize};
use crate::types::{EnumType, Type, UnionType};

/// Parses raw PHPDoc type expressions into [`Type`] nodes.
///
/// Enum annotations are resolved against the registered enum definitions,
/// which stand in for the reflection lookup the original PHP runtime
/// performs:
///
/// ```
/// use phpdoc_types::parser::TypeParser;
/// use phpdoc_types::types::Type;
///
/// let parser = TypeParser::new();
/// let ty = parser.parse("array{name: string, age?: int}").unwrap();
/// assert!(matches!(ty, Type::ShapedArray(_)));
/// ```
#[derive(Debug, Default)]
pub struct TypeParser {
    enums: HashMap<String, EnumType>,
}

impl TypeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make an enum definition available to the parser. A vacant symbol
    /// matching the enum's name will parse as [`Type::Enum`].
    pub fn register_enum(&mut self, enum_type: EnumType) {
        self.enums.insert(enum_type.name.clone(), enum_type);
    }

    /// Parse one complete type expression.
    ///
    /// Fails with [`ParseError::UnexpectedToken`] if tokens remain after the
    /// expression, so `"int string"` is rejected rather than silently
    /// truncated.
    pub fn parse(&self, raw: &str) -> Result<Type, ParseError> {
        tracing::trace!(%raw, "parsing type expression");

        let tokens = tokenize(raw);
        let mut stream = TokenStream::new(&tokens, &self.enums);

        let ty = stream.read()?;

        if let Ok(token) = stream.peek() {
            return Err(ParseError::UnexpectedToken {
                token: token.clone(),
            });
        }

        Ok(ty)
    }
}

/// The entry grammar rule: one atom, optionally continued into a union.
///
/// This is what [`TokenStream::read`] delegates to.
pub(crate) fn read_type(stream: &mut TokenStream) -> Result<Type, ParseError> {
    let first = read_atom(stream)?;

    if stream.peek_kind() != Some(TokenKind::Union) {
        return Ok(first);
    }

    let mut members = vec![first];
    while stream.peek_kind() == Some(TokenKind::Union) {
        stream.forward()?;
        members.push(read_atom(stream)?);
    }

    // `UnionType::new` splices members that are themselves unions (from a
    // `?` prefix), keeping the printed form re-parseable to an equal AST.
    Ok(Type::Union(UnionType::new(members)))
}

/// Parse a single non-union type, dispatching on the next token's kind.
fn read_atom(stream: &mut TokenStream) -> Result<Type, ParseError> {
    let token = stream.peek()?.clone();

    match token.kind {
        TokenKind::Scalar => {
            stream.forward()?;
            scalar_type(&token.symbol)
        }
        TokenKind::IntegerLiteral => {
            stream.forward()?;
            let value = token
                .symbol
                .parse::<i64>()
                .map_err(|_| ParseError::UnknownSymbol {
                    symbol: token.symbol.clone(),
                })?;
            Ok(Type::IntegerValue(value))
        }
        TokenKind::StringLiteral => {
            stream.forward()?;
            Ok(Type::StringValue(token.value().to_string()))
        }
        TokenKind::Array => {
            stream.forward()?;
            generic::array_type(stream, false)
        }
        TokenKind::List => {
            stream.forward()?;
            generic::array_type(stream, true)
        }
        TokenKind::KeyOf => {
            stream.forward()?;
            key_of::key_of_type(stream)
        }
        TokenKind::Nullable => {
            stream.forward()?;
            let inner = read_atom(stream)?;
            Ok(Type::Union(UnionType::new(vec![Type::Null, inner])))
        }
        TokenKind::Vacant => {
            stream.forward()?;
            match stream.resolve_enum(&token.symbol) {
                Some(enum_type) => Ok(Type::Enum(enum_type.clone())),
                None => Err(ParseError::UnknownSymbol {
                    symbol: token.symbol,
                }),
            }
        }
        _ => Err(ParseError::UnrecognizedToken { token }),
    }
}

fn scalar_type(symbol: &str) -> Result<Type, ParseError> {
    match symbol {
        "int" => Ok(Type::Int),
        "string" => Ok(Type::String),
        "float" => Ok(Type::Float),
        "bool" => Ok(Type::Bool),
        "mixed" => Ok(Type::Mixed),
        "null" => Ok(Type::Null),
        "array-key" => Ok(Type::ArrayKey),
        other => Err(ParseError::UnknownSymbol {
            symbol: other.to_string(),
        }),
    }
}
