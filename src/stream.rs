//! Forward-only cursor over a lexed token sequence.
//!
//! [`TokenStream`] is the single piece of mutable state a parse owns: a read
//! index into an immutable token slice. The cursor only ever moves forward,
//! every grammar loop strictly advances it, and a stream is never shared
//! across parses, so parsing always terminates.
//!
//! [`TokenStream::read`] is the recursion point of the grammar: it hands the
//! stream to whichever rule owns the next token's kind, and that rule may
//! call `read` again for nested type expressions.

use std::collections::HashMap;

use crate::error::ParseError;
use crate::parser;
use crate::token::{Token, TokenKind};
use crate::types::{EnumType, Type};

/// A read-only, forward-only cursor over a pre-lexed token sequence.
pub struct TokenStream<'a> {
    tokens: &'a [Token],
    cursor: usize,
    /// Enum definitions used to resolve vacant symbols, keyed by name.
    enums: &'a HashMap<String, EnumType>,
}

impl<'a> TokenStream<'a> {
    pub fn new(tokens: &'a [Token], enums: &'a HashMap<String, EnumType>) -> Self {
        Self {
            tokens,
            cursor: 0,
            enums,
        }
    }

    /// Whether the cursor is at or past the last token.
    pub fn done(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// The token at the cursor, without advancing.
    pub fn peek(&self) -> Result<&Token, ParseError> {
        self.tokens.get(self.cursor).ok_or(ParseError::EndOfStream)
    }

    /// The kind of the token at the cursor, or `None` at the end of the
    /// stream. Convenience for the grammar's lookahead checks.
    pub fn peek_kind(&self) -> Option<TokenKind> {
        self.tokens.get(self.cursor).map(|token| token.kind)
    }

    /// Consume the token at the cursor and advance by one.
    pub fn forward(&mut self) -> Result<Token, ParseError> {
        let token = self
            .tokens
            .get(self.cursor)
            .cloned()
            .ok_or(ParseError::EndOfStream)?;
        self.cursor += 1;
        Ok(token)
    }

    /// Parse one full type expression starting at the cursor by dispatching
    /// to the grammar rule owning the next token's kind.
    pub fn read(&mut self) -> Result<Type, ParseError> {
        parser::read_type(self)
    }

    /// Look up a registered enum by name.
    pub(crate) fn resolve_enum(&self, name: &str) -> Option<&EnumType> {
        self.enums.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::tokenize;

    #[test]
    fn cursor_moves_forward_only() {
        let enums = HashMap::new();
        let tokens = tokenize("int|string");
        let mut stream = TokenStream::new(&tokens, &enums);

        assert!(!stream.done());
        assert_eq!(stream.peek().unwrap().symbol, "int");
        // Peeking twice does not advance.
        assert_eq!(stream.peek().unwrap().symbol, "int");

        assert_eq!(stream.forward().unwrap().symbol, "int");
        assert_eq!(stream.forward().unwrap().symbol, "|");
        assert_eq!(stream.forward().unwrap().symbol, "string");

        assert!(stream.done());
        assert_eq!(stream.peek(), Err(ParseError::EndOfStream));
        assert_eq!(stream.forward(), Err(ParseError::EndOfStream));
    }
}
