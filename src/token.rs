//! Lexical tokens and the annotation lexer.
//!
//! A type expression such as `array{name: string, ...}` is split into a flat
//! sequence of [`Token`]s before parsing. Each token is a `kind` discriminant
//! plus the raw lexeme (`symbol`); the grammar rules in [`crate::parser`]
//! dispatch on the kind.
//!
//! The lexer is deliberately forgiving: anything it does not recognise
//! becomes a [`TokenKind::Vacant`] token, and it is the parser's job to
//! decide whether a vacant symbol is a shaped-array key, a registered enum
//! name, or an error.

/// The closed set of token kinds the grammar dispatches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `{`
    OpeningCurlyBracket,
    /// `}`
    ClosingCurlyBracket,
    /// `<`
    OpeningBracket,
    /// `>`
    ClosingBracket,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `...`
    TripleDots,
    /// `?`
    Nullable,
    /// `|`
    Union,
    /// `&`
    Intersection,
    /// The `array` keyword.
    Array,
    /// The `list` keyword.
    List,
    /// The `key-of` operator.
    KeyOf,
    /// A built-in scalar name (`int`, `string`, `float`, `bool`, `mixed`,
    /// `null`, `array-key`); the symbol tells which one.
    Scalar,
    /// An integer literal, possibly negative.
    IntegerLiteral,
    /// A quoted string literal; the symbol keeps the quotes.
    StringLiteral,
    /// Anything the lexer did not recognise (bare shaped-array keys, enum
    /// names, typos).
    Vacant,
}

/// One immutable lexical token: a kind plus the raw lexeme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub symbol: String,
}

impl Token {
    pub fn new(kind: TokenKind, symbol: impl Into<String>) -> Self {
        Self {
            kind,
            symbol: symbol.into(),
        }
    }

    /// The payload of the token: for string literals the content without the
    /// surrounding quotes, otherwise the raw symbol.
    pub fn value(&self) -> &str {
        if self.kind == TokenKind::StringLiteral {
            let stripped = self
                .symbol
                .strip_prefix(['\'', '"'])
                .unwrap_or(&self.symbol);
            return stripped.strip_suffix(['\'', '"']).unwrap_or(stripped);
        }
        &self.symbol
    }
}

/// Built-in scalar names lexed as [`TokenKind::Scalar`].
const SCALAR_SYMBOLS: &[&str] = &["int", "string", "float", "bool", "mixed", "null", "array-key"];

/// Split a raw type expression into tokens. Whitespace separates tokens and
/// is otherwise discarded.
pub fn tokenize(raw: &str) -> Vec<Token> {
    let chars: Vec<char> = raw.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let single = match c {
            '{' => Some(TokenKind::OpeningCurlyBracket),
            '}' => Some(TokenKind::ClosingCurlyBracket),
            '<' => Some(TokenKind::OpeningBracket),
            '>' => Some(TokenKind::ClosingBracket),
            ':' => Some(TokenKind::Colon),
            ',' => Some(TokenKind::Comma),
            '?' => Some(TokenKind::Nullable),
            '|' => Some(TokenKind::Union),
            '&' => Some(TokenKind::Intersection),
            _ => None,
        };
        if let Some(kind) = single {
            tokens.push(Token::new(kind, c.to_string()));
            i += 1;
            continue;
        }

        if c == '.' {
            let mut end = i;
            while end < chars.len() && chars[end] == '.' {
                end += 1;
            }
            let symbol: String = chars[i..end].iter().collect();
            let kind = if symbol == "..." {
                TokenKind::TripleDots
            } else {
                TokenKind::Vacant
            };
            tokens.push(Token::new(kind, symbol));
            i = end;
            continue;
        }

        if c == '\'' || c == '"' {
            // No escape sequences: scan to the matching quote, or to the end
            // of the input when the literal is left unterminated.
            let mut end = i + 1;
            while end < chars.len() && chars[end] != c {
                end += 1;
            }
            if end < chars.len() {
                end += 1;
            }
            let symbol: String = chars[i..end].iter().collect();
            tokens.push(Token::new(TokenKind::StringLiteral, symbol));
            i = end;
            continue;
        }

        if c.is_ascii_digit() || (c == '-' && chars.get(i + 1).is_some_and(char::is_ascii_digit)) {
            let mut end = i + 1;
            while end < chars.len() && chars[end].is_ascii_digit() {
                end += 1;
            }
            let symbol: String = chars[i..end].iter().collect();
            tokens.push(Token::new(TokenKind::IntegerLiteral, symbol));
            i = end;
            continue;
        }

        if c.is_alphabetic() || c == '_' || c == '\\' {
            // Identifiers may contain `-` (`array-key`, `key-of`) and `\`
            // (fully qualified names).
            let mut end = i + 1;
            while end < chars.len()
                && (chars[end].is_alphanumeric()
                    || chars[end] == '_'
                    || chars[end] == '-'
                    || chars[end] == '\\')
            {
                end += 1;
            }
            let symbol: String = chars[i..end].iter().collect();
            let kind = match symbol.as_str() {
                "array" => TokenKind::Array,
                "list" => TokenKind::List,
                "key-of" => TokenKind::KeyOf,
                s if SCALAR_SYMBOLS.contains(&s) => TokenKind::Scalar,
                _ => TokenKind::Vacant,
            };
            tokens.push(Token::new(kind, symbol));
            i = end;
            continue;
        }

        // Unknown punctuation becomes a vacant token of its own.
        tokens.push(Token::new(TokenKind::Vacant, c.to_string()));
        i += 1;
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(raw: &str) -> Vec<TokenKind> {
        tokenize(raw).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn shaped_array_tokens() {
        assert_eq!(
            kinds("array{name: string, age?: int}"),
            vec![
                TokenKind::Array,
                TokenKind::OpeningCurlyBracket,
                TokenKind::Vacant,
                TokenKind::Colon,
                TokenKind::Scalar,
                TokenKind::Comma,
                TokenKind::Vacant,
                TokenKind::Nullable,
                TokenKind::Colon,
                TokenKind::Scalar,
                TokenKind::ClosingCurlyBracket,
            ]
        );
    }

    #[test]
    fn triple_dots_and_lone_dots() {
        assert_eq!(kinds("..."), vec![TokenKind::TripleDots]);
        assert_eq!(kinds(".."), vec![TokenKind::Vacant]);
    }

    #[test]
    fn string_literal_keeps_quotes_in_symbol() {
        let tokens = tokenize("'foo bar'");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::StringLiteral);
        assert_eq!(tokens[0].symbol, "'foo bar'");
        assert_eq!(tokens[0].value(), "foo bar");
    }

    #[test]
    fn unterminated_string_literal_runs_to_end() {
        let tokens = tokenize("'oops");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].value(), "oops");
    }

    #[test]
    fn negative_integer_literal() {
        let tokens = tokenize("-42");
        assert_eq!(tokens[0].kind, TokenKind::IntegerLiteral);
        assert_eq!(tokens[0].symbol, "-42");
    }

    #[test]
    fn key_of_and_scalars() {
        assert_eq!(
            kinds("key-of<array<string, int>>"),
            vec![
                TokenKind::KeyOf,
                TokenKind::OpeningBracket,
                TokenKind::Array,
                TokenKind::OpeningBracket,
                TokenKind::Scalar,
                TokenKind::Comma,
                TokenKind::Scalar,
                TokenKind::ClosingBracket,
                TokenKind::ClosingBracket,
            ]
        );
        assert_eq!(kinds("array-key"), vec![TokenKind::Scalar]);
    }
}
