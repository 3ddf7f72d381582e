//! The type AST produced by the parser.
//!
//! This module contains all the "model" enums and structs that represent a
//! parsed PHPDoc type expression: built-in scalars, literal value types,
//! generic arrays, shaped arrays/lists, unions, and backed enums.
//!
//! Every node is an immutable value: nodes are created during parsing, never
//! mutated afterwards, and owned by the larger expression that references
//! them (a tree, no sharing and no cycles).

use std::fmt;

/// A parsed PHPDoc type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// `mixed` — matches anything.
    Mixed,
    /// `null`
    Null,
    /// `bool`
    Bool,
    /// `float`
    Float,
    /// `int`
    Int,
    /// `string`
    String,
    /// `array-key` — the PHP array key domain (`int|string`).
    ArrayKey,
    /// A fixed integer literal (e.g. `42` in `array{42: string}`).
    IntegerValue(i64),
    /// A fixed string literal (e.g. `'foo'` or a bare shaped-array key).
    StringValue(String),
    /// A homogeneous array (`array<K, V>`, `list<V>`, plain `array`).
    Array(ArrayType),
    /// A shaped array or list (`array{…}` / `list{…}`).
    ShapedArray(ShapedArrayType),
    /// A union of alternatives (`A|B|C`).
    Union(UnionType),
    /// A reference to a registered enum.
    Enum(EnumType),
}

/// A homogeneous key/value array type.
///
/// `list<V>` annotations are represented as `ArrayType { key: Int, value: V }`;
/// sequential-key ordering beyond shaped lists is not tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayType {
    pub key: Box<Type>,
    pub value: Box<Type>,
}

impl ArrayType {
    pub fn new(key: Type, value: Type) -> Self {
        Self {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// The type of a bare `array` annotation: `array<array-key, mixed>`.
    pub fn any() -> Self {
        Self::new(Type::ArrayKey, Type::Mixed)
    }

    /// The type of a bare `list` annotation: `array<int, mixed>`.
    pub fn any_list() -> Self {
        Self::new(Type::Int, Type::Mixed)
    }

    /// Whether plain integer keys conform to this array's key domain, i.e.
    /// whether it is a valid unsealed tail for a shaped **list**. `array-key`
    /// qualifies; a literal integer key does not, since it only admits that
    /// one key.
    pub fn has_integer_key_domain(&self) -> bool {
        matches!(*self.key, Type::Int | Type::ArrayKey)
    }
}

/// One `key: type` slot of a shaped array.
///
/// The key is always an [`Type::IntegerValue`] or [`Type::StringValue`];
/// non-literal keys are coerced to their textual form during parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedArrayElement {
    pub key: Type,
    pub ty: Type,
    /// Optional elements (marked `?` before the colon) may be absent at
    /// runtime.
    pub optional: bool,
}

impl ShapedArrayElement {
    pub fn new(key: Type, ty: Type, optional: bool) -> Self {
        Self { key, ty, optional }
    }
}

/// What a shaped array allows beyond its declared elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapedArrayTail {
    /// No extra entries are allowed.
    Sealed,
    /// Extra entries are allowed and described by the given array type
    /// (`array{foo: int, ...array<string, int>}`).
    Unsealed(ArrayType),
    /// Extra entries are allowed with no constraint spelled out
    /// (`array{foo: int, ...}`).
    UnsealedWithoutType,
}

/// A shaped array or shaped list: an ordered set of keyed slots, optionally
/// open-ended via an unsealed tail.
///
/// Shaped **lists** additionally require keys to form the contiguous
/// zero-based sequence `0, 1, 2, …`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapedArrayType {
    pub elements: Vec<ShapedArrayElement>,
    pub is_list: bool,
    pub tail: ShapedArrayTail,
}

impl ShapedArrayType {
    pub fn map(elements: Vec<ShapedArrayElement>) -> Self {
        Self {
            elements,
            is_list: false,
            tail: ShapedArrayTail::Sealed,
        }
    }

    pub fn list(elements: Vec<ShapedArrayElement>) -> Self {
        Self {
            elements,
            is_list: true,
            tail: ShapedArrayTail::Sealed,
        }
    }

    pub fn unsealed(tail: ArrayType, elements: Vec<ShapedArrayElement>) -> Self {
        Self {
            elements,
            is_list: false,
            tail: ShapedArrayTail::Unsealed(tail),
        }
    }

    pub fn unsealed_list(tail: ArrayType, elements: Vec<ShapedArrayElement>) -> Self {
        Self {
            elements,
            is_list: true,
            tail: ShapedArrayTail::Unsealed(tail),
        }
    }

    pub fn unsealed_without_type(elements: Vec<ShapedArrayElement>) -> Self {
        Self {
            elements,
            is_list: false,
            tail: ShapedArrayTail::UnsealedWithoutType,
        }
    }

    pub fn unsealed_list_without_type(elements: Vec<ShapedArrayElement>) -> Self {
        Self {
            elements,
            is_list: true,
            tail: ShapedArrayTail::UnsealedWithoutType,
        }
    }

    /// Whether extra, unlisted entries are allowed.
    pub fn is_unsealed(&self) -> bool {
        !matches!(self.tail, ShapedArrayTail::Sealed)
    }
}

/// A non-empty ordered set of alternative types.
///
/// Duplicates are allowed (they are semantically redundant but harmless).
/// Construction via [`UnionType::new`] flattens directly nested unions so
/// that `int|?string` and `int|null|string` produce the same node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnionType(pub Vec<Type>);

impl UnionType {
    pub fn new(types: Vec<Type>) -> Self {
        let mut flat = Vec::with_capacity(types.len());
        for ty in types {
            match ty {
                Type::Union(inner) => flat.extend(inner.0),
                other => flat.push(other),
            }
        }
        Self(flat)
    }

    pub fn types(&self) -> &[Type] {
        &self.0
    }
}

/// The scalar value carried by one case of a backed enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumCaseValue {
    Int(i64),
    Str(String),
}

/// One declared case of an enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumCase {
    /// The case name (e.g. "Active").
    pub key: String,
    /// The backing value, or `None` for a pure (unbacked) enum case.
    pub value: Option<EnumCaseValue>,
}

impl EnumCase {
    pub fn new(key: impl Into<String>, value: Option<EnumCaseValue>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// A reference to an enum registered on the parser, standing in for the
/// reflection lookup the original runtime performs.
///
/// Cases are kept in declaration order; `key-of<Enum>` relies on that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    pub name: String,
    pub cases: Vec<EnumCase>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, cases: Vec<EnumCase>) -> Self {
        Self {
            name: name.into(),
            cases,
        }
    }

    /// Whether every case carries a scalar backing value.
    pub fn is_backed(&self) -> bool {
        !self.cases.is_empty() && self.cases.iter().all(|case| case.value.is_some())
    }
}

// ─── Printing ───────────────────────────────────────────────────────────────
//
// `Display` doubles as the type printer: feeding a printed type back through
// the parser reproduces an equivalent AST.

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Mixed => f.write_str("mixed"),
            Type::Null => f.write_str("null"),
            Type::Bool => f.write_str("bool"),
            Type::Float => f.write_str("float"),
            Type::Int => f.write_str("int"),
            Type::String => f.write_str("string"),
            Type::ArrayKey => f.write_str("array-key"),
            Type::IntegerValue(value) => write!(f, "{value}"),
            Type::StringValue(value) => {
                // Single quotes unless the value itself contains one. The
                // lexer has no escape sequences, so a parsed literal contains
                // at most one quote kind; a hand-built value holding both has
                // no re-readable printed form.
                if value.contains('\'') {
                    write!(f, "\"{value}\"")
                } else {
                    write!(f, "'{value}'")
                }
            }
            Type::Array(array) => write!(f, "{array}"),
            Type::ShapedArray(shape) => write!(f, "{shape}"),
            Type::Union(union) => write!(f, "{union}"),
            Type::Enum(enum_type) => f.write_str(&enum_type.name),
        }
    }
}

impl fmt::Display for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "array<{}, {}>", self.key, self.value)
    }
}

impl fmt::Display for ShapedArrayElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.optional { "?" } else { "" };
        write!(f, "{}{marker}: {}", self.key, self.ty)
    }
}

impl fmt::Display for ShapedArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_list { "list{" } else { "array{" })?;

        for (index, element) in self.elements.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{element}")?;
        }

        match &self.tail {
            ShapedArrayTail::Sealed => {}
            ShapedArrayTail::Unsealed(tail) => write!(f, ", ...{tail}")?,
            ShapedArrayTail::UnsealedWithoutType => f.write_str(", ...")?,
        }

        f.write_str("}")
    }
}

impl fmt::Display for UnionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, ty) in self.0.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{ty}")?;
        }
        Ok(())
    }
}
