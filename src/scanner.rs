//! Docblock annotation scanning.
//!
//! This module isolates type expressions embedded in free-form docblock
//! prose, one layer beneath tokenization: it knows nothing about the type
//! grammar and operates purely on delimiter balance and whitespace
//! boundaries.
//!
//! [`find_type`] is the core: given text starting right after a recognized
//! tag (e.g. `@var`), it returns the exact substring that is one type
//! expression, stopping before trailing description text. The remaining
//! helpers look up tags (`@var`, `@param`, `@return`, with their
//! `@phpstan-*` / `@psalm-*` spellings), type aliases, templates and magic
//! properties.
//!
//! Scanning never fails: an annotation with no discernible type yields an
//! empty result, and a missing tag yields `None`. The one exception is
//! [`class_templates`], which rejects duplicate template names.

use std::collections::HashMap;

use memchr::memmem;
use thiserror::Error;

/// A docblock-level failure. Scanning itself never fails; only template
/// collection can.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocError {
    /// The same `@template` name was declared twice on one docblock.
    #[error("template `{name}` is declared more than once")]
    DuplicatedTemplateName { name: String },
}

/// Extract the substring constituting one type expression from `string`,
/// which starts right after an annotation tag.
///
/// See [`find_type_at`]; this drops the consumed-offset part of the result.
pub fn find_type(string: &str) -> String {
    find_type_at(string).0
}

/// Extract one type expression and report how many bytes of `string` the
/// scan consumed.
///
/// The scan is character by character, maintaining a stack of expected
/// closing delimiters for `{}`, `<>`, `"…"` and `'…'` (quotes pair with
/// themselves). While the stack is non-empty every character is accepted,
/// so delimiters may nest or wrap arbitrary text. While the stack is empty:
///
///   - `|` and `&` announce a continuation, so the following token is still
///     part of the expression (`A | B` scans as one type);
///   - a character following a space, when no continuation is pending, is
///     the boundary between the type and trailing prose and stops the scan;
///   - anything else is accepted and clears the pending-continuation flag.
///
/// Newlines are normalized to spaces first; the result is trimmed.
/// Unbalanced delimiters simply read through to the end of the string.
pub fn find_type_at(string: &str) -> (String, usize) {
    let mut result = String::new();
    let mut closers: Vec<char> = Vec::new();
    let mut expect_expression = true;
    let mut previous = None;
    let mut consumed = 0;

    for mut c in string.chars() {
        if c == '\n' {
            c = ' ';
        }

        if closers.is_empty() {
            if c == '|' || c == '&' {
                expect_expression = true;
            } else if !expect_expression && previous == Some(' ') {
                break;
            } else if c != ' ' {
                expect_expression = false;
            }
        }

        if closers.last() == Some(&c) {
            closers.pop();
        } else if let Some(closer) = expected_closer(c) {
            closers.push(closer);
        }

        result.push(c);
        consumed += c.len_utf8();
        previous = Some(c);
    }

    (result.trim().to_string(), consumed)
}

fn expected_closer(c: char) -> Option<char> {
    match c {
        '{' => Some('}'),
        '<' => Some('>'),
        '"' => Some('"'),
        '\'' => Some('\''),
        _ => None,
    }
}

/// Strip the `/** … */` frame and per-line `*` gutters from a docblock.
pub fn sanitize_doc_comment(doc: &str) -> String {
    let inner = doc
        .trim()
        .strip_prefix("/**")
        .unwrap_or(doc)
        .strip_suffix("*/")
        .unwrap_or(doc);

    let lines: Vec<&str> = inner
        .lines()
        .map(|line| line.trim().trim_start_matches('*').trim())
        .collect();

    lines.join("\n").trim().to_string()
}

/// Find the type attached to an annotation, trying the `@phpstan-`,
/// `@psalm-` and plain spellings in that order. The **last** occurrence of
/// a tag wins, matching the original lookup.
///
/// `annotation` is the bare tag name, without `@` (e.g. `"var"`).
pub fn annotation_type(doc: &str, annotation: &str) -> Option<String> {
    for prefix in ["phpstan-", "psalm-", ""] {
        let tag = format!("@{prefix}{annotation}");

        if let Some(pos) = memmem::rfind(doc.as_bytes(), tag.as_bytes()) {
            return Some(find_type(&doc[pos + tag.len()..]));
        }
    }

    None
}

/// The type of a `@var` annotation on a property docblock.
pub fn var_type(docblock: &str) -> Option<String> {
    annotation_type(&sanitize_doc_comment(docblock), "var")
}

/// The type of a `@return` annotation on a function docblock.
pub fn return_type(docblock: &str) -> Option<String> {
    annotation_type(&sanitize_doc_comment(docblock), "return")
}

/// The `@param` type for one named parameter.
///
/// Only the text before the **last** `$name` occurrence is searched, so a
/// parameter name showing up inside another parameter's description does
/// not shadow the real annotation.
pub fn param_type(docblock: &str, name: &str) -> Option<String> {
    let doc = sanitize_doc_comment(docblock);
    let needle = format!("${name}");

    let mut candidate = None;
    for pos in memmem::rfind_iter(doc.as_bytes(), needle.as_bytes()) {
        let after = doc[pos + needle.len()..].chars().next();
        if after.is_none_or(char::is_whitespace) {
            candidate = Some(pos);
            break;
        }
    }

    annotation_type(&doc[..candidate?], "param")
}

/// Local type aliases declared with `@phpstan-type` / `@psalm-type`:
/// `@phpstan-type UserShape = array{name: string}` (the `=` is optional).
///
/// Returns `(alias_name, raw_type)` pairs in declaration order.
pub fn local_type_aliases(docblock: &str) -> Vec<(String, String)> {
    let doc = sanitize_doc_comment(docblock);
    let mut aliases = Vec::new();

    for case in split_by(&doc, &["@phpstan-type", "@psalm-type"]) {
        let rest = case.trim_start();
        let Some((name, rest)) = take_identifier(rest) else {
            continue;
        };

        let rest = rest.trim_start();
        let rest = rest.strip_prefix('=').unwrap_or(rest);

        aliases.push((name.to_string(), find_type(rest)));
    }

    aliases
}

/// Type aliases imported from another class with `@phpstan-import-type` /
/// `@psalm-import-type`: `@phpstan-import-type UserShape from UserRepo`.
///
/// Returns the imported alias names grouped by source class.
pub fn imported_type_aliases(docblock: &str) -> HashMap<String, Vec<String>> {
    let doc = sanitize_doc_comment(docblock);
    let mut imports: HashMap<String, Vec<String>> = HashMap::new();

    for case in split_by(&doc, &["@phpstan-import-type", "@psalm-import-type"]) {
        let rest = case.trim_start();
        let Some((name, rest)) = take_identifier(rest) else {
            continue;
        };

        let rest = rest.trim_start();
        let Some(rest) = rest.strip_prefix("from") else {
            continue;
        };
        let Some((class, _)) = take_identifier(rest.trim_start()) else {
            continue;
        };

        imports
            .entry(class.to_string())
            .or_default()
            .push(name.to_string());
    }

    imports
}

/// The types listed on `@extends` / `@phpstan-extends` / `@psalm-extends`
/// lines of a class docblock.
pub fn class_extends_types(docblock: &str) -> Vec<String> {
    let doc = sanitize_doc_comment(docblock);
    let mut types = Vec::new();

    for line in doc.lines() {
        for tag in ["@phpstan-extends", "@psalm-extends", "@extends"] {
            if let Some(rest) = line.trim().strip_prefix(tag) {
                // Whitespace after the tag, so `@extendsible` does not match.
                if rest.starts_with(char::is_whitespace) {
                    let rest = rest.trim();
                    if !rest.is_empty() {
                        types.push(rest.to_string());
                    }
                }
                break;
            }
        }
    }

    types
}

/// Template names (and their optional `of` bound) declared on a class
/// docblock, in declaration order.
///
/// Accepts `@template`, `@phpstan-template`, `@psalm-template` and the
/// `-covariant` spellings. A template with no bound maps to an empty
/// string. Declaring the same name twice is an error.
pub fn class_templates(docblock: &str) -> Result<Vec<(String, String)>, DocError> {
    let doc = sanitize_doc_comment(docblock);
    let mut templates: Vec<(String, String)> = Vec::new();

    for line in doc.lines() {
        let trimmed = line.trim();
        let Some(rest) = strip_template_tag(trimmed) else {
            continue;
        };

        let Some((name, rest)) = take_identifier(rest.trim_start()) else {
            continue;
        };

        if templates.iter().any(|(existing, _)| existing == name) {
            return Err(DocError::DuplicatedTemplateName {
                name: name.to_string(),
            });
        }

        let rest = rest.trim_start();
        let bound = match rest.strip_prefix("of") {
            Some(bound) if bound.starts_with(char::is_whitespace) => find_type(bound),
            _ => String::new(),
        };

        templates.push((name.to_string(), bound));
    }

    Ok(templates)
}

fn strip_template_tag(line: &str) -> Option<&str> {
    for tag in ["@phpstan-template", "@psalm-template", "@template"] {
        if let Some(rest) = line.strip_prefix(tag) {
            let rest = rest.strip_prefix("-covariant").unwrap_or(rest);
            if rest.starts_with(char::is_whitespace) {
                return Some(rest);
            }
        }
    }
    None
}

/// Magic properties declared with `@property Type $name` on a class
/// docblock. Returns `(property_name, raw_type)` pairs, names without the
/// `$` prefix.
pub fn magic_properties(docblock: &str) -> Vec<(String, String)> {
    let doc = sanitize_doc_comment(docblock);
    let mut properties = Vec::new();

    for line in doc.lines() {
        let trimmed = line.trim();
        let Some(rest) = trimmed.strip_prefix("@property") else {
            continue;
        };
        // `@property-read` / `@property-write` are different tags.
        if !rest.starts_with(char::is_whitespace) {
            continue;
        }

        // The type is everything between the tag and the last `$name`
        // token, so multi-token types like `array<int, string>` survive.
        let Some(dollar) = rest.rfind('$') else {
            continue;
        };
        let name: String = rest[dollar + 1..]
            .chars()
            .take_while(|c| c.is_alphanumeric() || *c == '_')
            .collect();
        if name.is_empty() {
            continue;
        }

        let ty = rest[..dollar].trim();
        if ty.is_empty() {
            continue;
        }

        properties.push((name, ty.to_string()));
    }

    properties
}

// ─── Helpers ────────────────────────────────────────────────────────────────

/// Split `string` into the segments following each occurrence of any tag in
/// `cases`: for `"a @tag x @tag y"` the segments are `" x "` and `" y"`.
fn split_by<'a>(string: &'a str, cases: &[&str]) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut first = true;
    let mut pos = 0;

    loop {
        let mut next: Option<(usize, usize)> = None;

        for case in cases {
            if let Some(found) = memmem::find(string[pos..].as_bytes(), case.as_bytes()) {
                let at = pos + found;
                if next.is_none_or(|(best, _)| at < best) {
                    next = Some((at, case.len()));
                }
            }
        }

        let Some((at, len)) = next else {
            break;
        };

        if first {
            first = false;
        } else {
            result.push(&string[pos..at]);
        }
        pos = at + len;
    }

    if !first {
        result.push(&string[pos..]);
    }

    result
}

/// Take a leading identifier (`[A-Za-z_][A-Za-z0-9_]*`), returning it and
/// the remainder.
fn take_identifier(s: &str) -> Option<(&str, &str)> {
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let valid = if i == 0 {
            c.is_ascii_alphabetic() || c == '_'
        } else {
            c.is_ascii_alphanumeric() || c == '_'
        };
        if !valid {
            break;
        }
        end = i + c.len_utf8();
    }

    if end == 0 {
        return None;
    }
    Some((&s[..end], &s[end..]))
}
