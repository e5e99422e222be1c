//! Path expression compiler and entry point
//!
//! Two notations are accepted. `JSONPath` expressions start with `$` and
//! support dotted members, bracketed quoted members, and the `*` wildcard
//! (`$.reporting_structure[*].reporting_plans[*]`). Prefix expressions are
//! dot-separated member names where `item` denotes the elements of an array
//! (`reporting_structure.item.reporting_plans.item`); the empty prefix selects
//! the document root.

use crate::jsonpath::{
    ast::JsonSelector,
    error::{JsonPathError, JsonPathResult},
    expression::JsonPathExpression,
};

/// Path expression parser and compiler
pub struct JsonPathParser;

impl JsonPathParser {
    /// Compile a path expression into a selector chain
    ///
    /// # Errors
    ///
    /// Returns an `InvalidPath` error for malformed expressions and for
    /// `JSONPath` features the streaming matcher does not evaluate (recursive
    /// descent, indices, slices, filters).
    pub fn compile(expression: &str) -> JsonPathResult<JsonPathExpression> {
        let trimmed = expression.trim();
        let selectors = if let Some(rest) = trimmed.strip_prefix('$') {
            Self::compile_jsonpath(rest, trimmed)?
        } else {
            Self::compile_prefix(trimmed)?
        };
        Ok(JsonPathExpression::new(selectors, trimmed.to_string()))
    }

    fn compile_prefix(prefix: &str) -> JsonPathResult<Vec<JsonSelector>> {
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        prefix
            .split('.')
            .map(|segment| match segment {
                "" => Err(JsonPathError::invalid_path(format!(
                    "empty segment in prefix '{prefix}'"
                ))),
                "item" => Ok(JsonSelector::ArrayItems),
                name => Ok(JsonSelector::Child(name.to_string())),
            })
            .collect()
    }

    fn compile_jsonpath(rest: &str, original: &str) -> JsonPathResult<Vec<JsonSelector>> {
        let bytes = rest.as_bytes();
        let mut selectors = Vec::new();
        let mut pos = 0;

        let error = |pos: usize, msg: &str| {
            JsonPathError::invalid_path(format!("{msg} at position {} in '{original}'", pos + 1))
        };

        while pos < bytes.len() {
            match bytes[pos] {
                b'.' => {
                    pos += 1;
                    match bytes.get(pos) {
                        Some(b'.') => return Err(error(pos, "recursive descent is not supported")),
                        Some(b'*') => {
                            selectors.push(JsonSelector::Wildcard);
                            pos += 1;
                        }
                        Some(_) => {
                            let start = pos;
                            while pos < bytes.len() && is_name_byte(bytes[pos]) {
                                pos += 1;
                            }
                            if start == pos {
                                return Err(error(start, "expected member name"));
                            }
                            selectors.push(JsonSelector::Child(rest[start..pos].to_string()));
                        }
                        None => return Err(error(pos, "incomplete member access")),
                    }
                }
                b'[' => {
                    pos += 1;
                    match bytes.get(pos) {
                        Some(b'*') => {
                            pos += 1;
                            selectors.push(JsonSelector::Wildcard);
                        }
                        Some(&quote @ (b'\'' | b'"')) => {
                            pos += 1;
                            let mut name = String::new();
                            loop {
                                match bytes.get(pos) {
                                    Some(b'\\') => {
                                        let escaped = rest[pos + 1..].chars().next().ok_or_else(
                                            || error(pos, "unterminated escape in member name"),
                                        )?;
                                        name.push(escaped);
                                        pos += 1 + escaped.len_utf8();
                                    }
                                    Some(&b) if b == quote => {
                                        pos += 1;
                                        break;
                                    }
                                    Some(_) => {
                                        let ch = rest[pos..].chars().next().ok_or_else(|| {
                                            error(pos, "invalid character in member name")
                                        })?;
                                        name.push(ch);
                                        pos += ch.len_utf8();
                                    }
                                    None => return Err(error(pos, "unterminated member name")),
                                }
                            }
                            selectors.push(JsonSelector::Child(name));
                        }
                        Some(_) => {
                            return Err(error(pos, "only '*' and quoted names are supported in brackets"));
                        }
                        None => return Err(error(pos, "unterminated bracket")),
                    }
                    if bytes.get(pos) != Some(&b']') {
                        return Err(error(pos, "expected ']'"));
                    }
                    pos += 1;
                }
                _ => return Err(error(pos, "expected '.' or '['")),
            }
        }

        Ok(selectors)
    }
}

#[inline]
fn is_name_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' || !byte.is_ascii()
}
