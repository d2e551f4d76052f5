//! Ready-made parsers for common lexical elements of character streams.

use crate::combinators::{regex_with, Pattern};
use crate::traits::Parser;
use once_cell::sync::Lazy;
use common_framework::FatalError;

static WHITESPACE_RE: Lazy<Pattern> = Lazy::new(|| Pattern::new(r"\s+").expect("whitespace regex init failed"));
static DOUBLE_QUOTED_RE: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(r#""(?:[^"\\]|\\.)*""#).expect("string regex init failed"));
static SINGLE_QUOTED_RE: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(r"'(?:[^'\\]|\\.)*'").expect("string regex init failed"));
static IDENTIFIER_RE: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(r"[a-zA-Z_][a-zA-Z_0-9]*").expect("identifier regex init failed"));
static BOOL_RE: Lazy<Pattern> = Lazy::new(|| Pattern::new("true|false").expect("bool regex init failed"));
static FLOAT_RE: Lazy<Pattern> =
    Lazy::new(|| Pattern::new(r"[+\-]?\d+(?:\.\d+)?").expect("float regex init failed"));
static INT_RE: Lazy<Pattern> = Lazy::new(|| Pattern::new(r"[+\-]?\d+").expect("int regex init failed"));

/// Strips the first and last character.
fn unquote(text: String) -> String {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str().to_string()
}

/// One or more whitespace characters.
pub fn whitespace() -> Parser<char, String> {
    regex_with("whitespace", WHITESPACE_RE.clone())
}

/// A double-quoted string, returned without its quotes. Escapes are kept.
pub fn double_quoted_string() -> Parser<char, String> {
    regex_with("double-quoted string", DOUBLE_QUOTED_RE.clone()).map(unquote)
}

/// A single-quoted string, returned without its quotes. Escapes are kept.
pub fn single_quoted_string() -> Parser<char, String> {
    regex_with("single-quoted string", SINGLE_QUOTED_RE.clone()).map(unquote)
}

pub fn identifier() -> Parser<char, String> {
    regex_with("identifier", IDENTIFIER_RE.clone())
}

pub fn boolean() -> Parser<char, bool> {
    regex_with("bool", BOOL_RE.clone()).map(|text| text == "true")
}

pub fn float() -> Parser<char, f64> {
    regex_with("float", FLOAT_RE.clone()).map_detailed(|text, range| {
        text.parse::<f64>().map_err(|err| {
            FatalError::Other(format!("invalid float `{}` at `{}`: {}", text, range.start, err)).into()
        })
    })
}

pub fn int() -> Parser<char, i64> {
    regex_with("int", INT_RE.clone()).map_detailed(|text, range| {
        text.parse::<i64>().map_err(|err| {
            FatalError::Other(format!("invalid int `{}` at `{}`: {}", text, range.start, err)).into()
        })
    })
}
