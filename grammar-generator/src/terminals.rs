use crate::error::GrammarError;
use crate::value::Value;
use common_framework::{StreamUnit, TextToken};
use lexer_framework::{exact_token, exact_token_kind};
use parser_framework::{exact, regex, Parser};

/// How the terminals of the annotation language match a given unit kind.
pub trait Terminals: StreamUnit {
    /// Used in error messages.
    const UNIT: &'static str;

    /// `'text'`
    fn literal(text: &str) -> Result<Parser<Self, Value>, GrammarError>;

    /// `regex('pattern')`
    fn pattern(pattern: &str) -> Result<Parser<Self, Value>, GrammarError> {
        Err(GrammarError::Unsupported {
            construct: format!("regex('{}')", pattern),
            unit: Self::UNIT,
        })
    }

    /// `token('Type')`, `token('Type', 'value')`
    fn token(kind: &str, value: Option<&str>) -> Result<Parser<Self, Value>, GrammarError> {
        let _ = value;
        Err(GrammarError::Unsupported {
            construct: format!("token('{}')", kind),
            unit: Self::UNIT,
        })
    }
}

impl Terminals for char {
    const UNIT: &'static str = "character";

    fn literal(text: &str) -> Result<Parser<char, Value>, GrammarError> {
        Ok(exact(text).map(Value::Text))
    }

    fn pattern(pattern: &str) -> Result<Parser<char, Value>, GrammarError> {
        regex(pattern)
            .map(|parser| parser.map(Value::Text))
            .map_err(|source| GrammarError::Regex {
                pattern: pattern.to_string(),
                source,
            })
    }
}

/// In token grammars a literal names a token: `'Type'` or `'Type:value'`.
impl Terminals for TextToken {
    const UNIT: &'static str = "token";

    fn literal(text: &str) -> Result<Parser<TextToken, Value>, GrammarError> {
        match text.split_once(':') {
            Some(("", _)) => Err(GrammarError::InvalidToken(text.to_string())),
            Some((kind, value)) => Self::token(kind, Some(value)),
            None => Self::token(text, None),
        }
    }

    fn token(kind: &str, value: Option<&str>) -> Result<Parser<TextToken, Value>, GrammarError> {
        if kind.is_empty() {
            return Err(GrammarError::InvalidToken(kind.to_string()));
        }
        let matcher = match value {
            Some(value) => exact_token(kind, value.to_string()),
            None => exact_token_kind::<String>(kind),
        };
        Ok(matcher.map(|token| Value::Text(token.value)))
    }
}
