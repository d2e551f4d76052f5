use thiserror::Error;

/// Errors raised while compiling grammar annotations into parsers.
///
/// All of them are reported by the build functions, before any input is
/// parsed.
#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("invalid grammar for `{type_name}`: {message}\n{}", caret(.text, *.column))]
    Syntax {
        type_name: String,
        /// The joined annotation text of the type.
        text: String,
        /// 1-based column of the failure.
        column: usize,
        message: String,
    },

    #[error("cannot infer a parser for field `{field}` of `{type_name}`: the field type has no grammar")]
    NotInferable { type_name: String, field: String },

    #[error("no field of `{type_name}` covers column {column} of its grammar")]
    Unmapped { type_name: String, column: usize },

    #[error("unknown parser `{name}` referenced by `{type_name}`")]
    UnknownReference { type_name: String, name: String },

    #[error("invalid regex `{pattern}`: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: parser_framework::RegexError,
    },

    #[error("`{construct}` cannot be used in a {unit} grammar")]
    Unsupported { construct: String, unit: &'static str },

    #[error("invalid token matcher `{0}`: expected `Type` or `Type:value`")]
    InvalidToken(String),

    #[error("a parser named `{0}` is already registered")]
    DuplicateName(String),
}

/// Renders the annotation text with a caret under `column`.
fn caret(text: &str, column: usize) -> String {
    format!("{}\n{}^", text, " ".repeat(column.saturating_sub(1)))
}

/// A captured value that could not be stored in its field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BindError {
    message: String,
}

impl BindError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
