use crate::Origin;
use std::fmt;
use std::io;
use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

/// A failed expectation at a position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub origin: Origin,
    /// What the failing parser was looking for.
    pub expected: String,
    /// A rendering of what was found instead.
    pub got: String,
    /// The innermost named context active when the failure was raised.
    pub context: Option<String>,
}

impl Failure {
    pub fn new(origin: Origin, expected: impl Into<String>, got: impl Into<String>) -> Self {
        Self {
            origin,
            expected: expected.into(),
            got: got.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: Option<String>) -> Self {
        self.context = context;
        self
    }

    /// The innermost named context, if it adds anything to the message.
    pub fn context(&self) -> Option<&str> {
        self.context
            .as_deref()
            .filter(|context| *context != self.expected)
    }
}

/// `{}` renders the message alone; `{:#}` appends the named context.
impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "parse error at `{}`: expected `{}` but got `{}`",
            self.origin, self.expected, self.got
        )?;
        match self.context() {
            Some(context) if f.alternate() => write!(f, " in `{}`", context),
            _ => Ok(()),
        }
    }
}

impl std::error::Error for Failure {}

/// Errors that are never retried by any combinator.
#[derive(Debug, Error)]
pub enum FatalError {
    #[error("I/O error at `{origin}`: {source}")]
    Io {
        origin: Origin,
        #[source]
        source: io::Error,
    },

    #[error("lexing failed: {0}")]
    Lex(Failure),

    #[error("skip parser set: {0}")]
    SkipSet(String),

    #[error("forward reference `{0}` was used before it was defined")]
    UnresolvedReference(String),

    #[error("cannot bind field `{field}` at `{origin}`: {message}")]
    Bind {
        origin: Origin,
        field: String,
        message: String,
    },

    #[error("{0}")]
    Other(String),
}

/// The result of a failed parser invocation.
///
/// - `Soft`: nothing was consumed; an enclosing choice may try another branch.
/// - `Hard`: input was consumed before failing; propagates past choices unless
///   a lookahead scope demotes it.
/// - `Fatal`: always propagates.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Soft(Box<Failure>),

    #[error(transparent)]
    Hard(Box<Failure>),

    #[error(transparent)]
    Fatal(Box<FatalError>),
}

impl ParseError {
    pub fn soft(failure: Failure) -> Self {
        ParseError::Soft(Box::new(failure))
    }

    pub fn hard(failure: Failure) -> Self {
        ParseError::Hard(Box::new(failure))
    }

    pub fn fatal(error: FatalError) -> Self {
        ParseError::Fatal(Box::new(error))
    }

    pub fn is_soft(&self) -> bool {
        matches!(self, ParseError::Soft(_))
    }

    pub fn is_hard(&self) -> bool {
        matches!(self, ParseError::Hard(_))
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Fatal(_))
    }

    /// True for errors an enclosing combinator must return as-is.
    pub fn must_return(&self) -> bool {
        !self.is_soft()
    }

    /// Promotes a soft failure to a hard one.
    pub fn harden(self) -> Self {
        match self {
            ParseError::Soft(failure) => ParseError::Hard(failure),
            other => other,
        }
    }

    /// Demotes a hard failure to a soft one.
    pub fn soften(self) -> Self {
        match self {
            ParseError::Hard(failure) => ParseError::Soft(failure),
            other => other,
        }
    }

    /// The failure details, unless fatal.
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ParseError::Soft(failure) | ParseError::Hard(failure) => Some(failure),
            ParseError::Fatal(_) => None,
        }
    }
}

impl From<FatalError> for ParseError {
    fn from(error: FatalError) -> Self {
        ParseError::fatal(error)
    }
}
