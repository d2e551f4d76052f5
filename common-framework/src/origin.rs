use std::fmt;
use std::sync::Arc;

/// The source position of a stream unit.
///
/// Every unit pulled from a source carries the origin at which it starts, so
/// both character streams and token streams report positions in terms of the
/// original text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Origin {
    /// Name of the source (a file path, `<string>`, ...)
    pub name: Arc<str>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Origin {
    /// Creates an origin at the start of the named source.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            line: 1,
            column: 1,
        }
    }

    /// Creates an origin with the given values.
    pub fn at(name: impl Into<Arc<str>>, line: usize, column: usize) -> Self {
        Self {
            name: name.into(),
            line,
            column,
        }
    }

    /// Moves past one unit. A newline starts a new line.
    pub fn advance(&mut self, newline: bool) {
        if newline {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::new("<unknown>")
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.name, self.line, self.column)
    }
}

/// The span of source covered by a successful match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct OriginRange {
    pub start: Origin,
    pub end: Origin,
}

impl OriginRange {
    pub fn new(start: Origin, end: Origin) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for OriginRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}:{}", self.start, self.end.line, self.end.column)
    }
}
