use crate::StreamUnit;
use std::fmt;
use std::sync::Arc;

/// The type tag of a token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenKind(Arc<str>);

impl TokenKind {
    pub fn new(kind: impl Into<Arc<str>>) -> Self {
        Self(kind.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenKind {
    fn from(kind: &str) -> Self {
        Self::new(kind)
    }
}

impl From<String> for TokenKind {
    fn from(kind: String) -> Self {
        Self::new(kind)
    }
}

impl PartialEq<str> for TokenKind {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for TokenKind {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A lexed token: a kind plus a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<V = String> {
    pub kind: TokenKind,
    pub value: V,
}

/// A token whose value is its source text.
pub type TextToken = Token<String>;

impl<V> Token<V> {
    pub fn new(kind: impl Into<TokenKind>, value: V) -> Self {
        Self {
            kind: kind.into(),
            value,
        }
    }
}

impl<V: fmt::Debug> fmt::Display for Token<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.value)
    }
}

impl<V> StreamUnit for Token<V>
where
    V: Clone + fmt::Debug + PartialEq + Send + Sync + 'static,
{
    fn render(units: &[Self]) -> String {
        units
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
