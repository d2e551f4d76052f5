use crate::error::GrammarError;
use crate::schema::{Grammar, TypeInfo};
use crate::value::Value;
use common_framework::StreamUnit;
use parser_framework::Parser;
use std::collections::HashMap;

/// What a named reference in an annotation resolves to.
#[derive(Clone)]
pub(crate) enum Provided<U> {
    Parser(Parser<U, Value>),
    Type(TypeInfo),
}

/// Parsers and settings shared by every type a generator compiles.
pub struct BuildOptions<U> {
    pub(crate) provided: HashMap<String, Provided<U>>,
    pub(crate) skips: Vec<Parser<U, ()>>,
}

impl<U> Default for BuildOptions<U> {
    fn default() -> Self {
        Self {
            provided: HashMap::new(),
            skips: Vec::new(),
        }
    }
}

impl<U: StreamUnit> BuildOptions<U> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `parser` available to annotations as a bare identifier.
    pub fn with_parser(self, name: &str, parser: Parser<U, Value>) -> Result<Self, GrammarError> {
        self.provide(name, Provided::Parser(parser))
    }

    /// Makes the grammar type `T` available to annotations under its name.
    pub fn with_type<T: Grammar>(self) -> Result<Self, GrammarError> {
        self.provide(T::name(), Provided::Type(TypeInfo::of::<T>()))
    }

    /// Adds a skip parser, active for the whole parse of every built type.
    pub fn with_skip(mut self, parser: Parser<U, ()>) -> Self {
        self.skips.push(parser);
        self
    }

    fn provide(mut self, name: &str, provided: Provided<U>) -> Result<Self, GrammarError> {
        if self.provided.contains_key(name) {
            return Err(GrammarError::DuplicateName(name.to_string()));
        }
        self.provided.insert(name.to_string(), provided);
        Ok(self)
    }
}
