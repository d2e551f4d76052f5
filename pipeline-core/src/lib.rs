//! Pipeline Core
//!
//! Drives the two-phase parse: a [`Lexer`] turns characters into tokens and a
//! token-level parser runs over the resulting token context.

use common_framework::{ParseResult, TextToken};
use lexer_framework::Lexer;
use parser_framework::{parse, ParseConfig, Parser, ReaderContext};
use std::io::Read;
use std::sync::Arc;

/// A lexer paired with a parser over its tokens.
pub struct Pipeline<T> {
    lexer: Lexer,
    parser: Parser<TextToken, T>,
    config: ParseConfig,
}

impl<T> Clone for Pipeline<T> {
    fn clone(&self) -> Self {
        Self {
            lexer: self.lexer.clone(),
            parser: self.parser.clone(),
            config: self.config,
        }
    }
}

impl<T: 'static> Pipeline<T> {
    pub fn new(lexer: Lexer, parser: Parser<TextToken, T>) -> Self {
        Self {
            lexer,
            parser,
            config: ParseConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ParseConfig) -> Self {
        self.config = config;
        self
    }

    /// Parses a string.
    pub fn run(&self, name: impl Into<Arc<str>>, input: &str) -> ParseResult<T> {
        self.run_context(ReaderContext::from_str(name, input))
    }

    /// Parses UTF-8 text from a reader.
    pub fn run_reader<R: Read>(&self, name: impl Into<Arc<str>>, reader: R) -> ParseResult<T> {
        self.run_context(ReaderContext::from_reader(name, reader))
    }

    fn run_context(&self, chars: ReaderContext<'_, char>) -> ParseResult<T> {
        let mut tokens = self.lexer.tokenize(chars)?;
        let result = parse(&mut tokens, &self.parser, self.config);
        if let Err(err) = &result {
            log::debug!("pipeline failed: {:#}", err);
        }
        result
    }
}
