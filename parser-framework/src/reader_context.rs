use crate::context::ParseContext;
use crate::source::{ByteReaderSource, CharReaderSource, IterSource, UnitSource};
use crate::traits::Parser;
use common_framework::{FatalError, LookStack, Origin, ParseError, ParseResult, StreamUnit};
use std::collections::VecDeque;
use std::io::Read;
use std::sync::Arc;

/// A parsing context that lazily pulls units from a [`UnitSource`].
///
/// Units are buffered only as far as parsers peek. Consumed units are dropped
/// from the front of the buffer, unless a lookahead frame is active, in which
/// case only the frame offset moves until the outermost frame commits.
pub struct ReaderContext<'a, U: StreamUnit> {
    source: Box<dyn UnitSource<U> + 'a>,
    buffer: VecDeque<(U, Origin)>,
    exhausted: bool,
    /// A source error hit while only looking up an origin.
    pending: Option<ParseError>,
    /// Number of units physically removed from the buffer
    consumed: usize,
    look: LookStack,
    skips: Vec<Parser<U, ()>>,
    skipping: bool,
    /// Index at which the skip parsers last ran to completion
    skipped_at: Option<usize>,
    names: Vec<String>,
}

impl<'a, U: StreamUnit> ReaderContext<'a, U> {
    pub fn new(source: impl UnitSource<U> + 'a) -> Self {
        Self {
            source: Box::new(source),
            buffer: VecDeque::new(),
            exhausted: false,
            pending: None,
            consumed: 0,
            look: LookStack::new(),
            skips: Vec::new(),
            skipping: false,
            skipped_at: None,
            names: Vec::new(),
        }
    }

    /// Creates a context over an in-memory sequence of units.
    pub fn from_units<I>(name: impl Into<Arc<str>>, units: I) -> Self
    where
        I: IntoIterator<Item = U>,
        I::IntoIter: 'a,
    {
        Self::new(IterSource::new(name, units.into_iter()))
    }

    /// Ensures that at least `count` units are buffered, unless input ends first.
    fn ensure_buffer(&mut self, count: usize) -> ParseResult<()> {
        if let Some(err) = self.pending.take() {
            return Err(err);
        }
        while !self.exhausted && self.buffer.len() < count {
            match self.source.next_unit()? {
                Some(entry) => self.buffer.push_back(entry),
                None => self.exhausted = true,
            }
        }
        Ok(())
    }

    fn slice(&self, start: usize, count: usize) -> Vec<U> {
        self.buffer
            .iter()
            .skip(start)
            .take(count)
            .map(|(unit, _)| unit.clone())
            .collect()
    }

    fn skip_until_stable(&mut self) -> ParseResult<()> {
        let skips = self.skips.clone();
        loop {
            let before = self.index();
            let mut progressed = false;
            for skip in &skips {
                match skip.parse(self) {
                    Ok(()) if self.index() > before => {
                        progressed = true;
                        break;
                    }
                    Ok(()) => {}
                    Err(err) if err.is_soft() => {}
                    Err(err) => return Err(err),
                }
            }
            if !progressed {
                return Ok(());
            }
        }
    }
}

impl<'a> ReaderContext<'a, char> {
    /// Creates a character context over a string.
    pub fn from_str(name: impl Into<Arc<str>>, input: &'a str) -> Self {
        Self::new(IterSource::new(name, input.chars()))
    }

    /// Creates a character context decoding UTF-8 from a reader.
    pub fn from_reader<R: Read + 'a>(name: impl Into<Arc<str>>, reader: R) -> Self {
        Self::new(CharReaderSource::new(name, reader))
    }
}

impl<'a> ReaderContext<'a, u8> {
    /// Creates a byte context over a reader.
    pub fn from_byte_reader<R: Read + 'a>(name: impl Into<Arc<str>>, reader: R) -> Self {
        Self::new(ByteReaderSource::new(name, reader))
    }
}

impl<'a, U: StreamUnit> ParseContext<U> for ReaderContext<'a, U> {
    fn peek(&mut self, offset: usize, count: usize) -> ParseResult<Vec<U>> {
        let start = self.look.offset() + offset;
        self.ensure_buffer(start + count)?;
        Ok(self.slice(start, count))
    }

    fn consume(&mut self, count: usize) -> ParseResult<Vec<U>> {
        let start = self.look.offset();
        self.ensure_buffer(start + count)?;
        let units = self.slice(start, count);
        if !self.look.advance(units.len()) {
            self.buffer.drain(..units.len());
            self.consumed += units.len();
        }
        Ok(units)
    }

    fn origin(&mut self) -> Origin {
        let position = self.look.offset();
        if let Err(err) = self.ensure_buffer(position + 1) {
            self.pending = Some(err);
        }
        match self.buffer.get(position) {
            Some((_, origin)) => origin.clone(),
            None => self.source.end_origin(),
        }
    }

    fn index(&self) -> usize {
        self.consumed + self.look.offset()
    }

    fn add_skip(&mut self, parser: Parser<U, ()>) -> ParseResult<()> {
        if self.skips.iter().any(|skip| skip.same_as(&parser)) {
            return Err(FatalError::SkipSet("parser is already registered".into()).into());
        }
        self.skips.push(parser);
        self.skipped_at = None;
        Ok(())
    }

    fn remove_skip(&mut self, parser: &Parser<U, ()>) -> ParseResult<()> {
        let position = self
            .skips
            .iter()
            .position(|skip| skip.same_as(parser))
            .ok_or_else(|| FatalError::SkipSet("parser is not registered".into()))?;
        self.skips.remove(position);
        self.skipped_at = None;
        Ok(())
    }

    fn run_skips(&mut self) -> ParseResult<()> {
        if self.skipping || self.skips.is_empty() || self.skipped_at == Some(self.index()) {
            return Ok(());
        }
        self.skipping = true;
        let result = self.skip_until_stable();
        self.skipping = false;
        if result.is_ok() {
            self.skipped_at = Some(self.index());
        }
        result
    }

    fn enter_look(&mut self) {
        self.look.enter();
    }

    fn commit_look(&mut self) -> ParseResult<()> {
        if let Some(offset) = self.look.commit() {
            let count = offset.min(self.buffer.len());
            self.buffer.drain(..count);
            self.consumed += count;
        }
        Ok(())
    }

    fn revert_look(&mut self) {
        self.look.revert();
    }

    fn push_name(&mut self, name: &str) {
        self.names.push(name.to_string());
    }

    fn pop_name(&mut self) {
        self.names.pop();
    }

    fn current_name(&self) -> Option<String> {
        self.names.last().cloned()
    }
}
