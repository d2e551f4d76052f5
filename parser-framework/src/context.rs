use crate::traits::Parser;
use common_framework::{Failure, Origin, ParseError, ParseResult, StreamUnit};

/// Context for parsing operations.
///
/// Parsers see the input only through this trait, so the same combinators run
/// over characters, bytes or tokens. Implementations buffer units lazily and
/// keep the lookahead frames, the active skip parsers and the stack of named
/// contexts used for error messages.
pub trait ParseContext<U: StreamUnit> {
    /// Returns up to `count` units starting `offset` units past the next
    /// unconsumed one. Fewer units are returned at end of input.
    fn peek(&mut self, offset: usize, count: usize) -> ParseResult<Vec<U>>;

    /// Consumes up to `count` units and returns them.
    ///
    /// Inside a lookahead frame only the frame moves; the buffer is left intact
    /// so the frame can still be reverted.
    fn consume(&mut self, count: usize) -> ParseResult<Vec<U>>;

    /// Returns the origin of the next unconsumed unit, or the position just
    /// past the input at end of input.
    fn origin(&mut self) -> Origin;

    /// Returns the absolute effective position (consumed units plus the active
    /// lookahead offset).
    fn index(&self) -> usize;

    /// Registers a skip parser. Registering the same parser twice is an error.
    fn add_skip(&mut self, parser: Parser<U, ()>) -> ParseResult<()>;

    /// Unregisters a skip parser. Removing an absent parser is an error.
    fn remove_skip(&mut self, parser: &Parser<U, ()>) -> ParseResult<()>;

    /// Runs every skip parser until none of them matches.
    fn run_skips(&mut self) -> ParseResult<()>;

    /// Pushes a lookahead frame seeded at the current effective offset.
    fn enter_look(&mut self);

    /// Pops the innermost lookahead frame, keeping its progress.
    fn commit_look(&mut self) -> ParseResult<()>;

    /// Pops the innermost lookahead frame, discarding its progress.
    fn revert_look(&mut self);

    fn push_name(&mut self, name: &str);

    fn pop_name(&mut self);

    /// Returns the innermost named context.
    fn current_name(&self) -> Option<String>;

    /// Returns true if no unit is left.
    fn is_eof(&mut self) -> ParseResult<bool> {
        Ok(self.peek(0, 1)?.is_empty())
    }

    /// Renders the next unit for error messages.
    fn preview(&mut self) -> String {
        match self.peek(0, 1) {
            Ok(units) if !units.is_empty() => U::render(&units),
            _ => "EOF".to_string(),
        }
    }

    /// Builds a soft failure at the current position.
    fn expected(&mut self, expected: &str) -> ParseError {
        let got = self.preview();
        self.expected_but_got(expected, got)
    }

    /// Builds a soft failure at the current position with an explicit preview.
    fn expected_but_got(&mut self, expected: &str, got: String) -> ParseError {
        let failure = Failure::new(self.origin(), expected, got).with_context(self.current_name());
        ParseError::soft(failure)
    }
}
