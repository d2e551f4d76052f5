use common_framework::{FatalError, Origin, ParseError, ParseResult, StreamUnit};
use parser_framework::{ParseContext, Parser, ReaderContext, UnitSource};

/// A unit source that produces each unit by running a parser over another
/// context.
///
/// This turns a character-level lexing parser into a token stream, so the
/// same combinators can run a second time over tokens.
pub struct TokenSource<'a, U: StreamUnit, T> {
    ctx: ReaderContext<'a, U>,
    lexer: Parser<U, T>,
}

impl<'a, U: StreamUnit, T: 'static> TokenSource<'a, U, T> {
    pub fn new(ctx: ReaderContext<'a, U>, lexer: Parser<U, T>) -> Self {
        Self { ctx, lexer }
    }

    /// Returns the underlying context.
    pub fn context(&self) -> &ReaderContext<'a, U> {
        &self.ctx
    }
}

impl<'a, U: StreamUnit, T: 'static> UnitSource<T> for TokenSource<'a, U, T> {
    fn next_unit(&mut self) -> ParseResult<Option<(T, Origin)>> {
        self.ctx.run_skips()?;
        if self.ctx.is_eof()? {
            return Ok(None);
        }
        let origin = self.ctx.origin();
        let err = match self.lexer.parse(&mut self.ctx) {
            Ok(token) => {
                log::trace!("lexed token at {}", origin);
                return Ok(Some((token, origin)));
            }
            Err(err) => err,
        };
        // Only skippable input was left.
        if err.is_soft() && self.ctx.is_eof()? {
            return Ok(None);
        }
        match err {
            ParseError::Soft(failure) | ParseError::Hard(failure) => {
                Err(FatalError::Lex(*failure).into())
            }
            fatal => Err(fatal),
        }
    }

    fn end_origin(&mut self) -> Origin {
        self.ctx.origin()
    }
}

/// Creates a context whose units are produced by `lexer` running over `ctx`.
pub fn token_context<'a, U, T>(ctx: ReaderContext<'a, U>, lexer: Parser<U, T>) -> ReaderContext<'a, T>
where
    U: StreamUnit,
    T: StreamUnit,
{
    ReaderContext::new(TokenSource::new(ctx, lexer))
}
