use crate::context::ParseContext;
use crate::traits::Parser;
use common_framework::{ParseResult, StreamUnit};

/// Options for [`parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Fail if anything but skippable input remains after the match.
    pub must_parse_to_eof: bool,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            must_parse_to_eof: true,
        }
    }
}

impl ParseConfig {
    /// Accepts a match that leaves input behind.
    pub fn partial() -> Self {
        Self {
            must_parse_to_eof: false,
        }
    }
}

/// Runs `parser` against `ctx`.
pub fn parse<U, T>(ctx: &mut dyn ParseContext<U>, parser: &Parser<U, T>, config: ParseConfig) -> ParseResult<T>
where
    U: StreamUnit,
    T: 'static,
{
    let value = parser.parse(ctx)?;
    if config.must_parse_to_eof {
        ctx.run_skips()?;
        if !ctx.is_eof()? {
            return Err(ctx.expected("EOF"));
        }
    }
    Ok(value)
}
