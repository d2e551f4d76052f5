use crate::traits::Parser;
use common_framework::{OriginRange, ParseResult, StreamUnit};

/// Transforms the result of a successful match.
pub fn map<U, T, R, F>(parser: Parser<U, T>, f: F) -> Parser<U, R>
where
    U: StreamUnit,
    T: 'static,
    R: 'static,
    F: Fn(T) -> R + Send + Sync + 'static,
{
    Parser::new(move |ctx| parser.parse(ctx).map(&f))
}

/// Transforms the result of a successful match together with the source range
/// it covers. The range starts after any skipped input.
pub fn map_detailed<U, T, R, F>(parser: Parser<U, T>, f: F) -> Parser<U, R>
where
    U: StreamUnit,
    T: 'static,
    R: 'static,
    F: Fn(T, OriginRange) -> ParseResult<R> + Send + Sync + 'static,
{
    Parser::new(move |ctx| {
        ctx.run_skips()?;
        let start = ctx.origin();
        let value = parser.parse(ctx)?;
        let end = ctx.origin();
        f(value, OriginRange::new(start, end))
    })
}

/// Replaces the result of a successful match with a constant.
pub fn bind<U, T, R>(parser: Parser<U, T>, value: R) -> Parser<U, R>
where
    U: StreamUnit,
    T: 'static,
    R: Clone + Send + Sync + 'static,
{
    map(parser, move |_| value.clone())
}
