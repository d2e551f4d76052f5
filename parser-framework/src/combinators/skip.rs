use crate::traits::Parser;
use common_framework::StreamUnit;

/// Runs `parser` with `skip` registered as a skip parser.
pub fn skip<U, T>(skip: Parser<U, ()>, parser: Parser<U, T>) -> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    Parser::new(move |ctx| {
        ctx.add_skip(skip.clone())?;
        let result = parser.parse(ctx);
        ctx.remove_skip(&skip)?;
        result
    })
}

/// Runs `parser` with `skip` temporarily unregistered.
pub fn unskip<U, T>(skip: Parser<U, ()>, parser: Parser<U, T>) -> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    Parser::new(move |ctx| {
        ctx.remove_skip(&skip)?;
        let result = parser.parse(ctx);
        ctx.add_skip(skip.clone())?;
        result
    })
}
