use crate::traits::Parser;
use common_framework::StreamUnit;

/// Runs `parser` speculatively.
///
/// On success the consumed input is kept. On failure the input is rewound to
/// where the scope began and a hard failure becomes soft, so an enclosing
/// choice can try its next alternative.
pub fn look<U, T>(parser: Parser<U, T>) -> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    Parser::new(move |ctx| {
        ctx.enter_look();
        match parser.parse(ctx) {
            Ok(value) => {
                ctx.commit_look()?;
                Ok(value)
            }
            Err(err) => {
                ctx.revert_look();
                Err(err.soften())
            }
        }
    })
}
