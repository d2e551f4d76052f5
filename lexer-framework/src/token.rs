use common_framework::{StreamUnit, Token, TokenKind};
use parser_framework::{map, ParseContext, Parser};
use std::fmt::Debug;

/// Matches the next token if it has the given kind.
pub fn exact_token_kind<V>(kind: impl Into<TokenKind>) -> Parser<Token<V>, Token<V>>
where
    V: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    let kind = kind.into();
    Parser::new(move |ctx: &mut dyn ParseContext<Token<V>>| {
        ctx.run_skips()?;
        match ctx.peek(0, 1)?.into_iter().next() {
            Some(token) if token.kind == kind => {
                ctx.consume(1)?;
                Ok(token)
            }
            _ => Err(ctx.expected(kind.as_str())),
        }
    })
}

/// Matches the next token if it has the given kind and value.
pub fn exact_token<V>(kind: impl Into<TokenKind>, value: V) -> Parser<Token<V>, Token<V>>
where
    V: Clone + Debug + PartialEq + Send + Sync + 'static,
{
    let kind = kind.into();
    let expected = format!("{}:{:?}", kind, value);
    Parser::new(move |ctx: &mut dyn ParseContext<Token<V>>| {
        ctx.run_skips()?;
        match ctx.peek(0, 1)?.into_iter().next() {
            Some(token) if token.kind == kind && token.value == value => {
                ctx.consume(1)?;
                Ok(token)
            }
            _ => Err(ctx.expected(&expected)),
        }
    })
}

/// Wraps the result of `parser` in a token of the given kind.
pub fn bind_to_token<U, V>(parser: Parser<U, V>, kind: impl Into<TokenKind>) -> Parser<U, Token<V>>
where
    U: StreamUnit,
    V: 'static,
{
    let kind = kind.into();
    map(parser, move |value| Token {
        kind: kind.clone(),
        value,
    })
}

/// Unwraps the value of a matched token.
pub fn token_value<U, V>(parser: Parser<U, Token<V>>) -> Parser<U, V>
where
    U: StreamUnit,
    V: 'static,
{
    map(parser, |token| token.value)
}
