use crate::traits::Parser;
use common_framework::StreamUnit;

/// Matches exactly the given run of units.
pub fn exact_units<U: StreamUnit>(units: Vec<U>) -> Parser<U, Vec<U>> {
    let expected = U::render(&units);
    Parser::new(move |ctx| {
        ctx.run_skips()?;
        let found = ctx.peek(0, units.len())?;
        if found != units {
            let got = if found.is_empty() {
                "EOF".to_string()
            } else {
                U::render(&found)
            };
            return Err(ctx.expected_but_got(&expected, got));
        }
        ctx.consume(units.len())
    })
}

/// Matches a single unit.
pub fn exact_one<U: StreamUnit>(unit: U) -> Parser<U, U> {
    let expected = U::render(std::slice::from_ref(&unit));
    Parser::new(move |ctx| {
        ctx.run_skips()?;
        let found = ctx.peek(0, 1)?;
        match found.first() {
            Some(next) if *next == unit => {
                ctx.consume(1)?;
                Ok(unit.clone())
            }
            _ => Err(ctx.expected(&expected)),
        }
    })
}

/// Matches a literal string over a character stream.
pub fn exact(text: &str) -> Parser<char, String> {
    let owned = text.to_string();
    exact_units(text.chars().collect()).map(move |_| owned.clone())
}
