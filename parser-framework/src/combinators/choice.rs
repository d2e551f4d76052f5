use crate::traits::Parser;
use common_framework::StreamUnit;

fn ordered<U, T>(label: Option<String>, parsers: Vec<Parser<U, T>>) -> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    Parser::new(move |ctx| {
        for parser in &parsers {
            match parser.parse(ctx) {
                Ok(value) => return Ok(value),
                Err(err) if err.is_soft() => continue,
                Err(err) => return Err(err),
            }
        }
        let expected = label
            .clone()
            .or_else(|| ctx.current_name())
            .unwrap_or_else(|| "one of the alternatives".to_string());
        Err(ctx.expected(&expected))
    })
}

/// Tries each parser in order and returns the first success.
///
/// Only soft failures move on to the next alternative; the failure reported
/// when every alternative fails softly is labeled with the current named
/// context.
pub fn any<U, T>(parsers: Vec<Parser<U, T>>) -> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    ordered(None, parsers)
}

/// Like [`any`], with an explicit label for the failure message.
pub fn one_of<U, T>(name: &str, parsers: Vec<Parser<U, T>>) -> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    ordered(Some(name.to_string()), parsers)
}
