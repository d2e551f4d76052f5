use crate::traits::Parser;
use common_framework::StreamUnit;
use std::sync::Arc;

/// Labels `parser` for error messages.
pub fn named<U, T>(name: &str, parser: Parser<U, T>) -> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    let name: Arc<str> = name.into();
    Parser::new(move |ctx| {
        ctx.push_name(&name);
        if log::log_enabled!(log::Level::Trace) {
            log::trace!("enter `{}` at {}", name, ctx.origin());
        }
        let result = parser.parse(ctx);
        if log::log_enabled!(log::Level::Trace) {
            let outcome = if result.is_ok() { "matched" } else { "failed" };
            log::trace!("leave `{}` at {}: {}", name, ctx.origin(), outcome);
        }
        ctx.pop_name();
        result
    })
}
