use crate::traits::Parser;
use common_framework::{FatalError, ParseError, StreamUnit};
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// A parser slot that is filled after the parsers referring to it are built.
///
/// Every reference shares the slot, so any parser built over a reference can
/// serve as the entry point once the slot is defined. A recursive definition
/// holds a reference to itself and is never freed.
///
/// ```
/// use parser_framework::{any, exact, seq3, Forward, Parser};
///
/// let nested: Forward<char, String> = Forward::new("nested");
/// let group = seq3(exact("("), nested.parser(), exact(")")).map(|(_, inner, _)| inner);
/// let nested = nested.define(any(vec![group, exact("x")]));
/// # let _ = nested;
/// ```
pub struct Forward<U, T> {
    name: Arc<str>,
    slot: Arc<OnceCell<Parser<U, T>>>,
}

impl<U, T> Forward<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            slot: Arc::new(OnceCell::new()),
        }
    }

    /// Returns a parser that runs whatever the slot is defined as.
    pub fn parser(&self) -> Parser<U, T> {
        let slot = Arc::clone(&self.slot);
        let name = Arc::clone(&self.name);
        Parser::new(move |ctx| match slot.get() {
            Some(target) => target.parse(ctx),
            None => Err(unresolved(&name)),
        })
    }

    /// Fills the slot and returns a parser running its definition.
    pub fn define(self, parser: Parser<U, T>) -> Parser<U, T> {
        assert!(
            self.slot.set(parser).is_ok(),
            "forward `{}` defined twice",
            self.name
        );
        self.parser()
    }
}

fn unresolved(name: &str) -> ParseError {
    FatalError::UnresolvedReference(name.to_string()).into()
}
