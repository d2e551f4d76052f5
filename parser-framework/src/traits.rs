use crate::combinators;
use crate::context::ParseContext;
use common_framework::{OriginRange, ParseResult, StreamUnit};
use std::fmt;
use std::sync::Arc;

type ParseFn<U, T> = dyn Fn(&mut dyn ParseContext<U>) -> ParseResult<T> + Send + Sync;

/// A parser over units `U` producing values `T`.
///
/// Parsers are cheap to clone; clones share the same underlying function and
/// compare equal under [`Parser::same_as`], which is how skip parsers are
/// identified when they are added to or removed from a context.
pub struct Parser<U, T> {
    run: Arc<ParseFn<U, T>>,
}

impl<U, T> Clone for Parser<U, T> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<U, T> fmt::Debug for Parser<U, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Parser({:p})", Arc::as_ptr(&self.run))
    }
}

impl<U, T> Parser<U, T>
where
    U: StreamUnit,
    T: 'static,
{
    /// Wraps a parsing function.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut dyn ParseContext<U>) -> ParseResult<T> + Send + Sync + 'static,
    {
        Self { run: Arc::new(run) }
    }

    /// Runs the parser against a context.
    #[inline]
    pub fn parse(&self, ctx: &mut dyn ParseContext<U>) -> ParseResult<T> {
        (self.run)(ctx)
    }

    /// Returns true if both handles refer to the same parser.
    pub fn same_as(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.run), Arc::as_ptr(&other.run))
    }

    pub fn map<R, F>(self, f: F) -> Parser<U, R>
    where
        R: 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        combinators::map(self, f)
    }

    pub fn map_detailed<R, F>(self, f: F) -> Parser<U, R>
    where
        R: 'static,
        F: Fn(T, OriginRange) -> ParseResult<R> + Send + Sync + 'static,
    {
        combinators::map_detailed(self, f)
    }

    pub fn bind<R>(self, value: R) -> Parser<U, R>
    where
        R: Clone + Send + Sync + 'static,
    {
        combinators::bind(self, value)
    }

    /// Drops the result, e.g. to use the parser as a skip parser.
    pub fn discard(self) -> Parser<U, ()> {
        combinators::map(self, |_| ())
    }

    pub fn named(self, name: &str) -> Parser<U, T> {
        combinators::named(name, self)
    }
}
