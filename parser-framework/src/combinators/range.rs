use crate::combinators::{map, seq2};
use crate::traits::Parser;
use common_framework::StreamUnit;

/// Collects between `min` and `max` results of `parser` (`None` for no upper
/// bound).
///
/// Falling short of `min` is a soft failure when nothing was collected and a
/// hard one otherwise. Hard and fatal failures of `parser` always propagate.
///
/// # Panics
///
/// Panics if `max` is `Some(0)` or smaller than `min`.
pub fn range<U, T>(min: usize, max: Option<usize>, parser: Parser<U, T>) -> Parser<U, Vec<T>>
where
    U: StreamUnit,
    T: 'static,
{
    if let Some(max) = max {
        assert!(max > 0 && max >= min, "invalid range {{{}, {}}}", min, max);
    }
    Parser::new(move |ctx| {
        let mut items = Vec::new();
        let mut last_err = None;
        while max.map_or(true, |max| items.len() < max) {
            let before = ctx.index();
            match parser.parse(ctx) {
                Ok(item) => {
                    items.push(item);
                    // A match that consumed nothing would repeat forever.
                    if ctx.index() == before {
                        break;
                    }
                }
                Err(err) if err.is_soft() => {
                    last_err = Some(err);
                    break;
                }
                Err(err) => return Err(err),
            }
        }
        if items.len() < min {
            let err = match last_err {
                Some(err) => err,
                None => ctx.expected(&format!("at least {} items", min)),
            };
            return Err(if items.is_empty() { err } else { err.harden() });
        }
        Ok(items)
    })
}

pub fn zero_or_more<U, T>(parser: Parser<U, T>) -> Parser<U, Vec<T>>
where
    U: StreamUnit,
    T: 'static,
{
    range(0, None, parser)
}

pub fn one_or_more<U, T>(parser: Parser<U, T>) -> Parser<U, Vec<T>>
where
    U: StreamUnit,
    T: 'static,
{
    range(1, None, parser)
}

/// Matches `parser` at most once.
pub fn maybe<U, T>(parser: Parser<U, T>) -> Parser<U, Option<T>>
where
    U: StreamUnit,
    T: 'static,
{
    Parser::new(move |ctx| match parser.parse(ctx) {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_soft() => Ok(None),
        Err(err) => Err(err),
    })
}

/// Matches `parser` one or more times with `separator` in between, returning
/// only the element results. A separator not followed by an element is a hard
/// failure.
pub fn one_or_more_separated<U, T, S>(parser: Parser<U, T>, separator: Parser<U, S>) -> Parser<U, Vec<T>>
where
    U: StreamUnit,
    T: 'static,
    S: 'static,
{
    let rest = zero_or_more(map(seq2(separator, parser.clone()), |(_, item)| item));
    map(seq2(parser, rest), |(first, rest)| {
        let mut items = Vec::with_capacity(rest.len() + 1);
        items.push(first);
        items.extend(rest);
        items
    })
}

pub fn zero_or_more_separated<U, T, S>(parser: Parser<U, T>, separator: Parser<U, S>) -> Parser<U, Vec<T>>
where
    U: StreamUnit,
    T: 'static,
    S: 'static,
{
    map(maybe(one_or_more_separated(parser, separator)), Option::unwrap_or_default)
}
