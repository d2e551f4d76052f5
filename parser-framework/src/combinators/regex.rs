use crate::context::ParseContext;
use crate::traits::Parser;
use common_framework::{FatalError, ParseResult};
use regex_automata::dfa::{dense, Automaton, StartKind};
use regex_automata::{Anchored, Input, MatchKind};
use std::fmt;
use std::sync::Arc;

/// Error raised when a pattern fails to compile.
pub type RegexError = dense::BuildError;

/// Characters pulled from the context in the first step of a match.
const FIRST_CHUNK: usize = 16;
/// Chunks double up to this size.
const CHUNK_LIMIT: usize = 1024;

/// A compiled pattern, always anchored at the next unconsumed character.
///
/// Matching feeds the automaton one character at a time and stops as soon as
/// no continuation can change the result, so a match is never cut short and a
/// failing pattern reads no further than the first character it rejects.
#[derive(Clone)]
pub struct Pattern {
    source: Arc<str>,
    dfa: Arc<dense::DFA<Vec<u32>>>,
}

impl Pattern {
    pub fn new(pattern: &str) -> Result<Self, RegexError> {
        let dfa = dense::Builder::new()
            .configure(
                dense::Config::new()
                    .start_kind(StartKind::Anchored)
                    .match_kind(MatchKind::LeftmostFirst),
            )
            .build(pattern)?;
        Ok(Self {
            source: pattern.into(),
            dfa: Arc::new(dfa),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length in characters of the match at the current position, if any.
    fn match_len(&self, ctx: &mut dyn ParseContext<char>) -> ParseResult<Option<usize>> {
        let dfa = &*self.dfa;
        let start = Input::new("").anchored(Anchored::Yes);
        let mut state = dfa
            .start_state_forward(&start)
            .map_err(|err| FatalError::Other(format!("regex `{}`: {}", self.source, err)))?;

        let mut matched = None;
        let mut fed = 0;
        let mut chunk = FIRST_CHUNK;
        let mut utf8 = [0u8; 4];
        loop {
            let units = ctx.peek(fed, chunk)?;
            let exhausted = units.len() < chunk;
            for unit in units {
                // Matches are reported one byte late: a match state entered on
                // the first byte of `unit` ends just before it.
                for (offset, byte) in unit.encode_utf8(&mut utf8).bytes().enumerate() {
                    state = dfa.next_state(state, byte);
                    if !dfa.is_special_state(state) {
                        continue;
                    }
                    if dfa.is_match_state(state) {
                        if offset == 0 {
                            matched = Some(fed);
                        }
                    } else if dfa.is_dead_state(state) || dfa.is_quit_state(state) {
                        return Ok(matched);
                    }
                }
                fed += 1;
            }
            if exhausted {
                state = dfa.next_eoi_state(state);
                if dfa.is_match_state(state) {
                    matched = Some(fed);
                }
                return Ok(matched);
            }
            chunk = (chunk * 2).min(CHUNK_LIMIT);
        }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pattern({:?})", self.source)
    }
}

/// Matches a pattern at the next unconsumed character.
pub fn regex(pattern: &str) -> Result<Parser<char, String>, RegexError> {
    Ok(regex_with(pattern, Pattern::new(pattern)?))
}

/// Matches a precompiled pattern; `name` is used in failure messages.
pub fn regex_with(name: &str, pattern: Pattern) -> Parser<char, String> {
    let expected = format!("regex `{}`", name);
    Parser::new(move |ctx| {
        ctx.run_skips()?;
        match pattern.match_len(ctx)? {
            Some(len) => Ok(ctx.consume(len)?.into_iter().collect()),
            None => Err(ctx.expected(&expected)),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader_context::ReaderContext;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_leftmost_first_alternation() {
        let mut ctx = ReaderContext::from_str("<test>", "abc");
        assert_eq!(regex("a|ab").unwrap().parse(&mut ctx).unwrap(), "a");
        let mut ctx = ReaderContext::from_str("<test>", "abc");
        assert_eq!(regex("ab|a").unwrap().parse(&mut ctx).unwrap(), "ab");
    }

    #[test]
    fn test_empty_match_and_end_anchor() {
        let mut ctx = ReaderContext::from_str("<test>", "xyz");
        assert_eq!(regex("a*").unwrap().parse(&mut ctx).unwrap(), "");
        assert_eq!(ctx.index(), 0);
        assert_eq!(regex("xyz$").unwrap().parse(&mut ctx).unwrap(), "xyz");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut ctx = ReaderContext::from_str("<test>", "héllo wörld");
        assert_eq!(regex(r"\w+").unwrap().parse(&mut ctx).unwrap(), "héllo");
        assert_eq!(ctx.index(), 5);
    }

    #[test]
    fn test_failure_reads_one_chunk() {
        let pulled = Rc::new(Cell::new(0usize));
        let counter = Rc::clone(&pulled);
        let units = std::iter::repeat('a')
            .take(10_000)
            .inspect(move |_| counter.set(counter.get() + 1));
        let mut ctx = ReaderContext::from_units("<test>", units);
        assert!(regex("b").unwrap().parse(&mut ctx).unwrap_err().is_soft());
        assert!(pulled.get() <= FIRST_CHUNK, "pulled {} units", pulled.get());
    }
}
