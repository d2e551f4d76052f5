use crate::traits::Parser;
use common_framework::{ParseError, ParseResult, StreamUnit};

/// Applies the sequencing rule to the result of the element at `index`:
/// the first element keeps its error class, any later failure is hard.
#[inline]
fn step<T>(index: usize, result: ParseResult<T>) -> ParseResult<T> {
    if index == 0 {
        result
    } else {
        result.map_err(ParseError::harden)
    }
}

/// Runs every parser in order and collects their results.
pub fn seq<U, T>(parsers: Vec<Parser<U, T>>) -> Parser<U, Vec<T>>
where
    U: StreamUnit,
    T: 'static,
{
    Parser::new(move |ctx| {
        let mut results = Vec::with_capacity(parsers.len());
        for (index, parser) in parsers.iter().enumerate() {
            results.push(step(index, parser.parse(ctx))?);
        }
        Ok(results)
    })
}

macro_rules! fixed_seq {
    ($(#[$meta:meta])* $name:ident => $($parser:ident: $ty:ident),+) => {
        $(#[$meta])*
        #[allow(clippy::too_many_arguments)]
        pub fn $name<U, $($ty),+>($($parser: Parser<U, $ty>),+) -> Parser<U, ($($ty,)+)>
        where
            U: StreamUnit,
            $($ty: 'static,)+
        {
            Parser::new(move |ctx| {
                let mut index = 0;
                #[allow(unused_assignments)]
                let results = ($({
                    let value = step(index, $parser.parse(ctx))?;
                    index += 1;
                    value
                },)+);
                Ok(results)
            })
        }
    };
}

fixed_seq!(
    /// Runs two parsers in order.
    seq2 => p1: T1, p2: T2
);
fixed_seq!(seq3 => p1: T1, p2: T2, p3: T3);
fixed_seq!(seq4 => p1: T1, p2: T2, p3: T3, p4: T4);
fixed_seq!(seq5 => p1: T1, p2: T2, p3: T3, p4: T4, p5: T5);
fixed_seq!(seq6 => p1: T1, p2: T2, p3: T3, p4: T4, p5: T5, p6: T6);
fixed_seq!(seq7 => p1: T1, p2: T2, p3: T3, p4: T4, p5: T5, p6: T6, p7: T7);
fixed_seq!(seq8 => p1: T1, p2: T2, p3: T3, p4: T4, p5: T5, p6: T6, p7: T7, p8: T8);
