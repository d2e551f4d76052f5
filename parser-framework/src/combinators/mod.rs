//! The combinator algebra.
//!
//! Every function here returns a [`Parser`](crate::Parser). Terminal matchers
//! run the context's skip parsers before matching; structural combinators
//! follow the soft/hard/fatal propagation rules of
//! [`ParseError`](common_framework::ParseError).

mod choice;
mod exact;
mod forward;
mod look;
mod map;
mod named;
mod range;
mod regex;
mod seq;
mod skip;

pub use choice::{any, one_of};
pub use exact::{exact, exact_one, exact_units};
pub use forward::Forward;
pub use look::look;
pub use map::{bind, map, map_detailed};
pub use named::named;
pub use range::{
    maybe, one_or_more, one_or_more_separated, range, zero_or_more, zero_or_more_separated,
};
pub use regex::{regex, regex_with, Pattern, RegexError};
pub use seq::{seq, seq2, seq3, seq4, seq5, seq6, seq7, seq8};
pub use skip::{skip, unskip};
