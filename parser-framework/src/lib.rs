//! Parser Framework
//!
//! A parser-combinator engine over lazily buffered streams of characters,
//! bytes or tokens.
//!
//! ```
//! use parser_framework::{exact, parse, predefined, seq3, ParseConfig, ReaderContext};
//!
//! let pair = seq3(predefined::int(), exact(","), predefined::int()).map(|(a, _, b)| a + b);
//! let mut ctx = ReaderContext::from_str("<string>", "20,22");
//! assert_eq!(parse(&mut ctx, &pair, ParseConfig::default()).unwrap(), 42);
//! ```

pub mod combinators;
pub mod context;
pub mod parser;
pub mod predefined;
pub mod reader_context;
pub mod source;
pub mod traits;

pub use combinators::*;
pub use common_framework::{
    FatalError, Failure, Origin, OriginRange, ParseError, ParseResult, StreamUnit,
};
pub use context::ParseContext;
pub use parser::{parse, ParseConfig};
pub use reader_context::ReaderContext;
pub use source::{ByteReaderSource, CharReaderSource, IterSource, UnitSource};
pub use traits::Parser;
