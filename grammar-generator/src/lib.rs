//! Grammar Generator
//!
//! Compiles parsers from grammar annotations on the fields of the type they
//! produce. The annotations of a type are joined in declaration order into one
//! grammar; a `$` marker stores the match that follows it in the field whose
//! annotation contains the marker.
//!
//! | syntax | matches |
//! |---|---|
//! | `'text'` | the literal text; in token grammars a token `'Type'` or `'Type:value'` |
//! | `regex('pattern')` | the anchored pattern (character grammars) |
//! | `token('Type')`, `token('Type', 'value')` | a token (token grammars) |
//! | `.` | the grammar of the field's own type |
//! | `name` | a parser or type registered in [`BuildOptions`] |
//! | `a b`, `a \| b`, `( .. )` | sequence, ordered choice, grouping |
//! | `x*`, `x+`, `x?`, `x{m,n}`, `x{m,}` | repetition |
//! | `look(x)` | `x`, backtracking on failure |
//!
//! ```
//! use grammar_generator::{build_parser, BuildOptions, Grammar};
//! use parser_framework::{parse, predefined, ParseConfig, ReaderContext};
//!
//! #[derive(Debug, Default, Clone, PartialEq, Grammar)]
//! struct Person {
//!     #[grammar("'person' $regex('[a-zA-Z]+')")]
//!     name: String,
//!     #[grammar("$regex('[0-9]+')")]
//!     age: u32,
//! }
//!
//! let options = BuildOptions::new().with_skip(predefined::whitespace().discard());
//! let parser = build_parser::<Person>(options).unwrap();
//! let mut ctx = ReaderContext::from_str("<string>", "person Tommy 29");
//! let person = parse(&mut ctx, &parser, ParseConfig::default()).unwrap();
//! assert_eq!(person, Person { name: "Tommy".into(), age: 29 });
//! ```

mod binder;
mod compiler;
mod error;
pub mod grammar;
mod layout;
mod options;
mod schema;
mod terminals;
mod value;

pub use common_framework::OriginRange;
pub use compiler::{build_parser, build_token_parser, Generator};
pub use error::{BindError, GrammarError};
#[cfg(feature = "derive")]
pub use grammar_derive::Grammar;
pub use lexer_framework::{Lexer, LexerBuilder};
pub use options::BuildOptions;
pub use schema::{from_node, FieldValue, Grammar, Schema, TypeInfo};
pub use terminals::Terminals;
pub use value::{Node, Value};
