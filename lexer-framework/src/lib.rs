//! Lexer Framework
//!
//! Token indirection for the parser framework: a lexing parser over
//! characters becomes the unit source of a second context over tokens.
//!
//! ```
//! use lexer_framework::{exact_token_kind, LexerBuilder};
//! use parser_framework::{parse, predefined, zero_or_more, ParseConfig, ReaderContext};
//!
//! let lexer = LexerBuilder::new()
//!     .identifier("Ident", predefined::identifier())
//!     .skip(predefined::whitespace().discard())
//!     .build();
//! let chars = ReaderContext::from_str("<string>", "a b c ");
//! let mut tokens = lexer.tokenize(chars).unwrap();
//! let idents = zero_or_more(exact_token_kind::<String>("Ident"));
//! assert_eq!(parse(&mut tokens, &idents, ParseConfig::default()).unwrap().len(), 3);
//! ```

pub mod lexer;
pub mod reader;
pub mod token;

pub use common_framework::{TextToken, Token, TokenKind};
pub use lexer::{Lexer, LexerBuilder};
pub use reader::{token_context, TokenSource};
pub use token::{bind_to_token, exact_token, exact_token_kind, token_value};
