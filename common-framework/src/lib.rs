//! Common Framework
//!
//! 提供 parser-framework、lexer-framework 与 grammar-generator 之间的共同组件：
//! 源位置、流单元、词法单元、前瞻帧栈以及三级错误模型。

pub mod checkpoint;
pub mod error;
pub mod origin;
pub mod token;
pub mod unit;

pub use checkpoint::LookStack;
pub use error::{FatalError, Failure, ParseError, ParseResult};
pub use origin::{Origin, OriginRange};
pub use token::{TextToken, Token, TokenKind};
pub use unit::StreamUnit;
