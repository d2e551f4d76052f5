//! The annotation language: its syntax tree and the parser producing it.

mod node;
mod syntax;

pub use node::GrammarNode;
pub(crate) use syntax::parse_annotation;
