//! 注解语法解析器
//!
//! ```text
//! expr     = sequence ('|' sequence)*
//! sequence = value+
//! value    = '$'? atom suffix?
//! atom     = '.' | regex('..') | token('..' [, '..']) | look(expr)
//!          | '..' | identifier | '(' expr ')'
//! suffix   = '*' | '+' | '?' | '{' n ',' n? '}'
//! ```
//!
//! Blanks between elements are skipped. Line breaks never reach this parser,
//! so every column is on line 1.

use super::node::{GrammarNode, Suffix};
use crate::error::GrammarError;
use common_framework::{Failure, ParseError};
use once_cell::sync::Lazy;
use parser_framework::{
    any, exact, look, maybe, named, one_or_more, one_or_more_separated, parse, predefined,
    regex_with, seq2, seq3, seq4, seq5, skip, Forward, ParseConfig, Parser, Pattern, ReaderContext,
};

static BLANKS_RE: Lazy<Pattern> = Lazy::new(|| Pattern::new(r"[ \t]+").expect("blank regex init failed"));
static COUNT_RE: Lazy<Pattern> = Lazy::new(|| Pattern::new(r"\d+").expect("count regex init failed"));

static GRAMMAR: Lazy<Parser<char, GrammarNode>> = Lazy::new(grammar);

/// Parses the joined annotation text of `type_name`.
pub(crate) fn parse_annotation(type_name: &str, text: &str) -> Result<GrammarNode, GrammarError> {
    let mut ctx = ReaderContext::from_str(type_name, text);
    parse(&mut ctx, &GRAMMAR, ParseConfig::default()).map_err(|err| {
        let (column, message) = match err.failure() {
            Some(failure) => (
                failure.origin.column,
                format!("expected `{}` but got `{}`", failure.expected, failure.got),
            ),
            None => (1, err.to_string()),
        };
        GrammarError::Syntax {
            type_name: type_name.to_string(),
            text: text.to_string(),
            column,
            message,
        }
    })
}

fn grammar() -> Parser<char, GrammarNode> {
    let expr: Forward<char, GrammarNode> = Forward::new("expression");

    let infer = column_of(exact(".")).map(|column| GrammarNode::Infer { column });
    let pattern = seq3(call("regex"), quoted(), exact(")"))
        .map(|(_, pattern, _)| GrammarNode::Regex(pattern.replace("\\'", "'")));
    let token = seq4(call("token"), quoted(), maybe(seq2(exact(","), quoted())), exact(")"))
        .map(|(_, kind, value, _)| token_node(unescape(&kind), value.map(|(_, value)| unescape(&value))));
    let lookahead = seq3(call("look"), expr.parser(), exact(")")).map(|(_, child, _)| GrammarNode::Look(Box::new(child)));
    let literal = quoted().map(|text| GrammarNode::Literal(unescape(&text)));
    let reference = predefined::identifier().map(GrammarNode::Reference);
    let group = seq3(exact("("), expr.parser(), exact(")")).map(|(_, child, _)| child);
    let atom = named(
        "value",
        any(vec![infer, pattern, token, lookahead, literal, reference, group]),
    );

    let capture = seq2(column_of(exact("$")), atom.clone()).map(|(column, child)| GrammarNode::Capture {
        column,
        child: Box::new(child),
    });
    let value = seq2(any(vec![capture, atom]), maybe(suffix())).map(|(node, suffix)| match suffix {
        Some(suffix) => node.repeat(suffix),
        None => node,
    });
    let sequence = one_or_more(value).map(|nodes| collapse(nodes, GrammarNode::Seq));
    let alternatives = one_or_more_separated(sequence, exact("|")).map(|nodes| collapse(nodes, GrammarNode::Any));

    skip(regex_with("blank", BLANKS_RE.clone()).discard(), expr.define(alternatives))
}

fn collapse(mut nodes: Vec<GrammarNode>, group: fn(Vec<GrammarNode>) -> GrammarNode) -> GrammarNode {
    if nodes.len() == 1 {
        nodes.remove(0)
    } else {
        group(nodes)
    }
}

fn column_of(parser: Parser<char, String>) -> Parser<char, usize> {
    parser.map_detailed(|_, range| Ok(range.start.column))
}

/// `name(`, consumed only when both parts match so that identifiers like
/// `regexp` still parse as references.
fn call(name: &str) -> Parser<char, String> {
    look(seq2(exact(name), exact("("))).map(|(name, _)| name)
}

fn quoted() -> Parser<char, String> {
    predefined::single_quoted_string()
}

/// Resolves `\'` and `\\` in a quoted literal.
fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next_if(|next| matches!(next, '\'' | '\\')) {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

fn token_node(kind: String, value: Option<String>) -> GrammarNode {
    match value {
        Some(value) => GrammarNode::Token {
            kind,
            value: Some(value),
        },
        None => match kind.split_once(':') {
            Some((kind, value)) if !kind.is_empty() => GrammarNode::Token {
                kind: kind.to_string(),
                value: Some(value.to_string()),
            },
            _ => GrammarNode::Token { kind, value: None },
        },
    }
}

fn suffix() -> Parser<char, Suffix> {
    let count = || regex_with("count", COUNT_RE.clone());
    let bounded = seq5(exact("{"), count(), exact(","), maybe(count()), exact("}")).map_detailed(
        |(_, min, _, max, _), range| {
            let got = format!("{{{},{}}}", min, max.as_deref().unwrap_or(""));
            let invalid = || ParseError::hard(Failure::new(range.start.clone(), "a valid repetition range", got.clone()));
            let min: usize = min.parse().map_err(|_| invalid())?;
            let max = match max {
                Some(max) => Some(max.parse::<usize>().map_err(|_| invalid())?),
                None => None,
            };
            match max {
                Some(max) if max == 0 || max < min => Err(invalid()),
                _ => Ok(Suffix::Range(min, max)),
            }
        },
    );
    any(vec![
        exact("*").bind(Suffix::Range(0, None)),
        exact("+").bind(Suffix::Range(1, None)),
        exact("?").bind(Suffix::Maybe),
        bounded,
    ])
}
