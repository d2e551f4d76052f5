//! 集成测试：四则运算计算器
//!
//! Builds a recursive arithmetic grammar from combinators and evaluates while
//! parsing.

use parser_framework::{
    any, exact, named, parse, predefined, seq2, seq3, zero_or_more, Forward, ParseConfig,
    ParseContext, Parser, ReaderContext,
};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Exp,
}

fn fold((first, rest): (f64, Vec<(Op, f64)>)) -> f64 {
    rest.into_iter().fold(first, |left, (op, right)| match op {
        Op::Add => left + right,
        Op::Sub => left - right,
        Op::Mul => left * right,
        Op::Div => left / right,
        Op::Exp => left.powf(right),
    })
}

fn operator(text: &str, op: Op) -> Parser<char, Op> {
    exact(text).bind(op)
}

fn calculator() -> Parser<char, f64> {
    let expression: Forward<char, f64> = Forward::new("expression");

    let factor = named(
        "factor",
        any(vec![
            predefined::float(),
            seq3(exact("("), expression.parser(), exact(")")).map(|(_, value, _)| value),
        ]),
    );
    let exponent = named(
        "exponential term",
        seq2(factor.clone(), zero_or_more(seq2(operator("^", Op::Exp), factor))).map(fold),
    );
    let term = named(
        "term",
        seq2(
            exponent.clone(),
            zero_or_more(seq2(
                any(vec![operator("*", Op::Mul), operator("/", Op::Div)]),
                exponent,
            )),
        )
        .map(fold),
    );
    let sum = named(
        "expression",
        seq2(
            term.clone(),
            zero_or_more(seq2(
                any(vec![operator("+", Op::Add), operator("-", Op::Sub)]),
                term,
            )),
        )
        .map(fold),
    );
    expression.define(sum)
}

fn evaluate(input: &str) -> Result<f64, String> {
    let mut ctx = ReaderContext::from_str("<calc>", input);
    ctx.add_skip(predefined::whitespace().discard())
        .map_err(|err| err.to_string())?;
    parse(&mut ctx, &calculator(), ParseConfig::default()).map_err(|err| err.to_string())
}

#[test]
fn test_parenthesized_product() {
    assert_eq!(evaluate("11 * (22 + 33)"), Ok(605.0));
}

#[test]
fn test_left_associative_chain() {
    assert_eq!(evaluate("11 * (22 + 33) * 44"), Ok(26620.0));
    assert_eq!(evaluate("10 - 4 - 3"), Ok(3.0));
    assert_eq!(evaluate("(1 + 2) * 3 - 4 / 2"), Ok(7.0));
}

#[test]
fn test_exponent_binds_tighter() {
    assert_eq!(evaluate("2 ^ 3 * 2"), Ok(16.0));
}

#[test]
fn test_nested_parentheses() {
    assert_eq!(evaluate("((((7))))"), Ok(7.0));
}

#[test]
fn test_dangling_operator_reports_factor() {
    assert_eq!(
        evaluate("1 + "),
        Err("parse error at `<calc>:1:5`: expected `factor` but got `EOF`".to_string())
    );
}

#[test]
fn test_trailing_input_is_rejected() {
    let err = evaluate("1 2").unwrap_err();
    assert!(err.contains("expected `EOF` but got `2`"), "{}", err);
}

/// Same grammar with the recursion routed through `factor`; the entry point is
/// built over references and the defined parser itself is dropped.
fn factor_first_calculator() -> Parser<char, f64> {
    let factor: Forward<char, f64> = Forward::new("factor");
    let term = seq2(
        factor.parser(),
        zero_or_more(seq2(
            any(vec![operator("*", Op::Mul), operator("/", Op::Div)]),
            factor.parser(),
        )),
    )
    .map(fold);
    let sum = seq2(
        term.clone(),
        zero_or_more(seq2(
            any(vec![operator("+", Op::Add), operator("-", Op::Sub)]),
            term,
        )),
    )
    .map(fold);
    let _ = factor.define(any(vec![
        predefined::float(),
        seq3(exact("("), sum.clone(), exact(")")).map(|(_, value, _)| value),
    ]));
    sum
}

#[test]
fn test_entry_point_built_over_references() {
    let calculator = factor_first_calculator();
    let mut ctx = ReaderContext::from_str("<calc>", "2*(3*4) - (1+1)");
    ctx.add_skip(predefined::whitespace().discard()).unwrap();
    assert_eq!(parse(&mut ctx, &calculator, ParseConfig::default()).unwrap(), 22.0);
}
