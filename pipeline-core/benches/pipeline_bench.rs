use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lexer_framework::{exact_token, exact_token_kind, LexerBuilder, TextToken};
use parser_framework::{any, predefined, regex, seq2, seq3, zero_or_more, Forward, Parser};
use pipeline_core::Pipeline;

// --- Shared Types ---
#[allow(dead_code)]
#[derive(Debug, Clone)]
enum Ast {
    Number(i64),
    Binary(Box<Ast>, String, Box<Ast>),
}

fn fold(first: Ast, rest: Vec<(TextToken, Ast)>) -> Ast {
    rest.into_iter()
        .fold(first, |left, (op, right)| Ast::Binary(Box::new(left), op.value, Box::new(right)))
}

// --- Grammar ---
fn pipeline() -> Pipeline<Vec<Ast>> {
    let lexer = LexerBuilder::new()
        .token("Number", regex(r"\d+").expect("number regex"))
        .fixed(["+", "-", "*", "/", "(", ")"])
        .skip(predefined::whitespace().discard())
        .build();

    let expr: Forward<TextToken, Ast> = Forward::new("expression");
    let number = exact_token_kind::<String>("Number")
        .map(|token| Ast::Number(token.value.parse().unwrap_or(0)));
    let group = seq3(exact_token_kind::<String>("("), expr.parser(), exact_token_kind::<String>(")")).map(|(_, inner, _)| inner);
    let atom = any(vec![number, group]);
    let op = |a: &str, b: &str| any(vec![exact_token(a, a.to_string()), exact_token(b, b.to_string())]);
    let term = seq2(atom.clone(), zero_or_more(seq2(op("*", "/"), atom))).map(|(first, rest)| fold(first, rest));
    let sum = seq2(term.clone(), zero_or_more(seq2(op("+", "-"), term))).map(|(first, rest)| fold(first, rest));
    let parser: Parser<TextToken, Vec<Ast>> = zero_or_more(expr.define(sum));

    Pipeline::new(lexer, parser)
}

// --- Generator ---
fn generate_input(lines: usize) -> String {
    let expr = "123 + 456 * ( 789 - 10 ) \n";
    expr.repeat(lines)
}

// --- Bench ---
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let lines = 1000;
    let input = generate_input(lines);
    let pipeline = pipeline();

    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("parse_expr_1k_lines", |b| {
        b.iter(|| pipeline.run("<bench>", &input).unwrap())
    });
    group.bench_function("parse_expr_1k_lines_reader", |b| {
        b.iter(|| pipeline.run_reader("<bench>", input.as_bytes()).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
