use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use parser_framework::{
    any, exact, look, one_or_more_separated, parse, predefined, seq2, seq3, zero_or_more, Forward,
    ParseConfig, ParseContext, Parser, ReaderContext,
};

// --- Grammar ---
// A call-or-arithmetic language: "a + b * c - func(1, 2)"
fn expression() -> Parser<char, usize> {
    let expr: Forward<char, usize> = Forward::new("expression");

    let call = look(seq3(
        predefined::identifier(),
        exact("("),
        seq2(one_or_more_separated(expr.parser(), exact(",")), exact(")")),
    ))
    .map(|(_, _, (args, _))| 1 + args.iter().sum::<usize>());
    let atom = any(vec![
        call,
        predefined::identifier().bind(1),
        predefined::int().bind(1),
        seq3(exact("("), expr.parser(), exact(")")).map(|(_, inner, _)| inner),
    ]);
    let op = any(vec![exact("+"), exact("-"), exact("*"), exact("/")]);
    let chain = seq2(atom.clone(), zero_or_more(seq2(op, atom)))
        .map(|(first, rest)| first + rest.into_iter().map(|(_, n)| n).sum::<usize>());
    expr.define(chain)
}

// --- Data Generation ---
fn generate_source(count: usize) -> String {
    let mut source = String::with_capacity(count * 24);
    for i in 0..count {
        if i > 0 {
            source.push_str(" + ");
        }
        source.push_str("a + b * (c - func(1, x))");
    }
    source
}

fn bench_parser(c: &mut Criterion) {
    let mut group = c.benchmark_group("combinator_complex");

    let size = 1_000;
    let source = generate_source(size);
    let grammar = expression();

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("parse_expr_mixed", |b| {
        b.iter(|| {
            let mut ctx = ReaderContext::from_str("<bench>", &source);
            ctx.add_skip(predefined::whitespace().discard()).unwrap();
            let _atoms = parse(&mut ctx, &grammar, ParseConfig::default()).unwrap();
        })
    });

    group.finish();
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
