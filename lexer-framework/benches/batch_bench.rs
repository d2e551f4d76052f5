use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use lexer_framework::LexerBuilder;
use parser_framework::{predefined, ParseContext, ReaderContext};

// --- Data Generation ---
fn generate_source(lines: usize) -> String {
    let mut source = String::with_capacity(lines * 32);
    for i in 0..lines {
        source.push_str(&format!("let value_{} = (x{} => 12) == y;\n", i, i % 7));
    }
    source
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer_batch");

    let source = generate_source(2_000);
    let lexer = LexerBuilder::new()
        .identifier("Ident", predefined::identifier())
        .reserved(["let"])
        .token("Int", predefined::int().map(|n| n.to_string()))
        .fixed(["=", "==", "=>", "(", ")", ";"])
        .skip(predefined::whitespace().discard())
        .build();

    group.throughput(Throughput::Bytes(source.len() as u64));
    group.bench_function("tokenize", |b| {
        b.iter(|| {
            let mut tokens = lexer
                .tokenize(ReaderContext::from_str("<bench>", &source))
                .unwrap();
            let mut count = 0usize;
            while !tokens.is_eof().unwrap() {
                tokens.consume(1).unwrap();
                count += 1;
            }
            count
        })
    });

    group.finish();
}

criterion_group!(benches, bench_lexer);
criterion_main!(benches);
