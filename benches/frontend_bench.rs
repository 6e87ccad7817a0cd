use criterion::{black_box, criterion_group, criterion_main, Criterion};
use minilisp::{parse_all, tokenize};

const PROGRAM: &str = r#"
; arithmetic helpers
(define square (x) (* x x))
(define average (a b) (/ (+ a b) 2.0))
(var scale 3.)
(define pick (flag) (if flag "yes" nil))
(var adder (lambda (a b) (+ a b)))
(average (square 4) (adder 1 scale))
"#;

fn lexer_benchmark(c: &mut Criterion) {
    c.bench_function("tokenize small program", |b| {
        b.iter(|| tokenize(black_box(PROGRAM.as_bytes()), PROGRAM.len()).unwrap())
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let tokens = tokenize(PROGRAM.as_bytes(), PROGRAM.len()).unwrap();

    c.bench_function("parse small program", |b| {
        b.iter(|| parse_all(black_box(&tokens)).unwrap())
    });
}

criterion_group!(benches, lexer_benchmark, parser_benchmark);
criterion_main!(benches);
