use criterion::{black_box, criterion_group, criterion_main, Criterion};
use trend_core::{compose_scene, parse_series, ChartConfig, Columns, Series, Viewport};

fn synthetic_csv(n: usize) -> String {
    let mut text = String::from("year,value\n");
    for i in 0..n {
        let year = 1955.0 + i as f64 / 12.0;
        let value = (i as f64 * 0.05).sin() * 0.2 + i as f64 * 0.0005;
        text.push_str(&format!("{year:.4},{value:.4}\n"));
    }
    text
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_series");
    for &n in &[1_000usize, 10_000usize] {
        let text = synthetic_csv(n);
        let cols = Columns::default();
        group.bench_function(format!("rows_{n}"), |b| {
            b.iter(|| black_box(parse_series(black_box(&text), &cols)))
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose_scene");
    let cfg = ChartConfig::default();
    for &n in &[1_000usize, 10_000usize] {
        let series: Series = parse_series(&synthetic_csv(n), &Columns::default())
            .map(|p| p.series)
            .unwrap_or_default();
        group.bench_function(format!("points_{n}"), |b| {
            b.iter(|| black_box(compose_scene(&series, Viewport::default(), &cfg)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_compose);
criterion_main!(benches);
