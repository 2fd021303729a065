use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use articast_core::{Document, extract, match_platform};

fn bench_parse(c: &mut Criterion) {
    let article = std::fs::read_to_string("../../tests/fixtures/wechat_article.html").unwrap();
    let paragraphs = std::fs::read_to_string("../../tests/fixtures/paragraphs_only.html").unwrap();

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("wechat", "article"), &article, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("plain", "paragraphs"), &paragraphs, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_extract(c: &mut Criterion) {
    let article = std::fs::read_to_string("../../tests/fixtures/wechat_article.html").unwrap();
    let paragraphs = std::fs::read_to_string("../../tests/fixtures/paragraphs_only.html").unwrap();

    let mut group = c.benchmark_group("extract");

    group.bench_function("selector", |b| b.iter(|| extract(black_box(&article), "#js_content")));
    group.bench_function("paragraph_fallback", |b| {
        b.iter(|| extract(black_box(&paragraphs), "#js_content"))
    });

    group.finish();
}

fn bench_match(c: &mut Criterion) {
    let urls = [
        "https://mp.weixin.qq.com/s/abc",
        "https://www.163.com/news/article/ABC.html",
        "https://example.com/unknown",
    ];

    c.bench_function("match_platform", |b| {
        b.iter(|| {
            for url in &urls {
                black_box(match_platform(black_box(url)));
            }
        })
    });
}

criterion_group!(benches, bench_parse, bench_extract, bench_match);
criterion_main!(benches);
