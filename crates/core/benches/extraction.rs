use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use clipdown_core::{
    Document, ExtractConfig, MarkdownConfig, Readability, convert_to_markdown, extract_content, preprocess_html,
};

const PAGE_URL: &str = "https://www.poetryfoundation.org/poetrymagazine/poems/155480/one-of-us";

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{name}")).unwrap()
}

/// The article fixture with its body repeated until the page is roughly `copies` times larger.
fn enlarged(html: &str, copies: usize) -> String {
    let start = html.find("<main>").unwrap();
    let end = html.find("</main>").unwrap() + "</main>".len();
    let main = &html[start..end];
    format!("{}{}{}", &html[..start], main.repeat(copies), &html[end..])
}

fn bench_parse(c: &mut Criterion) {
    let small = fixture("article.html");
    let medium = enlarged(&small, 10);
    let large = enlarged(&small, 100);

    let mut group = c.benchmark_group("parse");

    for (name, html) in [("small", &small), ("medium", &medium), ("large", &large)] {
        group.bench_with_input(BenchmarkId::new(name, html.len()), html, |b, html| {
            b.iter(|| Document::parse(black_box(html)))
        });
    }

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = fixture("article.html");
    let reader = Readability::new();

    c.bench_function("full_extraction", |b| b.iter(|| reader.parse_with_url(black_box(&html), PAGE_URL)));
}

fn bench_preprocess(c: &mut Criterion) {
    let html = enlarged(&fixture("article.html"), 10);
    let config = Default::default();

    c.bench_function("preprocess", |b| b.iter(|| preprocess_html(black_box(&html), &config)));
}

fn bench_scoring(c: &mut Criterion) {
    let html = enlarged(&fixture("article.html"), 10);
    let preprocessed = preprocess_html(&html, &Default::default());
    let doc = Document::parse(&preprocessed).unwrap();
    let config = ExtractConfig::default();

    c.bench_function("scoring_and_selection", |b| {
        b.iter(|| extract_content(black_box(&doc), black_box(&config)))
    });
}

fn bench_markdown(c: &mut Criterion) {
    let article = Readability::new().parse_with_url(&fixture("article.html"), PAGE_URL).unwrap();
    let config = MarkdownConfig::default();

    c.bench_function("markdown_conversion", |b| {
        b.iter(|| convert_to_markdown(black_box(&article.content), &config))
    });
}

criterion_group!(
    benches,
    bench_parse,
    bench_full_extraction,
    bench_preprocess,
    bench_scoring,
    bench_markdown
);
criterion_main!(benches);
