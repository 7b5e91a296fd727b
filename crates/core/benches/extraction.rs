use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use abstractor_core::{Document, ExtractConfig, FormatConfig, ao3, ffn, format_series, format_work, sanitize_html};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

fn bench_parse(c: &mut Criterion) {
    let work = fixture("ao3/work_full.html");
    let series = fixture("ao3/series.html");

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("ao3", "work"), &work, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("ao3", "series"), &series, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_ao3_work(c: &mut Criterion) {
    let doc = Document::parse(&fixture("ao3/work_full.html"));
    let extract = ExtractConfig::default();
    let format = FormatConfig::default();

    c.bench_function("ao3_work_summary", |b| {
        b.iter(|| {
            let fic = ao3::extract_work(black_box(&doc), "https://archiveofourown.org/works/2002", &extract).unwrap();
            format_work(&fic, &format)
        })
    });
}

fn bench_ao3_series(c: &mut Criterion) {
    let doc = Document::parse(&fixture("ao3/series.html"));
    let extract = ExtractConfig::default();
    let format = FormatConfig::default();

    c.bench_function("ao3_series_summary", |b| {
        b.iter(|| {
            let series = ao3::extract_series(black_box(&doc), "https://archiveofourown.org/series/777", &extract).unwrap();
            format_series(&series, &format)
        })
    });
}

fn bench_ffn(c: &mut Criterion) {
    let doc = Document::parse(&fixture("ffn/story.html"));
    let digest = fixture("ffn/digest.json");
    let extract = ExtractConfig::default();

    let mut group = c.benchmark_group("ffn");

    group.bench_function("story_page", |b| {
        b.iter(|| ffn::extract_story(black_box(&doc), "https://www.fanfiction.net/s/12345", &extract).unwrap())
    });

    group.bench_function("digest", |b| {
        b.iter(|| ffn::parse_digest(black_box(&digest), "https://www.fanfiction.net/s/12345", &extract).unwrap())
    });

    group.finish();
}

fn bench_sanitize(c: &mut Criterion) {
    let html = "<blockquote><p>One.<br>Two.</p><ul><li>a</li><li>b</li></ul><p>Three.</p><p>Four.</p></blockquote>";
    let config = Default::default();

    c.bench_function("sanitize", |b| b.iter(|| sanitize_html(black_box(html), &config)));
}

criterion_group!(benches, bench_parse, bench_ao3_work, bench_ao3_series, bench_ffn, bench_sanitize);
criterion_main!(benches);
