use criterion::{black_box, criterion_group, criterion_main, Criterion};
use link_harvest::link_scraper::{extract_links, parse_page_range};

fn sample_page(anchors: usize) -> String {
    let mut html = String::from("<html><body><ul>");
    for i in 0..anchors {
        let ext = ["pdf", "html", "zip", "php", "csv"][i % 5];
        html.push_str(&format!(
            r#"<li><a href="/files/item-{i}.{ext}">Item number {i}</a></li>"#
        ));
        if i % 10 == 0 {
            // repeated hrefs exercise per-page deduplication
            html.push_str(r#"<li><a href="/files/item-0.pdf">Again</a></li>"#);
        }
    }
    html.push_str("</ul></body></html>");
    html
}

fn bench_extract_links(c: &mut Criterion) {
    let page = sample_page(500);
    c.bench_function("extract_links_500_anchors", |b| {
        b.iter(|| extract_links(black_box(&page), "https://example.com/library/", None))
    });
}

fn bench_parse_page_range(c: &mut Criterion) {
    c.bench_function("parse_page_range_mixed", |b| {
        b.iter(|| parse_page_range(black_box("1,3-5,9,12-40,2")))
    });
}

criterion_group!(benches, bench_extract_links, bench_parse_page_range);
criterion_main!(benches);
