// SPDX-License-Identifier: PMPL-1.0-or-later
//! Benchmarks for the analysis pipeline

use accesscheck::lines::annotate_lines;
use accesscheck::report::{render_json, render_markdown};
use accesscheck::{analyze, analyze_with, AnalysisOptions};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A page with enough of every element kind to exercise each checker
fn large_page() -> String {
    let mut html = String::from(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<title>Bench</title>\n\
         <meta name=\"viewport\" content=\"width=device-width\">\n</head>\n<body>\n<h1>Bench</h1>\n",
    );
    for i in 0..300 {
        html.push_str(&format!("<h2>Section {i}</h2>\n"));
        html.push_str(&format!("<img src=\"/img/{i}.png\" alt=\"Figure {i}\">\n"));
        html.push_str(&format!("<a href=\"/doc/{i}\">Read document {i}</a>\n"));
        html.push_str(&format!(
            "<label>Field {i} <input name=\"f{i}\"></label>\n"
        ));
    }
    html.push_str("</body>\n</html>\n");
    html
}

fn bench_analyze(c: &mut Criterion) {
    let page = large_page();
    c.bench_function("analyze_large_page", |b| {
        b.iter(|| analyze(black_box("https://bench.example"), black_box(&page)))
    });
}

fn bench_analyze_with_lines(c: &mut Criterion) {
    let page = large_page();
    let options = AnalysisOptions { track_lines: true };
    c.bench_function("analyze_large_page_with_lines", |b| {
        b.iter(|| analyze_with(black_box("https://bench.example"), black_box(&page), &options))
    });
}

fn bench_annotate_lines(c: &mut Criterion) {
    let page = large_page();
    c.bench_function("annotate_lines", |b| b.iter(|| annotate_lines(black_box(&page))));
}

fn bench_render(c: &mut Criterion) {
    let report = analyze("https://bench.example", &large_page());
    c.bench_function("render_json", |b| b.iter(|| render_json(black_box(&report))));
    c.bench_function("render_markdown", |b| {
        b.iter(|| render_markdown(black_box(&report)))
    });
}

criterion_group!(
    benches,
    bench_analyze,
    bench_analyze_with_lines,
    bench_annotate_lines,
    bench_render
);
criterion_main!(benches);
