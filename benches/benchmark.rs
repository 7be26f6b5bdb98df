//! Performance benchmarks for rs-newspaper.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic article for the parse and nlp stages
//! - Local HTML files, when present, for realistic page sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_newspaper::{Article, Components, Configuration};
use std::fs;

const ARTICLE_URL: &str = "https://example.com/2024/02/14/sample-article";

const SAMPLE_HTML: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sample Article | Example News</title>
    <meta name="author" content="John Doe">
    <meta name="description" content="A sample article for benchmarking.">
    <meta name="keywords" content="sample, benchmark">
</head>
<body>
    <nav>
        <a href="/">Home</a>
        <a href="/about">About</a>
    </nav>
    <div class="story">
        <h1>Sample Article Title</h1>
        <p class="byline">By John Doe</p>
        <p>This is the first paragraph of the article. It contains some meaningful
        content that should be picked out as the body of the page by the extractor.</p>
        <p>Here is a second paragraph with more content. The extraction should
        preserve the text while removing navigation and other boilerplate.</p>
        <p>A third paragraph ensures we have enough content for meaningful
        benchmarking of the parse stage and of the summary that follows it.</p>
    </div>
    <aside>
        <h3>Related Articles</h3>
        <ul>
            <li>Related article 1</li>
            <li>Related article 2</li>
        </ul>
    </aside>
    <footer>
        <p>Copyright 2024</p>
    </footer>
</body>
</html>
"#;

fn config() -> Configuration {
    Configuration {
        fetch_images: false,
        ..Configuration::default()
    }
}

fn parse(html: &str, config: &Configuration, components: &Components, nlp: bool) {
    let Ok(mut article) = Article::builder(ARTICLE_URL)
        .config(config.clone())
        .components(components.clone())
        .build()
    else {
        return;
    };
    article.set_html(html);
    let _ = article.parse();
    if nlp {
        let _ = article.nlp();
    }
    black_box(article.text().len());
}

fn bench_parse(c: &mut Criterion) {
    let config = config();
    let Ok(components) = Components::from_config(&config) else {
        return;
    };

    c.bench_function("parse", |b| {
        b.iter(|| parse(black_box(SAMPLE_HTML), &config, &components, false));
    });
}

fn bench_parse_and_nlp(c: &mut Criterion) {
    let config = config();
    let Ok(components) = Components::from_config(&config) else {
        return;
    };

    c.bench_function("parse_and_nlp", |b| {
        b.iter(|| parse(black_box(SAMPLE_HTML), &config, &components, true));
    });
}

/// Benchmark with real-world HTML files of varying sizes
fn bench_real_world_html(c: &mut Criterion) {
    let html_dir = "../data/html_files";
    let sample_files = ["0001.html", "0010.html", "0100.html"];

    let config = config();
    let Ok(components) = Components::from_config(&config) else {
        return;
    };
    let mut group = c.benchmark_group("real_world");

    for filename in &sample_files {
        let path = format!("{html_dir}/{filename}");
        if let Ok(html) = fs::read_to_string(&path) {
            let size_kb = html.len() / 1024;
            group.throughput(Throughput::Bytes(html.len() as u64));
            group.bench_with_input(
                BenchmarkId::new("parse", format!("{filename} ({size_kb}KB)")),
                &html,
                |b, html| {
                    b.iter(|| parse(black_box(html), &config, &components, true));
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_parse_and_nlp, bench_real_world_html);
criterion_main!(benches);
