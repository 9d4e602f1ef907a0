//! Benchmarks for break scanning, emoji runs, and line layout.
//!
//! Run with: cargo bench -p tessel-text

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use tessel_text::{
    BreakOptions, EmojiIter, LayoutParams, WhiteSpace, break_opportunities,
    break_opportunities_into, layout_line, split_paragraph,
};

// =============================================================================
// Test Data
// =============================================================================

fn cycle(pattern: &str, len: usize) -> Vec<u32> {
    pattern.chars().cycle().take(len).map(u32::from).collect()
}

/// ASCII prose
fn ascii_text(len: usize) -> Vec<u32> {
    cycle("The quick brown fox jumps over the lazy dog. ", len)
}

/// CJK text with ideographic punctuation
fn cjk_text(len: usize) -> Vec<u32> {
    cycle("\u{4E2D}\u{6587}\u{6D4B}\u{8BD5}\u{FF0C}\u{6587}\u{672C}\u{3002}", len)
}

/// Emoji sequences mixed with text
fn emoji_text(len: usize) -> Vec<u32> {
    cycle(
        "hi \u{1F44B}\u{1F3FD} \u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467} \u{1F1FA}\u{1F1F8} 1\u{FE0F}\u{20E3} ",
        len,
    )
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_break_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("breaks/scan");
    let options = BreakOptions::new();

    for (name, make) in [
        ("ascii", ascii_text as fn(usize) -> Vec<u32>),
        ("cjk", cjk_text),
        ("emoji", emoji_text),
    ] {
        for len in [100, 1000, 10000] {
            let text = make(len);
            group.throughput(Throughput::Elements(len as u64));
            group.bench_with_input(BenchmarkId::new(name, len), &text, |b, text| {
                b.iter(|| black_box(break_opportunities(text, &options)))
            });
        }
    }

    group.finish();
}

fn bench_break_scan_reuse(c: &mut Criterion) {
    let mut group = c.benchmark_group("breaks/reuse");
    let options = BreakOptions::new();
    let text = ascii_text(1000);

    group.bench_function("fresh", |b| {
        b.iter(|| black_box(break_opportunities(&text, &options)))
    });
    group.bench_function("into", |b| {
        let mut out = Vec::new();
        b.iter(|| {
            let _ = break_opportunities_into(&text, &options, &mut out);
            black_box(out.len())
        })
    });

    group.finish();
}

fn bench_emoji_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("emoji/runs");

    for len in [100, 1000] {
        let text = emoji_text(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &text, |b, text| {
            b.iter(|| black_box(EmojiIter::new(text).count()))
        });
    }

    group.finish();
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/paragraph");

    for width in [20, 80, 200] {
        let text = ascii_text(2000);
        let Ok(bos) = break_opportunities(&text, &BreakOptions::new()) else {
            continue;
        };
        let params = LayoutParams::new().max_extent(width);
        group.bench_with_input(BenchmarkId::from_parameter(width), &text, |b, text| {
            b.iter(|| {
                let mut pos = 0;
                let mut lines = 0;
                while pos < text.len() {
                    let Ok(line) = layout_line(&text[pos..], &bos[pos..], &params) else {
                        break;
                    };
                    pos += line.consumed;
                    lines += 1;
                }
                black_box(lines)
            })
        });
    }

    group.finish();
}

fn bench_split_paragraph(c: &mut Criterion) {
    let mut group = c.benchmark_group("paragraph/split");
    let bytes: Vec<u8> = "Some  text\twith   runs of white space.\n"
        .repeat(100)
        .into_bytes();

    for ws in [WhiteSpace::Normal, WhiteSpace::Pre] {
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(ws.as_str()), &bytes, |b, bytes| {
            b.iter(|| {
                let mut rest = bytes.as_slice();
                while let Ok(para) = split_paragraph(rest, ws) {
                    rest = &rest[para.consumed..];
                }
                black_box(rest.len())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_break_scan,
    bench_break_scan_reuse,
    bench_emoji_runs,
    bench_layout,
    bench_split_paragraph
);
criterion_main!(benches);
