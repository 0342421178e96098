//! Benchmarks for segmentation and line packing

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use titlecard_core::Fixed;
use titlecard_text::{PhraseSegmenter, SegmentationLevel, Segmenter, pack_lines};

fn samples() -> Vec<(&'static str, String)> {
    vec![
        ("short_latin", "Hello, World!".to_string()),
        (
            "sentence_latin",
            "The quick brown fox jumps over the lazy dog".to_string(),
        ),
        ("long_latin", "Lorem ipsum dolor sit amet. ".repeat(20)),
        (
            "sentence_japanese",
            "吾輩は猫である。名前はまだ無い。".to_string(),
        ),
        (
            "long_japanese",
            "どこで生れたかとんと見当がつかぬ。".repeat(10),
        ),
    ]
}

fn bench_segment(c: &mut Criterion) {
    let segmenter = PhraseSegmenter::new();
    let mut group = c.benchmark_group("segment");

    for (name, text) in samples() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| black_box(segmenter.segment(black_box(&text))));
        });
    }

    group.finish();
}

fn bench_segment_levels(c: &mut Criterion) {
    let segmenter = PhraseSegmenter::new();
    let mut group = c.benchmark_group("segment_levels");
    let text = "Supercalifragilisticexpialidocious Rustで書くCLIツール入門";

    for level in [
        SegmentationLevel::Default,
        SegmentationLevel::Fine,
        SegmentationLevel::UltraFine,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(level), &level, |b, &level| {
            b.iter(|| black_box(segmenter.segment_with_level(text, level)));
        });
    }

    group.finish();
}

fn bench_pack(c: &mut Criterion) {
    let segmenter = PhraseSegmenter::new();
    let mut group = c.benchmark_group("pack_lines");
    let text = "Lorem ipsum dolor sit amet. ".repeat(20);
    let segments = segmenter.segment(&text);
    // Twelve pixels per char keeps measurement out of the picture.
    let measure = |s: &str| Fixed::from_px(12 * s.chars().count() as i32);

    for width in [120, 480, 946, 2000] {
        group.bench_with_input(BenchmarkId::from_parameter(width), &width, |b, &width| {
            b.iter(|| black_box(pack_lines(&segments, Fixed::from_px(width), measure)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_segment, bench_segment_levels, bench_pack);
criterion_main!(benches);
