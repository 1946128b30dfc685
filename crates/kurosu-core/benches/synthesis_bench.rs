//! # Synthesis Benchmarks
//!
//! Performance benchmarks for kurosu-core grid synthesis.
//!
//! Run with: `cargo bench -p kurosu-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use kurosu_core::{CandidateWord, PlacementEngine, SynthesisConfig, Synthesizer, normalize};
use std::hint::black_box;

/// Katakana vocabulary large enough to fill mid-size grids.
const VOCAB: &[&str] = &[
    "サクラ", "トマト", "カラス", "スイカ", "ネコ", "コト", "トリ", "リス", "ラクダ", "ダンス",
    "スシ", "シカ", "カニ", "ニワトリ", "リンゴ", "ゴリラ", "ラジオ", "オカネ", "ネズミ",
    "ミカン", "コーヒー", "ヒマワリ", "リンク", "クルマ", "マクラ", "ラーメン", "ンジャメナ",
    "ナミダ", "ダイコン", "コンロ", "ロケット", "トケイ", "イチゴ", "ゴハン", "ハナビ",
    "ビール", "ルスバン", "バンゴハン", "ハサミ", "ミソシル",
];

fn candidate_list(count: usize) -> Vec<CandidateWord> {
    VOCAB
        .iter()
        .cycle()
        .take(count)
        .enumerate()
        .map(|(i, w)| CandidateWord::new(*w, format!("clue {i}")))
        .collect()
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_synthesize(c: &mut Criterion) {
    let mut group = c.benchmark_group("synthesize");

    for size in [7, 9, 13].iter() {
        let candidates = candidate_list(40);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let config = SynthesisConfig::new(size).with_seed(42);
            b.iter(|| black_box(Synthesizer::synthesize(&candidates, &config)));
        });
    }

    group.finish();
}

fn bench_find_placements(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_placements");

    // A partially filled grid is the realistic workload: every call
    // during the main pass scans the letters placed so far.
    let candidates = candidate_list(40);
    let config = SynthesisConfig::new(13).with_seed(7);
    let result = Synthesizer::synthesize(&candidates, &config).expect("synthesize");
    let grid = result.grid;

    for word in ["ネコ", "ニワトリ", "ミソシル"].iter() {
        let graphemes = normalize(word);
        group.bench_with_input(BenchmarkId::from_parameter(word), &graphemes, |b, g| {
            b.iter(|| black_box(PlacementEngine::find_placements(&grid, g, true)));
        });
    }

    group.finish();
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_mixed_script", |b| {
        let input = "ねこのニュースがabc123ちっちゃいキャットを報じた";
        b.iter(|| black_box(normalize(input)));
    });
}

criterion_group!(benches, bench_synthesize, bench_find_placements, bench_normalize);

criterion_main!(benches);
