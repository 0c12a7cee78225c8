//! Benchmarks for answer matching and scoring.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use essay_core::config::{KeywordGroup, KeywordOptions, TaskConfig};
use essay_matching::{are_similar, detect_fuzzy, levenshtein, Delimiters, Scorer};

const SAMPLE_ANSWER: &str = "Plants use fotosynthesis to turn light into chemical energy. \
The chlorophyl in their leaves absorbs sunlight, and the energy is stored as glucose. \
Oxygen is released as a by-product, while carbon dioxide is taken up from the air.";

fn biology_task(forgive_mistakes: bool) -> TaskConfig {
    let options = KeywordOptions {
        forgive_mistakes,
        case_sensitive: false,
        occurrences: 3,
        ..KeywordOptions::default()
    };
    let groups = [
        ("photosynthesis", vec!["photo*"]),
        ("chlorophyll", vec!["/chloro[a-z]+/"]),
        ("glucose", vec!["sugar"]),
        ("carbon dioxide", vec!["CO2"]),
        ("oxygen", vec![]),
    ];

    TaskConfig {
        keywords: groups
            .into_iter()
            .map(|(keyword, alternatives)| {
                KeywordGroup::new(keyword)
                    .with_alternatives(alternatives)
                    .with_options(options.clone())
            })
            .collect(),
        ..TaskConfig::default()
    }
}

fn bench_similarity(c: &mut Criterion) {
    c.bench_function("levenshtein_swapping", |b| {
        b.iter(|| levenshtein(black_box("photosynthesis"), black_box("fotosynthesis"), true))
    });

    c.bench_function("are_similar", |b| {
        b.iter(|| are_similar(black_box("chlorophyll"), black_box("chlorophyl")))
    });
}

fn bench_fuzzy_detection(c: &mut Criterion) {
    let delimiters = Delimiters::default();
    let mut group = c.benchmark_group("fuzzy_detection");

    for repeat in [1, 4, 16].iter() {
        let haystack = SAMPLE_ANSWER.repeat(*repeat);
        group.bench_with_input(BenchmarkId::new("photosynthesis", repeat), repeat, |b, _| {
            b.iter(|| detect_fuzzy(black_box("photosynthesis"), black_box(&haystack), &delimiters))
        });
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for forgive in [false, true] {
        let scorer = Scorer::new(&biology_task(forgive)).expect("benchmark task is valid");
        let name = if forgive { "forgiving" } else { "strict" };
        group.bench_function(name, |b| b.iter(|| scorer.evaluate(black_box(SAMPLE_ANSWER))));
    }

    group.finish();
}

criterion_group!(benches, bench_similarity, bench_fuzzy_detection, bench_evaluate);
criterion_main!(benches);
