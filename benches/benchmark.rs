use criterion::{criterion_group, criterion_main, Criterion};
use tfidf_ranker::{Corpus, Pipeline, Tokenizer};

const WORDS: &[&str] = &[
    "wing", "flow", "boundary", "layer", "supersonic", "pressure", "heat", "transfer",
    "laminar", "turbulent", "shock", "wave", "drag", "lift", "mach", "number",
    "nozzle", "jet", "plate", "cylinder", "cone", "body", "viscous", "inviscid",
];

// 決定的な擬似乱数 (xorshift) で合成コーパスを作る
fn synthetic_texts(count: usize, len: usize, seed: u64) -> Vec<String> {
    let mut state = seed;
    (0..count)
        .map(|_| {
            (0..len)
                .map(|_| {
                    state ^= state << 13;
                    state ^= state >> 7;
                    state ^= state << 17;
                    WORDS[(state % WORDS.len() as u64) as usize]
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn pipeline_benchmark(c: &mut Criterion) {
    let tokenizer = Tokenizer::default();
    let queries = Corpus::from_texts(synthetic_texts(50, 8, 0x9e37_79b9), &tokenizer);
    let documents = Corpus::from_texts(synthetic_texts(500, 120, 0x7f4a_7c15), &tokenizer);

    c.bench_function("pipeline_50x500", |b| {
        b.iter(|| {
            let pipeline = Pipeline::run(queries.clone(), documents.clone());
            pipeline.ranking()
        })
    });

    c.bench_function("tokenize_document", |b| {
        let text = synthetic_texts(1, 2_000, 42).remove(0);
        b.iter(|| tokenizer.tokenize(&text))
    });
}

criterion_group!(benches, pipeline_benchmark);
criterion_main!(benches);
