use cipherbreak::analysis::FrequencyAnalyzer;
use cipherbreak::key::SubstitutionKey;
use cipherbreak::scorer::NgramScorer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const SAMPLE: &str = "THEREWASNOPOSSIBILITYOFTAKINGAWALKTHATDAYWEHADBEEN\
WANDERINGINDEEDINTHELEAFLESSSHRUBBERYANHOURINTHEMORNINGBUTSINCEDINNERTHECOLD\
WINTERWINDHADBROUGHTWITHITCLOUDSSODARKANDARAINSOPENETRATINGTHATFURTHEROUTDOOR\
EXERCISEWASNOWOUTOFTHEQUESTIONIWASGLADOFITINEVERLIKEDLONGWALKSESPECIALLYON\
CHILLYAFTERNOONSDREADFULTOMEWASTHECOMINGHOMEINTHERAWTWILIGHTWITHNIPPEDFINGERS\
ANDTOESANDAHEARTSADDENEDBYTHECHIDINGSOFBESSIETHENURSEANDHUMBLEDBYTHE\
CONSCIOUSNESSOFMYPHYSICALINFERIORITYTOELIZAJOHNANDGEORGIANAREEDTHESAIDELIZA\
JOHNANDGEORGIANAWERENOWCLUSTEREDROUNDTHEIRMAMAINTHEDRAWINGROOM";

fn setup_scorer() -> NgramScorer {
    // In-memory quadgram table built from the sample's own counts.
    let analyzer = FrequencyAnalyzer::with_english();
    let records: Vec<(String, u64)> = analyzer.ngram_counts(SAMPLE, 4).into_iter().collect();
    NgramScorer::new(&records, 4).expect("failed to build scorer")
}

fn criterion_benchmark(c: &mut Criterion) {
    let scorer = setup_scorer();
    // A text long enough to show the per-window cost (~1000 chars).
    let text: String = SAMPLE.chars().cycle().take(1000).collect();

    c.bench_function("score_quadgrams (1k chars)", |b| {
        b.iter(|| scorer.score(black_box(&text)))
    });

    let analyzer = FrequencyAnalyzer::with_english();
    c.bench_function("chi_squared (1k chars)", |b| {
        b.iter(|| analyzer.chi_squared(black_box(&text)))
    });

    let mut rng = fastrand::Rng::with_seed(7);
    let key = SubstitutionKey::random(&mut rng);
    c.bench_function("decrypt_then_score (1k chars)", |b| {
        b.iter(|| {
            let plain = key.decrypt(black_box(&text));
            scorer.score(&plain)
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
