#![allow(dead_code)] // not every test binary uses every helper

use cipherbreak::analysis::FrequencyAnalyzer;
use cipherbreak::scorer::NgramScorer;

/// A plain English passage long enough for statistical tests (~600 letters).
pub const PASSAGE: &str = "THEREWASNOPOSSIBILITYOFTAKINGAWALKTHATDAYWEHADBEEN\
WANDERINGINDEEDINTHELEAFLESSSHRUBBERYANHOURINTHEMORNINGBUTSINCEDINNERTHECOLD\
WINTERWINDHADBROUGHTWITHITCLOUDSSODARKANDARAINSOPENETRATINGTHATFURTHEROUTDOOR\
EXERCISEWASNOWOUTOFTHEQUESTIONIWASGLADOFITINEVERLIKEDLONGWALKSESPECIALLYON\
CHILLYAFTERNOONSDREADFULTOMEWASTHECOMINGHOMEINTHERAWTWILIGHTWITHNIPPEDFINGERS\
ANDTOESANDAHEARTSADDENEDBYTHECHIDINGSOFBESSIETHENURSEANDHUMBLEDBYTHE\
CONSCIOUSNESSOFMYPHYSICALINFERIORITYTOELIZAJOHNANDGEORGIANAREEDTHESAIDELIZA\
JOHNANDGEORGIANAWERENOWCLUSTEREDROUNDTHEIRMAMAINTHEDRAWINGROOM";

/// Scorer whose quadgram table is built from the given text's own counts.
pub fn scorer_from_text(text: &str, n: usize) -> NgramScorer {
    let analyzer = FrequencyAnalyzer::with_english();
    let records: Vec<(String, u64)> = analyzer.ngram_counts(text, n).into_iter().collect();
    NgramScorer::new(&records, n).expect("corpus from text")
}
