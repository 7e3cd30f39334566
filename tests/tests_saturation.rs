//! Saturation behavior on combinatorially explosive sentences.
//!
//! The fixture is a row of word pairs. Pair `i` can link through eight
//! interchangeable labels of its own (no label is shared across pairs), so
//! a sentence of `p` pairs has exactly `8^p` linkages once every pair is
//! linked: the leftmost pair rides the wall slot and each further pair is
//! an island costing one null unit, hence `p - 1` nulls.

use once_cell::sync::Lazy;

use linkgram::{
    CountContext, MatchIndex, PARSE_NUM_OVERFLOW, ParseOptions, SATURATED_COUNT, Sentence,
    SentenceBuilder, do_parse,
};

const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOP";
const VARIANTS: usize = 8;

fn pair_row(pairs: usize) -> Sentence {
    let mut b = SentenceBuilder::new();
    for i in 0..pairs {
        let lhs = b.word(&format!("l{i}"));
        let rhs = b.word(&format!("r{i}"));
        for k in 0..VARIANTS {
            let label = format!("{}{}", LETTERS[i] as char, LETTERS[k] as char);
            b.disjunct(lhs, &format!("{label}+")).unwrap();
            b.disjunct(rhs, &format!("{label}-")).unwrap();
        }
    }
    b.finish()
}

fn count_pairs(sent: &Sentence, pairs: usize) -> i64 {
    let index = MatchIndex::build(sent);
    let mut ctx = CountContext::new(sent.len());
    ctx.init_table(sent.len());
    let opts = ParseOptions {
        islands_ok: true,
        ..ParseOptions::new()
    };
    do_parse(sent, &index, &mut ctx, pairs as i32 - 1, &opts)
}

static ELEVEN_PAIRS: Lazy<Sentence> = Lazy::new(|| pair_row(11));

#[test]
fn test_exact_count_above_overflow_threshold() {
    // 8^8 = 2^24 linkages: right at the downstream enumeration threshold,
    // still far from saturation, and counted exactly.
    let sent = pair_row(8);
    let count = count_pairs(&sent, 8);
    assert_eq!(count, PARSE_NUM_OVERFLOW);
    assert!(count < SATURATED_COUNT);
}

#[test]
fn test_count_saturates_instead_of_overflowing() {
    // 8^11 = 2^33 exceeds the sentinel.
    let count = count_pairs(&ELEVEN_PAIRS, 11);
    assert_eq!(count, SATURATED_COUNT);
}

#[test]
fn test_saturation_is_closed_under_more_disjuncts() {
    let saturated = count_pairs(&ELEVEN_PAIRS, 11);
    assert_eq!(saturated, SATURATED_COUNT);

    // A superset of disjuncts can only have more linkages.
    let bigger = pair_row(12);
    assert_eq!(count_pairs(&bigger, 12), SATURATED_COUNT);
}

#[test]
fn test_sentinels_are_distinct() {
    assert_eq!(SATURATED_COUNT, i64::from(i32::MAX));
    assert_eq!(PARSE_NUM_OVERFLOW, 1 << 24);
    assert!(PARSE_NUM_OVERFLOW < SATURATED_COUNT);
}

#[test]
fn test_growth_up_to_the_sentinel() {
    // 8^p grows exactly until it crosses the sentinel.
    assert_eq!(count_pairs(&pair_row(2), 2), 64);
    assert_eq!(count_pairs(&pair_row(3), 3), 512);
    assert_eq!(count_pairs(&pair_row(10), 10), 8i64.pow(10));
    assert!(8i64.pow(10) < SATURATED_COUNT);
}
