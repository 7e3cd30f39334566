//! Null-word accounting: islands, null blocks, budget monotonicity.
//!
//! One convention shows up throughout: the driver grants the recursion one
//! extra null unit for the virtual left wall, and the leftmost component of
//! a linkage attaches through that slot. So a fully null n-word sentence
//! parses at n-1 nulls, and only the leftmost linked component escapes the
//! island rule.

use linkgram::{CountContext, MatchIndex, ParseOptions, Sentence, SentenceBuilder, do_parse};

fn build(words: &[(&str, &[&str])]) -> Sentence {
    let mut b = SentenceBuilder::new();
    for (text, disjuncts) in words {
        let w = b.word(text);
        for d in *disjuncts {
            b.disjunct(w, d).unwrap();
        }
    }
    b.finish()
}

fn count_with(sent: &Sentence, null_count: i32, opts: &ParseOptions) -> i64 {
    let index = MatchIndex::build(sent);
    let mut ctx = CountContext::new(sent.len());
    ctx.init_table(sent.len());
    do_parse(sent, &index, &mut ctx, null_count, opts)
}

#[test]
fn test_exact_null_accounting_without_islands() {
    let sent = build(&[
        ("a", &["S+"]),
        ("x", &[]),
        ("y", &[]),
        ("b", &["S-"]),
    ]);
    let opts = ParseOptions::new();
    assert_eq!(count_with(&sent, 0, &opts), 0);
    assert_eq!(count_with(&sent, 1, &opts), 0);
    // a-b linked over the two interior nulls.
    assert_eq!(count_with(&sent, 2, &opts), 1);
    // Everything null: a rides the wall slot, x/y/b pay three units.
    assert_eq!(count_with(&sent, 3, &opts), 1);
    assert_eq!(count_with(&sent, 4, &opts), 0);
}

#[test]
fn test_null_block_collapses_consecutive_nulls() {
    let sent = build(&[
        ("a", &["S+"]),
        ("x", &[]),
        ("y", &[]),
        ("b", &["S-"]),
    ]);
    let opts = ParseOptions {
        null_block: 2,
        ..ParseOptions::new()
    };
    // x and y collapse into one block under the a-b link.
    assert_eq!(count_with(&sent, 1, &opts), 1);
    // All-null: x/y are one block, b is a second.
    assert_eq!(count_with(&sent, 2, &opts), 1);
    assert_eq!(count_with(&sent, 3, &opts), 0);

    let opts = ParseOptions {
        null_block: 3,
        ..ParseOptions::new()
    };
    // Two linkages land on one unit: the a-b link over the x/y block, and
    // the all-null reading where x/y/b form a single block.
    assert_eq!(count_with(&sent, 1, &opts), 2);
}

#[test]
fn test_second_component_needs_island_permission() {
    // Two linked pairs, disconnected from each other.
    let sent = build(&[
        ("a", &["A+"]),
        ("b", &["A-"]),
        ("c", &["B+"]),
        ("d", &["B-"]),
    ]);
    let islands = ParseOptions {
        islands_ok: true,
        ..ParseOptions::new()
    };
    // The leftmost component rides the wall slot; the c-d island costs one
    // null unit.
    assert_eq!(count_with(&sent, 0, &islands), 0);
    assert_eq!(count_with(&sent, 1, &islands), 1);
    // Two nulls: either pair links while the other pair's words are null.
    assert_eq!(count_with(&sent, 2, &islands), 2);

    // Islands disallowed: c and d may be null, but never a second linked
    // component.
    let no_islands = ParseOptions::new();
    assert_eq!(count_with(&sent, 0, &no_islands), 0);
    assert_eq!(count_with(&sent, 1, &no_islands), 0);
    // a-b linked, c and d plain nulls.
    assert_eq!(count_with(&sent, 2, &no_islands), 1);
}

#[test]
fn test_null_budget_monotone_with_islands() {
    let sent = build(&[("a", &["S+"]), ("b", &["S-"]), ("c", &[])]);
    let opts = ParseOptions {
        islands_ok: true,
        ..ParseOptions::new()
    };
    // Budgets beyond what the words can absorb count zero, so the sweep
    // stays within capacity.
    let mut previous = 0;
    for level in 0..=2 {
        let count = count_with(&sent, level, &opts);
        assert!(
            count >= previous,
            "count {count} at {level} nulls dropped below {previous}"
        );
        previous = count;
    }
}

#[test]
fn test_counts_non_negative_without_islands() {
    let sent = build(&[("a", &["S+"]), ("b", &["S-"]), ("c", &[])]);
    for level in 0..=3 {
        assert!(count_with(&sent, level, &ParseOptions::new()) >= 0);
    }
}

#[test]
fn test_all_null_sentence() {
    let sent = build(&[("a", &[]), ("b", &[]), ("c", &[])]);
    // The wall slot absorbs the first null word.
    assert_eq!(count_with(&sent, 2, &ParseOptions::new()), 1);
    assert_eq!(count_with(&sent, 1, &ParseOptions::new()), 0);
    assert_eq!(count_with(&sent, 3, &ParseOptions::new()), 0);
}

#[test]
#[should_panic(expected = "null_block")]
fn test_zero_null_block_is_a_contract_violation() {
    let sent = build(&[("a", &[])]);
    let opts = ParseOptions {
        null_block: 0,
        ..ParseOptions::new()
    };
    count_with(&sent, 0, &opts);
}
