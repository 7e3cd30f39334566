//! # linkgram
//!
//! Core counting engine for link-grammar parsing.
//!
//! Given a sentence whose words already carry candidate *disjuncts* (lists
//! of left- and right-pointing *connectors* that links must satisfy), this
//! crate computes how many planar, projective linkages exist at each
//! null-word budget. It produces counts only: tokenization, dictionary
//! expansion, pruning, and linkage extraction live upstream and downstream.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! count     → do_count recursion, pseudocount pruning, do_parse driver
//!   ↓
//! memo      → chained-hash count table keyed by range + boundary identity
//!   ↓
//! fastmatch → per-word per-label match-list index, re-entrant list pool
//!   ↓
//! matcher   → do_match / easy_match connector predicates
//!   ↓
//! sentence  → word/disjunct/connector arenas, label interner, builder
//!   ↓
//! base      → index newtypes, word positions, left-wall sentinel
//! ```
//!
//! ## Counting at a glance
//!
//! ```
//! use linkgram::{CountContext, MatchIndex, ParseOptions, SentenceBuilder, do_parse};
//!
//! let mut b = SentenceBuilder::new();
//! let the = b.word("the");
//! let cat = b.word("cat");
//! let ran = b.word("ran");
//! b.disjunct(the, "D+").unwrap();
//! b.disjunct(cat, "D- & S+").unwrap();
//! b.disjunct(ran, "S-").unwrap();
//! let sent = b.finish();
//!
//! let index = MatchIndex::build(&sent);
//! let mut ctx = CountContext::new(sent.len());
//! ctx.init_table(sent.len());
//! let count = do_parse(&sent, &index, &mut ctx, 0, &ParseOptions::new());
//! assert_eq!(count, 1);
//! ```

// ============================================================================
// MODULES (dependency order: base → sentence → matcher → fastmatch → memo →
// count)
// ============================================================================

/// Foundation types: index newtypes, word positions
pub mod base;

/// Sentence data model: arenas, label interner, builder, notation
pub mod sentence;

/// Connector match predicates
pub mod matcher;

/// Match-list index and pool
pub mod fastmatch;

/// Memo table for range counts
pub mod memo;

/// Counting recursion and driver
pub mod count;

// Re-export the working surface
pub use base::{ConnectorId, DisjunctId, LEFT_WALL, LabelId, WordPos};
pub use count::{
    CountContext, PARSE_NUM_OVERFLOW, ParseOptions, RESOURCE_POLL_INTERVAL, ResourceBudget,
    SATURATED_COUNT, do_parse, parse_minimal_nulls,
};
#[cfg(feature = "conjunctions")]
pub use count::mark_valid_disjuncts;
pub use fastmatch::{MatchIndex, MatchList, MatchListPool};
pub use matcher::{do_match, easy_match};
pub use sentence::{
    BuildError, Connector, ConnectorSpec, Disjunct, Priority, Sentence, SentenceBuilder,
    UNLIMITED_LEN, Word,
};
