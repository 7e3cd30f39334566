//! The counting recursion and its driver.
//!
//! [`do_parse`] counts the linkages of a sentence at one null-word budget by
//! seeding the `do_count` recursion with the whole-sentence range. `do_count`
//! decomposes an open range `(lw, rw)` with boundary connectors `le`/`re`
//! over every candidate split word and every partition of the null budget,
//! memoizing every subproblem in the count table.
//!
//! Two things keep the recursion tractable:
//!
//! - The match list restricts split candidates to disjuncts whose boundary
//!   labels could engage `le` or `re` at all.
//! - Before expanding a split for real, a *pseudocount* pass asks the memo
//!   whether any factor of the split is already known to be zero. A zero
//!   pseudototal proves the real total is zero, and the branch is skipped
//!   without recursing.
//!
//! Counts saturate at [`SATURATED_COUNT`] instead of overflowing; resource
//! exhaustion freezes fresh subproblems at zero, turning the result into a
//! lower bound (see [`CountContext::is_exhausted`]).

mod options;
#[cfg(feature = "conjunctions")]
mod regions;

pub use options::{ParseOptions, ResourceBudget};
#[cfg(feature = "conjunctions")]
pub use regions::mark_valid_disjuncts;

use crate::base::{ConnectorId, LEFT_WALL, WordPos};
use crate::fastmatch::{MatchIndex, MatchList, MatchListPool};
use crate::matcher::do_match;
use crate::memo::{Table, TableKey};
use crate::sentence::Sentence;

/// Counts saturate here instead of overflowing. A returned
/// `SATURATED_COUNT` means "at least this many".
pub const SATURATED_COUNT: i64 = i32::MAX as i64;

/// Threshold above which downstream linkage extraction refuses to
/// enumerate. Distinct from saturation: a count may exceed this and still
/// be exact.
pub const PARSE_NUM_OVERFLOW: i64 = 1 << 24;

/// Memo reservations between two polls of the resource budget.
pub const RESOURCE_POLL_INTERVAL: u64 = 450_000;

/// Reusable counting state: the memo table and the match-list pool.
///
/// A context lives across sentences; call [`CountContext::init_table`] once
/// per sentence before the first [`do_parse`] on it. The table is shared by
/// all null levels of that sentence, since the null budget is part of every
/// memo key.
#[derive(Debug)]
pub struct CountContext {
    pub(crate) table: Table,
    pub(crate) pool: MatchListPool,
    checktimer: u64,
    exhausted: bool,
}

impl CountContext {
    pub fn new(sentence_len_hint: usize) -> Self {
        Self {
            table: Table::new(sentence_len_hint),
            pool: MatchListPool::new(),
            checktimer: 0,
            exhausted: false,
        }
    }

    /// Tear down memo state from a previous sentence and resize for a new
    /// one.
    pub fn init_table(&mut self, sentence_len: usize) {
        self.table.init(sentence_len);
    }

    /// Did the last parse run out of resource budget? If so, its count is a
    /// lower bound rather than exact.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Live memo entries, for diagnostics.
    pub fn memo_len(&self) -> usize {
        self.table.len()
    }
}

/// Count the linkages of `sent` that leave exactly `null_count` words (or
/// null blocks) unlinked.
///
/// `index` must be built from `sent`, and [`CountContext::init_table`] must
/// have been called for `sent` since the context last saw a different
/// sentence. Panics on contract violations (`null_block < 1`, negative
/// `null_count`); saturation and exhaustion are ordinary return values.
pub fn do_parse(
    sent: &Sentence,
    index: &MatchIndex,
    ctx: &mut CountContext,
    null_count: i32,
    opts: &ParseOptions,
) -> i64 {
    assert!(opts.null_block >= 1, "null_block must be at least 1");
    assert!(null_count >= 0, "null budgets are non-negative");

    ctx.checktimer = 0;
    ctx.exhausted = false;

    let mut counter = Counter {
        sent,
        index,
        ctx,
        islands_ok: opts.islands_ok,
        null_block: opts.null_block,
        resources: opts.resources,
    };

    // The budget gets one extra unit: the virtual null slot the left wall
    // occupies at position -1.
    let total = counter.do_count(LEFT_WALL, sent.len() as WordPos, None, None, null_count + 1);
    tracing::debug!(null_count, total, "linkage count complete");
    total
}

/// Find the smallest null level with a nonzero count.
///
/// Initializes the context for `sent`, then tries levels from
/// `opts.min_null_count` through `opts.max_null_count` (clamped to the
/// sentence length), sharing the memo table across levels.
pub fn parse_minimal_nulls(
    sent: &Sentence,
    index: &MatchIndex,
    ctx: &mut CountContext,
    opts: &ParseOptions,
) -> Option<(i32, i64)> {
    ctx.init_table(sent.len());
    let max = opts.max_null_count.min(sent.len() as i32);
    for level in opts.min_null_count..=max {
        let count = do_parse(sent, index, ctx, level, opts);
        if count > 0 {
            tracing::debug!(null_count = level, count, "first parsable null level");
            return Some((level, count));
        }
    }
    None
}

struct Counter<'a> {
    sent: &'a Sentence,
    index: &'a MatchIndex,
    ctx: &'a mut CountContext,
    islands_ok: bool,
    null_block: i32,
    resources: Option<&'a dyn ResourceBudget>,
}

impl Counter<'_> {
    /// Linkage count of the open range `(lw, rw)` that consumes both
    /// boundary connectors and spends exactly `null_count` null units.
    fn do_count(
        &mut self,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
        null_count: i32,
    ) -> i64 {
        debug_assert!(lw < rw);
        if null_count < 0 {
            return 0;
        }

        self.poll_budget();
        let key = TableKey::new(lw, rw, le, re, null_count);
        let (slot, existed) = self.ctx.table.find_or_reserve(key);
        if existed {
            // May be the tentative zero of a frame still on the stack;
            // that is what terminates cyclic descent through multi
            // connectors.
            return self.ctx.table.count_at(slot);
        }
        if self.ctx.exhausted {
            // Out of budget: freeze the fresh subproblem at zero.
            return 0;
        }

        let count = if rw == lw + 1 {
            // No interior words: only the empty linkage fits, and only if
            // nothing is pending.
            i64::from(le.is_none() && re.is_none() && null_count == 0)
        } else if le.is_none() && re.is_none() {
            self.count_unlinked(lw, rw, null_count)
        } else {
            self.count_splits(lw, rw, le, re, null_count)
        };

        let count = count.min(SATURATED_COUNT);
        self.ctx.table.set_count(slot, count);
        count
    }

    /// Both boundaries absent: the interior is unlinked words and islands.
    fn count_unlinked(&mut self, lw: WordPos, rw: WordPos, null_count: i32) -> i64 {
        if !self.islands_ok && lw != LEFT_WALL {
            // No islands: every interior word is null, and the budget must
            // pay for each block of null_block consecutive nulls.
            let blocks = (rw - lw - 1 + self.null_block - 1) / self.null_block;
            return i64::from(null_count == blocks);
        }
        if null_count == 0 {
            // A non-empty range with no boundary connectors cannot be left
            // unlinked for free.
            return 0;
        }

        // Spend one null unit on the first interior word: either it anchors
        // an island through a disjunct with no left requirements, or it is
        // skipped outright.
        let w = lw + 1;
        let sent = self.sent;
        let mut total: i64 = 0;
        for &d in sent.word(w as usize).disjuncts() {
            let disjunct = sent.disjunct(d);
            if disjunct.left.is_none() {
                total = total
                    .saturating_add(self.do_count(w, rw, disjunct.right, None, null_count - 1));
            }
        }
        total.saturating_add(self.do_count(w, rw, None, None, null_count - 1))
    }

    /// General case: decompose over split words and null-budget partitions.
    fn count_splits(
        &mut self,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
        null_count: i32,
    ) -> i64 {
        let sent = self.sent;
        let start_word = match le {
            Some(c) => sent.connector(c).word,
            None => lw + 1,
        };
        let end_word = match re {
            Some(c) => sent.connector(c).word + 1,
            None => rw,
        };

        let mut total: i64 = 0;
        for w in start_word..end_word {
            let ml = self
                .ctx
                .pool
                .form_match_list(self.index, sent, w as usize, le, re);
            let saturated = self.count_at_split(&ml, lw, rw, le, re, null_count, w, &mut total);
            self.ctx.pool.put_match_list(ml);
            if saturated {
                return SATURATED_COUNT;
            }
        }
        total
    }

    /// Accumulate every decomposition at one split word. Returns true once
    /// the running total saturates.
    #[allow(clippy::too_many_arguments)]
    fn count_at_split(
        &mut self,
        ml: &MatchList,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
        null_count: i32,
        w: WordPos,
        total: &mut i64,
    ) -> bool {
        let sent = self.sent;
        let candidates = self.ctx.pool.list(ml).len();

        for i in 0..candidates {
            let d_id = self.ctx.pool.list(ml)[i];
            let d = sent.disjunct(d_id);

            // The boundary pairs this disjunct could engage, if the full
            // match predicate admits them.
            let lpair = match (le, d.left) {
                (Some(a), Some(b)) if do_match(sent.connector(a), sent.connector(b), lw, w) => {
                    Some((a, b))
                }
                _ => None,
            };
            let rpair = match (d.right, re) {
                (Some(a), Some(b)) if do_match(sent.connector(a), sent.connector(b), w, rw) => {
                    Some((a, b))
                }
                _ => None,
            };

            for lcost in 0..=null_count {
                let rcost = null_count - lcost;

                // Cheap pass: a zero pseudototal proves the real total of
                // this decomposition is zero, so it is never expanded.
                let left_pc = match lpair {
                    Some((a, b)) => self.linked_pair(lw, w, a, b, lcost, true),
                    None => 0,
                };
                let right_pc = match rpair {
                    Some((a, b)) => self.linked_pair(w, rw, a, b, rcost, true),
                    None => 0,
                };

                let mut pseudototal = left_pc.saturating_mul(right_pc);
                if left_pc > 0 {
                    pseudototal = pseudototal.saturating_add(
                        left_pc.saturating_mul(self.pseudocount(w, rw, d.right, re, rcost)),
                    );
                }
                if le.is_none() && right_pc > 0 {
                    // Only at the left wall may a disjunct engage from its
                    // right side alone; an interior split always consumes a
                    // pending left boundary. No mirrored term exists.
                    pseudototal = pseudototal.saturating_add(
                        right_pc.saturating_mul(self.pseudocount(lw, w, le, d.left, lcost)),
                    );
                }
                if pseudototal == 0 {
                    continue;
                }

                let left_total = match lpair {
                    Some((a, b)) => self.linked_pair(lw, w, a, b, lcost, false),
                    None => 0,
                };
                let right_total = match rpair {
                    Some((a, b)) => self.linked_pair(w, rw, a, b, rcost, false),
                    None => 0,
                };

                *total = total.saturating_add(left_total.saturating_mul(right_total));
                if left_total > 0 {
                    *total = total.saturating_add(
                        left_total.saturating_mul(self.do_count(w, rw, d.right, re, rcost)),
                    );
                }
                if le.is_none() && right_total > 0 {
                    *total = total.saturating_add(
                        right_total.saturating_mul(self.do_count(lw, w, le, d.left, lcost)),
                    );
                }

                if *total > SATURATED_COUNT {
                    return true;
                }
            }
        }
        false
    }

    /// The four-way aggregation over the linked boundary pair `x`/`y` of
    /// the range `(a, b)`: after the link, a multi connector stays in play
    /// for the inner range, so each multi side doubles the variants.
    fn linked_pair(
        &mut self,
        a: WordPos,
        b: WordPos,
        x: ConnectorId,
        y: ConnectorId,
        cost: i32,
        pseudo: bool,
    ) -> i64 {
        let sent = self.sent;
        let (x_next, x_multi) = {
            let c = sent.connector(x);
            (c.next, c.multi)
        };
        let (y_next, y_multi) = {
            let c = sent.connector(y);
            (c.next, c.multi)
        };

        let mut total = self.eval(a, b, x_next, y_next, cost, pseudo);
        if x_multi {
            total = total.saturating_add(self.eval(a, b, Some(x), y_next, cost, pseudo));
        }
        if y_multi {
            total = total.saturating_add(self.eval(a, b, x_next, Some(y), cost, pseudo));
        }
        if x_multi && y_multi {
            total = total.saturating_add(self.eval(a, b, Some(x), Some(y), cost, pseudo));
        }
        total
    }

    fn eval(
        &mut self,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
        cost: i32,
        pseudo: bool,
    ) -> i64 {
        if pseudo {
            self.pseudocount(lw, rw, le, re, cost)
        } else {
            self.do_count(lw, rw, le, re, cost)
        }
    }

    /// Memo-only oracle: 0 means the subproblem is proven empty, 1 means
    /// unknown or known non-empty.
    fn pseudocount(
        &self,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
        cost: i32,
    ) -> i64 {
        match self.ctx.table.lookup(&TableKey::new(lw, rw, le, re, cost)) {
            Some(0) => 0,
            _ => 1,
        }
    }

    fn poll_budget(&mut self) {
        if self.ctx.checktimer % RESOURCE_POLL_INTERVAL == 0
            && !self.ctx.exhausted
            && self.resources.is_some_and(|r| r.exhausted())
        {
            self.ctx.exhausted = true;
            tracing::debug!("resource budget exhausted; counts from here on are lower bounds");
        }
        self.ctx.checktimer += 1;
    }
}
