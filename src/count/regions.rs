//! Region validity and disjunct marking for conjunction handling.
//!
//! Fat-linkage dictionaries need to know, before counting, which disjuncts
//! can participate in *some* valid linkage when arbitrary unconnected word
//! ranges are treated as deletable gaps. [`mark_valid_disjuncts`] answers
//! that with a double recursion shaped exactly like the counter: first a
//! memoized validity query over ranges, then a marking walk that only
//! descends into decompositions the validity pass admitted.
//!
//! The memo reuses the count-table layout with a three-value domain:
//! 0 the range cannot be completed, 1 it can, 2 it can and its
//! decompositions have already been marked.

use crate::base::{ConnectorId, DisjunctId, LEFT_WALL, WordPos};
use crate::fastmatch::MatchIndex;
use crate::matcher::do_match;
use crate::memo::{Table, TableKey};
use crate::sentence::Sentence;

use super::CountContext;

const INVALID: i64 = 0;
const VALID: i64 = 1;
const MARKED: i64 = 2;

/// Mark every disjunct of `sent` that participates in some valid linkage
/// with gaps allowed. Returns how many disjuncts ended up marked.
///
/// Clears all previous marks first. `index` must be built from `sent`.
pub fn mark_valid_disjuncts(
    sent: &mut Sentence,
    index: &MatchIndex,
    ctx: &mut CountContext,
) -> usize {
    sent.clear_marks();
    let len = sent.len() as WordPos;
    let mut marker = RegionMarker {
        table: Table::new(sent.len()),
        sent,
        index,
        ctx,
    };
    if marker.region_valid(LEFT_WALL, len, None, None) {
        marker.mark_region(LEFT_WALL, len, None, None);
    }
    let marked = marker.sent.marked_disjuncts().len();
    tracing::debug!(marked, "region marking complete");
    marked
}

struct RegionMarker<'a> {
    table: Table,
    sent: &'a mut Sentence,
    index: &'a MatchIndex,
    ctx: &'a mut CountContext,
}

impl RegionMarker<'_> {
    /// Can the open range `(lw, rw)` consume both boundary connectors in
    /// some linkage, with unconnected sub-ranges deleted as gaps?
    fn region_valid(
        &mut self,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
    ) -> bool {
        debug_assert!(lw < rw);
        let key = TableKey::new(lw, rw, le, re, 0);
        let (slot, existed) = self.table.find_or_reserve(key);
        if existed {
            return self.table.count_at(slot) != INVALID;
        }

        if le.is_none() && re.is_none() {
            // A range with nothing pending is a deletable gap: always fine.
            self.table.set_count(slot, VALID);
            return true;
        }

        let start_word = match le {
            Some(c) => self.sent.connector(c).word,
            None => lw + 1,
        };
        let end_word = match re {
            Some(c) => self.sent.connector(c).word + 1,
            None => rw,
        };

        let mut found = false;
        'words: for w in start_word..end_word {
            let ml = self
                .ctx
                .pool
                .form_match_list(self.index, self.sent, w as usize, le, re);
            let candidates = self.ctx.pool.list(&ml).len();
            for i in 0..candidates {
                let d_id = self.ctx.pool.list(&ml)[i];
                if self.split_usable(d_id, lw, rw, le, re, w).is_some() {
                    found = true;
                    self.ctx.pool.put_match_list(ml);
                    break 'words;
                }
            }
            self.ctx.pool.put_match_list(ml);
        }

        self.table.set_count(slot, if found { VALID } else { INVALID });
        found
    }

    /// How a candidate disjunct at split `w` can complete the range, if at
    /// all: (left pair engaged, right pair engaged, right extension, left
    /// extension).
    fn split_usable(
        &mut self,
        d_id: DisjunctId,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
        w: WordPos,
    ) -> Option<(bool, bool, bool, bool)> {
        let (d_left, d_right) = {
            let d = self.sent.disjunct(d_id);
            (d.left, d.right)
        };

        let lpair = match (le, d_left) {
            (Some(a), Some(b))
                if do_match(self.sent.connector(a), self.sent.connector(b), lw, w) =>
            {
                Some((a, b))
            }
            _ => None,
        };
        let rpair = match (d_right, re) {
            (Some(a), Some(b))
                if do_match(self.sent.connector(a), self.sent.connector(b), w, rw) =>
            {
                Some((a, b))
            }
            _ => None,
        };

        let left_ok = match lpair {
            Some((a, b)) => self.pair_valid(lw, w, a, b),
            None => false,
        };
        let right_ok = match rpair {
            Some((a, b)) => self.pair_valid(w, rw, a, b),
            None => false,
        };

        let use_both = left_ok && right_ok;
        let use_left = left_ok && self.region_valid(w, rw, d_right, re);
        // Right-side-only engagement exists only at the left wall, exactly
        // as in the counter.
        let use_right = le.is_none() && right_ok && self.region_valid(lw, w, le, d_left);

        (use_both || use_left || use_right).then_some((left_ok, right_ok, use_left, use_right))
    }

    /// Is any variant of the linked pair `x`/`y` completable over `(a, b)`?
    /// Multi connectors stay in play after linking, so each multi side
    /// doubles the variants.
    fn pair_valid(&mut self, a: WordPos, b: WordPos, x: ConnectorId, y: ConnectorId) -> bool {
        let (x_next, x_multi) = {
            let c = self.sent.connector(x);
            (c.next, c.multi)
        };
        let (y_next, y_multi) = {
            let c = self.sent.connector(y);
            (c.next, c.multi)
        };

        self.region_valid(a, b, x_next, y_next)
            || (x_multi && self.region_valid(a, b, Some(x), y_next))
            || (y_multi && self.region_valid(a, b, x_next, Some(y)))
            || (x_multi && y_multi && self.region_valid(a, b, Some(x), Some(y)))
    }

    /// Mark every disjunct used by some valid decomposition of the range.
    /// The range must already have been validated.
    fn mark_region(
        &mut self,
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
    ) {
        let key = TableKey::new(lw, rw, le, re, 0);
        let (slot, existed) = self.table.find_or_reserve(key);
        debug_assert!(existed, "mark_region runs after validation");
        if self.table.count_at(slot) == MARKED {
            return;
        }
        self.table.set_count(slot, MARKED);

        if le.is_none() && re.is_none() {
            self.mark_gap_components(lw, rw);
            return;
        }

        let start_word = match le {
            Some(c) => self.sent.connector(c).word,
            None => lw + 1,
        };
        let end_word = match re {
            Some(c) => self.sent.connector(c).word + 1,
            None => rw,
        };

        for w in start_word..end_word {
            let ml = self
                .ctx
                .pool
                .form_match_list(self.index, self.sent, w as usize, le, re);
            let candidates = self.ctx.pool.list(&ml).len();
            for i in 0..candidates {
                let d_id = self.ctx.pool.list(&ml)[i];
                let Some((left_ok, right_ok, use_left, use_right)) =
                    self.split_usable(d_id, lw, rw, le, re, w)
                else {
                    continue;
                };
                let (d_left, d_right) = {
                    let d = self.sent.disjunct(d_id);
                    (d.left, d.right)
                };

                self.sent.mark_disjunct(d_id);
                if left_ok {
                    if let (Some(a), Some(b)) = (le, d_left) {
                        self.mark_pair(lw, w, a, b);
                    }
                }
                if right_ok {
                    if let (Some(a), Some(b)) = (d_right, re) {
                        self.mark_pair(w, rw, a, b);
                    }
                }
                if use_left {
                    self.mark_region(w, rw, d_right, re);
                }
                if use_right {
                    self.mark_region(lw, w, le, d_left);
                }
            }
            self.ctx.pool.put_match_list(ml);
        }
    }

    /// Inside a gap, every word may still anchor a component through a
    /// disjunct with no left requirements; mark those that lead anywhere.
    fn mark_gap_components(&mut self, lw: WordPos, rw: WordPos) {
        for w in lw + 1..rw {
            let word_disjuncts = self.sent.word(w as usize).disjuncts().to_vec();
            for d_id in word_disjuncts {
                let (d_left, d_right) = {
                    let d = self.sent.disjunct(d_id);
                    (d.left, d.right)
                };
                if d_left.is_some() || d_right.is_none() {
                    continue;
                }
                if self.region_valid(w, rw, d_right, None) {
                    self.sent.mark_disjunct(d_id);
                    self.mark_region(w, rw, d_right, None);
                }
            }
        }
    }
}
