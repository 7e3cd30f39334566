//! Fast match-list index.
//!
//! Before counting starts, [`MatchIndex::build`] buckets every disjunct of
//! every word by the label of its left chain head and, separately, of its
//! right chain head. During counting, [`MatchListPool::form_match_list`]
//! answers "which disjuncts on the split word could possibly engage either
//! boundary connector" by label lookup alone; the counter re-runs the full
//! [`do_match`](crate::matcher::do_match) on each candidate.
//!
//! The counter holds one open match list per active recursion frame, so
//! lists come from a pool of reusable slots and the handle is move-only: a
//! list stays valid until it is handed back with
//! [`MatchListPool::put_match_list`].

use rustc_hash::FxHashMap;

use crate::base::{ConnectorId, DisjunctId, LabelId};
use crate::sentence::Sentence;

/// Per-word, per-label disjunct buckets. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct MatchIndex {
    left: Vec<FxHashMap<LabelId, Vec<DisjunctId>>>,
    right: Vec<FxHashMap<LabelId, Vec<DisjunctId>>>,
}

impl MatchIndex {
    /// Bucket every disjunct of `sent` by its boundary connector labels.
    pub fn build(sent: &Sentence) -> Self {
        let mut left: Vec<FxHashMap<LabelId, Vec<DisjunctId>>> =
            vec![FxHashMap::default(); sent.len()];
        let mut right: Vec<FxHashMap<LabelId, Vec<DisjunctId>>> =
            vec![FxHashMap::default(); sent.len()];

        for (w, word) in sent.words().iter().enumerate() {
            for &d in word.disjuncts() {
                let disjunct = sent.disjunct(d);
                if let Some(head) = disjunct.left {
                    let label = sent.connector(head).label;
                    left[w].entry(label).or_default().push(d);
                }
                if let Some(head) = disjunct.right {
                    let label = sent.connector(head).label;
                    right[w].entry(label).or_default().push(d);
                }
            }
        }

        Self { left, right }
    }

    fn left_bucket(&self, w: usize, label: LabelId) -> &[DisjunctId] {
        self.left[w].get(&label).map_or(&[], Vec::as_slice)
    }

    fn right_bucket(&self, w: usize, label: LabelId) -> &[DisjunctId] {
        self.right[w].get(&label).map_or(&[], Vec::as_slice)
    }
}

/// Handle to an open match list. Move-only: surrender it with
/// [`MatchListPool::put_match_list`] to recycle the slot.
#[derive(Debug)]
pub struct MatchList {
    slot: usize,
}

/// Pool of reusable match-list slots.
#[derive(Debug, Default)]
pub struct MatchListPool {
    slots: Vec<Vec<DisjunctId>>,
    free: Vec<usize>,
}

impl MatchListPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect the disjuncts on `w` whose left head shares `le`'s label or
    /// whose right head shares `re`'s label. Each disjunct appears once.
    pub fn form_match_list(
        &mut self,
        index: &MatchIndex,
        sent: &Sentence,
        w: usize,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
    ) -> MatchList {
        let slot = match self.free.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Vec::new());
                self.slots.len() - 1
            }
        };
        let list = &mut self.slots[slot];
        list.clear();

        let le_label = le.map(|c| sent.connector(c).label);
        if let Some(label) = le_label {
            list.extend_from_slice(index.left_bucket(w, label));
        }
        if let Some(re) = re {
            let label = sent.connector(re).label;
            for &d in index.right_bucket(w, label) {
                // Skip disjuncts the left rule already admitted.
                let in_left = match (le_label, sent.disjunct(d).left) {
                    (Some(ll), Some(head)) => sent.connector(head).label == ll,
                    _ => false,
                };
                if !in_left {
                    list.push(d);
                }
            }
        }

        MatchList { slot }
    }

    /// Borrow the candidates of an open list.
    pub fn list(&self, ml: &MatchList) -> &[DisjunctId] {
        &self.slots[ml.slot]
    }

    /// Hand a list back for reuse.
    pub fn put_match_list(&mut self, ml: MatchList) {
        self.free.push(ml.slot);
    }

    /// Number of lists currently held open.
    pub fn outstanding(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
