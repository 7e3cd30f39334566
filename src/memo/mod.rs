//! Memo table for range counts.
//!
//! Chained hashing over an entry arena: buckets hold the index of their
//! first entry, entries chain through indices. The table is sized once per
//! sentence as a power of two and never rehashed; long chains are the
//! overflow strategy.
//!
//! [`Table::find_or_reserve`] is the operation the counter leans on: a miss
//! inserts an entry with a tentative count of 0 and the reserving frame
//! overwrites it with the final count before returning. A recursion that
//! descends back into its own key reads the tentative 0 and terminates.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::base::{ConnectorId, WordPos};

/// Raw key value standing for "no boundary connector".
const NO_CONN: u32 = u32::MAX;

/// Bucket value standing for "empty chain".
const NO_ENTRY: u32 = u32::MAX;

/// Identity of one counting subproblem: the open range, the boundary
/// connectors pointing into it (by arena index), and the null budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableKey {
    pub lw: WordPos,
    pub rw: WordPos,
    le: u32,
    re: u32,
    pub cost: i32,
}

impl TableKey {
    pub fn new(
        lw: WordPos,
        rw: WordPos,
        le: Option<ConnectorId>,
        re: Option<ConnectorId>,
        cost: i32,
    ) -> Self {
        Self {
            lw,
            rw,
            le: le.map_or(NO_CONN, ConnectorId::raw),
            re: re.map_or(NO_CONN, ConnectorId::raw),
            cost,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    key: TableKey,
    count: i64,
    next: u32,
}

/// The count memo: one per [`CountContext`](crate::count::CountContext),
/// reinitialized per sentence.
#[derive(Debug, Clone)]
pub struct Table {
    shift: u32,
    buckets: Vec<u32>,
    entries: Vec<Entry>,
}

/// Bucket-count exponent for a sentence length: 12 below ten words, then
/// one more bit per six words, capped at 24.
fn table_shift(sentence_len: usize) -> u32 {
    if sentence_len < 10 {
        12
    } else {
        (12 + sentence_len / 6).min(24) as u32
    }
}

impl Table {
    pub fn new(sentence_len_hint: usize) -> Self {
        let mut table = Self {
            shift: 0,
            buckets: Vec::new(),
            entries: Vec::new(),
        };
        table.init(sentence_len_hint);
        table
    }

    /// Tear down all entries and resize for a new sentence.
    pub fn init(&mut self, sentence_len: usize) {
        self.shift = table_shift(sentence_len);
        self.entries.clear();
        self.buckets.clear();
        self.buckets.resize(1 << self.shift, NO_ENTRY);
        tracing::trace!(shift = self.shift, "memo table initialized");
    }

    fn bucket_of(&self, key: &TableKey) -> usize {
        let mut hasher = FxHasher::default();
        self.shift.hash(&mut hasher);
        key.hash(&mut hasher);
        (hasher.finish() as usize) & ((1usize << self.shift) - 1)
    }

    /// The finalized or tentative count stored for `key`, if any.
    pub fn lookup(&self, key: &TableKey) -> Option<i64> {
        let mut cur = self.buckets[self.bucket_of(key)];
        while cur != NO_ENTRY {
            let entry = &self.entries[cur as usize];
            if entry.key == *key {
                return Some(entry.count);
            }
            cur = entry.next;
        }
        None
    }

    /// Insert a fresh entry. The caller must have verified absence.
    pub fn store(&mut self, key: TableKey, count: i64) -> usize {
        debug_assert!(self.lookup(&key).is_none(), "duplicate memo entry");
        let bucket = self.bucket_of(&key);
        let slot = self.entries.len();
        self.entries.push(Entry {
            key,
            count,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = slot as u32;
        slot
    }

    /// Return the entry for `key`, inserting a tentative 0 on a miss.
    /// The second value reports whether the entry pre-existed.
    pub fn find_or_reserve(&mut self, key: TableKey) -> (usize, bool) {
        let bucket = self.bucket_of(&key);
        let mut cur = self.buckets[bucket];
        while cur != NO_ENTRY {
            let entry = &self.entries[cur as usize];
            if entry.key == key {
                return (cur as usize, true);
            }
            cur = entry.next;
        }
        let slot = self.entries.len();
        self.entries.push(Entry {
            key,
            count: 0,
            next: self.buckets[bucket],
        });
        self.buckets[bucket] = slot as u32;
        (slot, false)
    }

    pub fn count_at(&self, slot: usize) -> i64 {
        self.entries[slot].count
    }

    pub fn set_count(&mut self, slot: usize, count: i64) {
        self.entries[slot].count = count;
    }

    /// Number of live entries, mostly for diagnostics and tests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
