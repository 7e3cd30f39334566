//! Label interner: uppercase connector heads to dense ids.
//!
//! Interning returns the insertion index as the [`LabelId`], so ids are
//! dense, copyable, and fold directly into hash keys. Identical heads share
//! one id; distinct heads never collide.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::base::LabelId;

/// Interner for connector class heads.
#[derive(Debug, Clone, Default)]
pub struct LabelInterner {
    heads: IndexSet<SmolStr, FxBuildHasher>,
}

impl LabelInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a head string, returning its dense id.
    pub fn intern(&mut self, head: &str) -> LabelId {
        if let Some(index) = self.heads.get_index_of(head) {
            return LabelId::new(index);
        }
        let (index, _) = self.heads.insert_full(SmolStr::new(head));
        LabelId::new(index)
    }

    /// Look up a head without interning it.
    pub fn get(&self, head: &str) -> Option<LabelId> {
        self.heads.get_index_of(head).map(LabelId::new)
    }

    /// The head string behind an id.
    pub fn resolve(&self, id: LabelId) -> &str {
        self.heads
            .get_index(id.index())
            .expect("label id from a different interner")
    }

    pub fn len(&self) -> usize {
        self.heads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heads.is_empty()
    }
}
