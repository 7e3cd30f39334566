//! Sentence data model: words, disjuncts, connectors.
//!
//! A [`Sentence`] is the immutable input of the counting engine. Each word
//! carries the disjuncts left over after pruning; each disjunct carries two
//! chains of connectors (left-pointing and right-pointing) that must all be
//! satisfied by links for the disjunct to be used. Everything is stored in
//! arenas on the sentence and referenced by index, so connector identity is
//! stable and cheap to fold into memo keys.
//!
//! Sentences are constructed through [`SentenceBuilder`], either from
//! [`ConnectorSpec`] lists or from the compact disjunct notation
//! (`"@Sa*- & O+"`) parsed by the notation lexer.

mod builder;
mod connector;
mod disjunct;
mod labels;
mod notation;

pub use builder::{BuildError, SentenceBuilder};
pub use connector::{Connector, ConnectorSpec, Priority, UNLIMITED_LEN};
pub use disjunct::{Disjunct, Word};
pub use labels::LabelInterner;

use crate::base::{ConnectorId, DisjunctId};

/// A sentence prepared for counting: words with their candidate disjuncts,
/// backed by connector and disjunct arenas.
///
/// Immutable during counting. The only mutation the engine ever performs is
/// the `marked` scratch flag on disjuncts, used by the optional region
/// marking pass.
#[derive(Debug, Clone, Default)]
pub struct Sentence {
    pub(crate) words: Vec<Word>,
    pub(crate) connectors: Vec<Connector>,
    pub(crate) disjuncts: Vec<Disjunct>,
    pub(crate) labels: LabelInterner,
}

impl Sentence {
    /// Number of words, excluding the virtual left wall.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn word(&self, w: usize) -> &Word {
        &self.words[w]
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn connector(&self, id: ConnectorId) -> &Connector {
        &self.connectors[id.index()]
    }

    pub fn disjunct(&self, id: DisjunctId) -> &Disjunct {
        &self.disjuncts[id.index()]
    }

    pub fn labels(&self) -> &LabelInterner {
        &self.labels
    }

    /// Walk a connector chain starting at `head`, head first.
    pub fn chain(&self, head: Option<ConnectorId>) -> impl Iterator<Item = ConnectorId> + '_ {
        let mut cur = head;
        std::iter::from_fn(move || {
            let id = cur?;
            cur = self.connector(id).next;
            Some(id)
        })
    }

    /// Clear the scratch marks on every disjunct.
    pub fn clear_marks(&mut self) {
        for d in &mut self.disjuncts {
            d.marked = false;
        }
    }

    /// Set the scratch mark on one disjunct.
    pub fn mark_disjunct(&mut self, id: DisjunctId) {
        self.disjuncts[id.index()].marked = true;
    }

    /// Ids of all disjuncts currently marked.
    pub fn marked_disjuncts(&self) -> Vec<DisjunctId> {
        self.disjuncts
            .iter()
            .enumerate()
            .filter(|(_, d)| d.marked)
            .map(|(i, _)| DisjunctId::new(i))
            .collect()
    }
}
