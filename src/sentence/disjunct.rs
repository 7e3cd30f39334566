//! Disjuncts and words.

use smol_str::SmolStr;

use crate::base::{ConnectorId, DisjunctId};

/// One alternative way a word can participate in a parse: two chains of
/// connectors that must all be satisfied by links.
///
/// `left` and `right` are chain heads into the sentence's connector arena,
/// or `None` for a side with no requirements. A disjunct with both sides
/// empty lets its word stand alone in a linkage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Disjunct {
    pub left: Option<ConnectorId>,
    pub right: Option<ConnectorId>,
    /// Scratch flag for the region marking pass.
    pub marked: bool,
}

impl Disjunct {
    pub fn new(left: Option<ConnectorId>, right: Option<ConnectorId>) -> Self {
        Self {
            left,
            right,
            marked: false,
        }
    }
}

/// A word of the sentence: its display text and candidate disjuncts.
#[derive(Debug, Clone, Default)]
pub struct Word {
    pub(crate) text: SmolStr,
    pub(crate) disjuncts: Vec<DisjunctId>,
}

impl Word {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn disjuncts(&self) -> &[DisjunctId] {
        &self.disjuncts
    }
}
