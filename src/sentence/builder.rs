//! Sentence construction.

use thiserror::Error;

use crate::base::{ConnectorId, DisjunctId, WordPos};

use super::connector::{Connector, ConnectorSpec};
use super::disjunct::{Disjunct, Word};
use super::notation::parse_disjunct;
use super::Sentence;

/// Errors raised while assembling a sentence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The referenced word does not exist yet.
    #[error("word index {index} out of range for sentence of length {len}")]
    WordOutOfRange { index: usize, len: usize },

    /// A connector name did not start with an uppercase head.
    #[error("connector name {0:?} is missing an uppercase head")]
    MissingLabel(String),

    /// A connector suffix contained something other than lowercase, `*`, `^`.
    #[error("invalid character {found:?} in connector suffix of {name:?}")]
    BadSuffix { name: String, found: char },

    /// Length limits are 1-based distances.
    #[error("length limit must be at least 1, got {0}")]
    BadLengthLimit(i32),

    /// The notation lexer hit something it does not know.
    #[error("unexpected {found:?} in disjunct expression {expr:?}")]
    UnexpectedToken { expr: String, found: String },

    /// The expression stopped mid-atom.
    #[error("disjunct expression {expr:?} ended unexpectedly")]
    UnexpectedEnd { expr: String },

    /// A connector atom had no `+`/`-` sign.
    #[error("connector {name:?} is missing a +/- direction")]
    MissingDirection { name: String },
}

/// Builds a [`Sentence`] word by word, disjunct by disjunct.
///
/// Connectors on each side are given head first: the first connector of a
/// side is the one whose link spans farthest, and every following one links
/// strictly nearer, nested below it.
///
/// ```
/// use linkgram::sentence::SentenceBuilder;
///
/// let mut b = SentenceBuilder::new();
/// let the = b.word("the");
/// let cat = b.word("cat");
/// b.disjunct(the, "D+").unwrap();
/// b.disjunct(cat, "D-").unwrap();
/// let sent = b.finish();
/// assert_eq!(sent.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct SentenceBuilder {
    sent: Sentence,
}

impl SentenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a word; returns its position.
    pub fn word(&mut self, text: &str) -> usize {
        self.sent.words.push(Word {
            text: text.into(),
            disjuncts: Vec::new(),
        });
        self.sent.words.len() - 1
    }

    /// Add a disjunct to `word` from its notation form, e.g. `"S- & O+"`.
    pub fn disjunct(&mut self, word: usize, expr: &str) -> Result<DisjunctId, BuildError> {
        let parsed = parse_disjunct(expr)?;
        self.disjunct_specs(word, &parsed.left, &parsed.right)
    }

    /// Add a disjunct to `word` from explicit connector specs, head first on
    /// each side.
    pub fn disjunct_specs(
        &mut self,
        word: usize,
        left: &[ConnectorSpec],
        right: &[ConnectorSpec],
    ) -> Result<DisjunctId, BuildError> {
        if word >= self.sent.words.len() {
            return Err(BuildError::WordOutOfRange {
                index: word,
                len: self.sent.words.len(),
            });
        }

        let w = word as WordPos;
        let left_head = self.chain(left, w - 1)?;
        let right_head = self.chain(right, w + 1)?;

        let id = DisjunctId::new(self.sent.disjuncts.len());
        self.sent.disjuncts.push(Disjunct::new(left_head, right_head));
        self.sent.words[word].disjuncts.push(id);
        Ok(id)
    }

    pub fn finish(self) -> Sentence {
        self.sent
    }

    /// Allocate a connector chain, linking each spec to the next.
    fn chain(
        &mut self,
        specs: &[ConnectorSpec],
        reach: WordPos,
    ) -> Result<Option<ConnectorId>, BuildError> {
        let mut ids = Vec::with_capacity(specs.len());
        for spec in specs {
            ids.push(self.connector(spec, reach)?);
        }
        for pair in ids.windows(2) {
            self.sent.connectors[pair[0].index()].next = Some(pair[1]);
        }
        Ok(ids.first().copied())
    }

    fn connector(
        &mut self,
        spec: &ConnectorSpec,
        reach: WordPos,
    ) -> Result<ConnectorId, BuildError> {
        let name = spec.name();
        let head_len = name.bytes().take_while(u8::is_ascii_uppercase).count();
        if head_len == 0 {
            return Err(BuildError::MissingLabel(name.to_string()));
        }
        let (head, tail) = name.split_at(head_len);
        if let Some(found) = tail
            .chars()
            .find(|c| !c.is_ascii_lowercase() && *c != '*' && *c != '^')
        {
            return Err(BuildError::BadSuffix {
                name: name.to_string(),
                found,
            });
        }
        if spec.limit() < 1 {
            return Err(BuildError::BadLengthLimit(spec.limit()));
        }

        let label = self.sent.labels.intern(head);
        let id = ConnectorId::new(self.sent.connectors.len());
        self.sent.connectors.push(Connector {
            label,
            head: head.into(),
            tail: tail.into(),
            multi: spec.is_multi(),
            length_limit: spec.limit(),
            priority: spec.prio(),
            word: reach,
            next: None,
        });
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentence::Priority;

    #[test]
    fn test_two_word_sentence() {
        let mut b = SentenceBuilder::new();
        let a = b.word("a");
        let c = b.word("cat");
        b.disjunct(a, "S+").unwrap();
        b.disjunct(c, "S-").unwrap();
        let sent = b.finish();

        assert_eq!(sent.len(), 2);
        assert_eq!(sent.word(0).text(), "a");
        let d = sent.disjunct(sent.word(0).disjuncts()[0]);
        assert!(d.left.is_none());
        let right = sent.connector(d.right.unwrap());
        assert_eq!(right.head, "S");
        assert_eq!(right.tail, "");
        assert_eq!(right.word, 1);
    }

    #[test]
    fn test_chain_links_head_first() {
        let mut b = SentenceBuilder::new();
        let w = b.word("w");
        b.disjunct(w, "D+ & S+").unwrap();
        let sent = b.finish();

        let d = sent.disjunct(sent.word(0).disjuncts()[0]);
        let ids: Vec<_> = sent.chain(d.right).collect();
        assert_eq!(ids.len(), 2);
        assert_eq!(sent.connector(ids[0]).head, "D");
        assert_eq!(sent.connector(ids[1]).head, "S");
        assert!(sent.connector(ids[1]).next.is_none());
    }

    #[test]
    fn test_labels_shared_by_head() {
        let mut b = SentenceBuilder::new();
        let w = b.word("w");
        let v = b.word("v");
        b.disjunct(w, "Sa+").unwrap();
        b.disjunct(v, "Sb-").unwrap();
        let sent = b.finish();

        let dw = sent.disjunct(sent.word(0).disjuncts()[0]);
        let dv = sent.disjunct(sent.word(1).disjuncts()[0]);
        let a = sent.connector(dw.right.unwrap());
        let bc = sent.connector(dv.left.unwrap());
        assert_eq!(a.label, bc.label);
        assert_ne!(a.tail, bc.tail);
    }

    #[test]
    fn test_left_reach_hint() {
        let mut b = SentenceBuilder::new();
        let w = b.word("w");
        b.disjunct(w, "S-").unwrap();
        let sent = b.finish();
        let d = sent.disjunct(sent.word(0).disjuncts()[0]);
        assert_eq!(sent.connector(d.left.unwrap()).word, -1);
    }

    #[test]
    fn test_word_out_of_range() {
        let mut b = SentenceBuilder::new();
        assert_eq!(
            b.disjunct(0, "S+"),
            Err(BuildError::WordOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_bad_specs() {
        let mut b = SentenceBuilder::new();
        let w = b.word("w");
        assert!(matches!(
            b.disjunct_specs(w, &[ConnectorSpec::new("sa")], &[]),
            Err(BuildError::MissingLabel(_))
        ));
        assert!(matches!(
            b.disjunct_specs(w, &[ConnectorSpec::new("S9")], &[]),
            Err(BuildError::BadSuffix { .. })
        ));
        assert!(matches!(
            b.disjunct_specs(w, &[ConnectorSpec::new("S").length_limit(0)], &[]),
            Err(BuildError::BadLengthLimit(0))
        ));
    }

    #[test]
    fn test_spec_priority_carries() {
        let mut b = SentenceBuilder::new();
        let w = b.word("w");
        b.disjunct_specs(w, &[], &[ConnectorSpec::new("S").priority(Priority::Up)])
            .unwrap();
        let sent = b.finish();
        let d = sent.disjunct(sent.word(0).disjuncts()[0]);
        assert_eq!(sent.connector(d.right.unwrap()).priority, Priority::Up);
    }
}
