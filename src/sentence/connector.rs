//! Connectors: one half of a potential link.

use smol_str::SmolStr;

use crate::base::{ConnectorId, LabelId, WordPos};

/// Distance a connector may span when no limit was imposed on it.
pub const UNLIMITED_LEN: i32 = 255;

/// Matching priority of a connector.
///
/// Ordinary dictionaries only produce [`Priority::Thin`]. The `Up`/`Down`
/// pair appears on connectors synthesized for fat linkages and matches
/// directionally: see [`do_match`](crate::matcher::do_match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Priority {
    #[default]
    Thin,
    Up,
    Down,
}

/// One half of a potential link, attached to one word and pointing either
/// left or right.
///
/// `head` is the uppercase class prefix, compared for exact equality;
/// `tail` is the lowercase suffix where `*` and `^` act as wildcards under
/// the priority rules. `label` is the interned id of `head`, so label
/// equality is exactly head equality within one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connector {
    pub label: LabelId,
    pub head: SmolStr,
    pub tail: SmolStr,
    /// May this connector participate in more than one link?
    pub multi: bool,
    /// Maximum inter-word distance this connector may span, 1-based.
    pub length_limit: i32,
    pub priority: Priority,
    /// Nearest word this connector could reach. The builder defaults this
    /// to the neighboring position; a pruning pass may tighten it. The
    /// counter trusts it for its split-word bounds.
    pub word: WordPos,
    /// The next connector on the same side of the same disjunct. The chain
    /// head links farthest; each `next` links strictly nearer, nested below
    /// the head's arc.
    pub next: Option<ConnectorId>,
}

/// Owned description of a connector, consumed by the sentence builder.
///
/// ```
/// use linkgram::sentence::ConnectorSpec;
///
/// let spec = ConnectorSpec::new("Sa*").multi().length_limit(3);
/// assert_eq!(spec.name(), "Sa*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorSpec {
    name: SmolStr,
    multi: bool,
    length_limit: i32,
    priority: Priority,
}

impl ConnectorSpec {
    /// A Thin, single-link connector with an unlimited length.
    pub fn new(name: &str) -> Self {
        Self {
            name: SmolStr::new(name),
            multi: false,
            length_limit: UNLIMITED_LEN,
            priority: Priority::Thin,
        }
    }

    /// Allow the connector to take part in multiple links.
    pub fn multi(mut self) -> Self {
        self.multi = true;
        self
    }

    /// Cap the inter-word distance this connector may span.
    pub fn length_limit(mut self, limit: i32) -> Self {
        self.length_limit = limit;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn is_multi(&self) -> bool {
        self.multi
    }

    pub(crate) fn limit(&self) -> i32 {
        self.length_limit
    }

    pub(crate) fn prio(&self) -> Priority {
        self.priority
    }
}
