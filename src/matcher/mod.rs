//! Connector match predicates.
//!
//! [`do_match`] decides whether a right-pointing connector `a` on word `aw`
//! and a left-pointing connector `b` on word `bw` can form a link across the
//! distance `bw - aw`. The checks run cheapest first: label, distance, the
//! uppercase heads, then the lowercase suffixes under the priority pair.
//!
//! Suffix rules:
//! - `Thin`/`Thin`: `*` on either side matches any byte; `^` matches only
//!   `*`; otherwise bytes must be equal. Symmetric.
//! - `Up`/`Down`: `*` on the `Up` side matches anything, `^` on the `Down`
//!   side matches anything. Directional.
//! - Every other priority pair fails outright.
//!
//! A suffix walk succeeds as soon as either suffix runs out.

use crate::base::WordPos;
use crate::sentence::{Connector, Priority};

/// The `Thin`/`Thin` suffix walk, shared with [`do_match`] so the fast path
/// and the full predicate cannot disagree. Used on its own when a dictionary
/// carries no priorities at all.
pub fn easy_match(a_tail: &str, b_tail: &str) -> bool {
    for (x, y) in a_tail.bytes().zip(b_tail.bytes()) {
        let ok = x == b'*' || y == b'*' || (x == y && x != b'^');
        if !ok {
            return false;
        }
    }
    true
}

/// Can `a` (right-pointing, on word `aw`) link to `b` (left-pointing, on
/// word `bw`)?
pub fn do_match(a: &Connector, b: &Connector, aw: WordPos, bw: WordPos) -> bool {
    if a.label != b.label {
        return false;
    }

    let dist = bw - aw;
    debug_assert!(dist > 0, "a right-pointing connector matches leftward");
    if dist > a.length_limit || dist > b.length_limit {
        return false;
    }

    if a.head != b.head {
        return false;
    }

    match (a.priority, b.priority) {
        (Priority::Thin, Priority::Thin) => easy_match(&a.tail, &b.tail),
        (Priority::Up, Priority::Down) => one_sided_match(&a.tail, &b.tail),
        (Priority::Down, Priority::Up) => one_sided_match(&b.tail, &a.tail),
        _ => false,
    }
}

/// Directional suffix walk: `up` may wildcard with `*`, `down` with `^`.
fn one_sided_match(up_tail: &str, down_tail: &str) -> bool {
    for (x, y) in up_tail.bytes().zip(down_tail.bytes()) {
        let ok = x == y || x == b'*' || y == b'^';
        if !ok {
            return false;
        }
    }
    true
}
