//! Options snapshot and the cooperative resource budget.

/// External resource budget, polled coarsely during counting.
///
/// Implementations answer whether the caller's budget (time, memory,
/// whatever it tracks) is spent. The query must be cheap and side-effect
/// free; the engine polls it once per
/// [`RESOURCE_POLL_INTERVAL`](super::RESOURCE_POLL_INTERVAL) memo
/// reservations.
pub trait ResourceBudget {
    fn exhausted(&self) -> bool;
}

/// Options for one parse, snapshotted by the driver.
#[derive(Clone, Copy)]
pub struct ParseOptions<'a> {
    /// May linked components disconnected from the left wall coexist with
    /// the main linkage?
    pub islands_ok: bool,
    /// How many consecutive unlinked words collapse into one unit of null
    /// budget. Must be at least 1.
    pub null_block: i32,
    /// First null level [`parse_minimal_nulls`](super::parse_minimal_nulls)
    /// tries.
    pub min_null_count: i32,
    /// Last null level it is willing to try (clamped to sentence length).
    pub max_null_count: i32,
    /// Budget polled during counting; `None` means unbounded.
    pub resources: Option<&'a dyn ResourceBudget>,
}

impl ParseOptions<'_> {
    pub fn new() -> Self {
        Self {
            islands_ok: false,
            null_block: 1,
            min_null_count: 0,
            max_null_count: 0,
            resources: None,
        }
    }
}

impl Default for ParseOptions<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParseOptions<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseOptions")
            .field("islands_ok", &self.islands_ok)
            .field("null_block", &self.null_block)
            .field("min_null_count", &self.min_null_count)
            .field("max_null_count", &self.max_null_count)
            .field("resources", &self.resources.map(|_| "dyn ResourceBudget"))
            .finish()
    }
}
