/// Aggregated view of session navigation, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the displayed question; 0 before the first load.
    pub viewed: usize,
    /// Questions fetched so far.
    pub fetched: usize,
    /// True when going back would be a no-op.
    pub at_first: bool,
    /// True when advancing requires a fetch rather than a replay.
    pub at_latest: bool,
}
