/// Source of uniform picks for category resolution.
///
/// Implementations must be safe to share across concurrent requests.
pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}
