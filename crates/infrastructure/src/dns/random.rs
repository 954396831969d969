use doh_relay_application::ports::RandomSource;

/// Uniform picks from `fastrand`'s thread-local generator.
///
/// Each thread's generator is seeded from OS entropy, so sequences differ
/// between runs and concurrent picks never share state.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastRandSource;

impl RandomSource for FastRandSource {
    fn pick_index(&self, len: usize) -> usize {
        fastrand::usize(..len)
    }
}
