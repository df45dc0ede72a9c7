use rand::SeedableRng;
use rand::rngs::StdRng;

/// Returns an entropy-seeded RNG for normal play.
///
/// # Panics
///
/// Panics if the operating system entropy source is unavailable.
#[must_use]
pub fn os_rng() -> StdRng {
    StdRng::from_os_rng()
}

/// Returns a deterministic RNG for tests and replayable sessions.
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Seed used by `fixed_rng`.
pub const FIXED_TEST_SEED: u64 = 0x5EED;

/// Returns an RNG seeded at the deterministic test seed.
#[must_use]
pub fn fixed_rng() -> StdRng {
    seeded_rng(FIXED_TEST_SEED)
}
