//! Deterministic RNG using PCG32 with BLAKE3 seed derivation.
//!
//! Dither noise is the only randomness in the engine. It flows through this
//! module so the same inputs and seed always produce the same file.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit PCG state.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives a seed for one noise stream from the configured base seed.
///
/// Hashes the base seed (little-endian) followed by `key` with BLAKE3 and
/// keeps the first four bytes.
pub fn derive_stream_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG used for dither noise.
pub fn dither_rng(base_seed: u32) -> Pcg32 {
    create_rng(derive_stream_seed(base_seed, "dither"))
}
