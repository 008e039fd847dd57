//! Bit-exact fingerprint of a committed engine snapshot.
//!
//! Uses FNV-1a over the IEEE-754 bit patterns, so two runs hash equal only
//! if their states are bit-identical. Not cryptographically secure; meant
//! for cheap step-by-step determinism comparison.

use crate::types::{LifecycleContext, StructuralState};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = (hash ^ b as u64).wrapping_mul(FNV_PRIME);
    }
    hash
}

fn fold_state(hash: u64, s: &StructuralState) -> u64 {
    let hash = fnv1a_u64(hash, s.phi.to_bits());
    let hash = fnv1a_u64(hash, s.memory.to_bits());
    fnv1a_u64(hash, s.kappa.to_bits())
}

/// Hash the current state, previous state, and lifecycle.
///
/// Order matters: swapping `current` and `previous` changes the hash.
pub fn state_hash(
    current: &StructuralState,
    previous: &StructuralState,
    lifecycle: &LifecycleContext,
) -> u64 {
    let mut hash = fold_state(FNV_OFFSET, current);
    hash = fold_state(hash, previous);
    hash = fnv1a_u64(hash, lifecycle.step_counter);
    let flags = u64::from(lifecycle.terminal) | (u64::from(lifecycle.collapse_emitted) << 1);
    fnv1a_u64(hash, flags)
}
