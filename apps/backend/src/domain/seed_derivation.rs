//! RNG seed derivation for deterministic rooms.
//!
//! A single base seed (from configuration) fans out into independent
//! streams per room and per purpose, so two rooms started with the same
//! base seed still deal differently.

/// Fold a room identifier into a base seed (FNV-1a over the id bytes).
pub fn derive_room_seed(base_seed: u64, room_id: &str) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in room_id.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    base_seed ^ hash
}

/// Seed for role dealing, lover pairing and synthetic seat profiles.
pub fn derive_setup_seed(room_seed: u64) -> u64 {
    room_seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1)
}

/// Seed for the decision engine's stream.
pub fn derive_decision_seed(room_seed: u64) -> u64 {
    room_seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(2)
}
