//! UUID identifier generators.

use rand::Rng;
use std::collections::HashSet;
use uuid::Uuid;

/// Generate a random UUID v4 using the provided RNG.
pub fn generate_uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    // Generate 16 random bytes
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40; // Version 4
    bytes[8] = (bytes[8] & 0x3f) | 0x80; // Variant RFC 4122

    Uuid::from_bytes(bytes)
}

/// Generate `count` distinct UUID strings.
pub fn generate_identifier_pool<R: Rng>(rng: &mut R, count: usize) -> Vec<String> {
    let mut seen = HashSet::with_capacity(count);
    let mut pool = Vec::with_capacity(count);

    while pool.len() < count {
        let id = generate_uuid_v4(rng);
        if seen.insert(id) {
            pool.push(id.to_string());
        }
    }

    pool
}
