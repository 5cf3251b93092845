//! Resource association generators.

use crate::pools::{ReferencePools, ResourcePool};
use metrics_core::ResourceRef;
use rand::seq::SliceRandom;
use rand::Rng;

/// Pick one item uniformly. `items` must be non-empty.
pub fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn pick_id<R: Rng>(rng: &mut R, pool: &ResourcePool) -> ResourceRef {
    ResourceRef::new(pool.resource_type.clone(), pick(rng, &pool.ids).clone())
}

/// Tag with 1..K resources of distinct types.
///
/// The resource types are shuffled, a count is drawn from `[1, K]`, and that
/// many types are popped off the shuffled list, so no type repeats. Each
/// entry carries the index of its pool in [`ReferencePools::resources`].
pub fn generate_metadata<R: Rng>(
    rng: &mut R,
    pools: &ReferencePools,
) -> Vec<(usize, ResourceRef)> {
    let mut choices: Vec<(usize, &ResourcePool)> = pools.resources().iter().enumerate().collect();
    choices.shuffle(rng);

    let count = rng.gen_range(1..=choices.len());
    let mut metadata = Vec::with_capacity(count);
    for _ in 0..count {
        if let Some((idx, pool)) = choices.pop() {
            metadata.push((idx, pick_id(rng, pool)));
        }
    }
    metadata
}

/// Tag with exactly one resource of a uniformly chosen type.
pub fn generate_single<R: Rng>(rng: &mut R, pools: &ReferencePools) -> (usize, ResourceRef) {
    let idx = rng.gen_range(0..pools.resources().len());
    (idx, pick_id(rng, &pools.resources()[idx]))
}
