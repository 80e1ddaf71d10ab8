//! Proximity links between nearby entities
//!
//! A link is a derived edge, never stored: it exists for an unordered pair
//! exactly when their squared distance is strictly below the squared
//! threshold at the moment of the pass. Recomputed every frame from current
//! positions.

use crate::simulation::states::Entity;

/// Collect every unordered pair (i, j) with i < j whose distance is strictly
/// below `threshold`. Direct O(n^2) over all pairs; n is capped well below
/// the point where this matters.
pub fn collect_links(entities: &[Entity], threshold: f64) -> Vec<(usize, usize)> {
    let n = entities.len();
    let t2 = threshold * threshold;
    let mut links = Vec::new();

    for i in 0..n {
        let xi = entities[i].x;

        for j in (i + 1)..n {
            // squared separation, compared against the squared threshold so
            // no sqrt is taken in the hot loop
            let r = entities[j].x - xi;
            if r.dot(&r) < t2 {
                links.push((i, j));
            }
        }
    }

    links
}
