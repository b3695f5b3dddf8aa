//! Topological planner (C7): Kahn-style layered sort over a node/edge set.
//!
//! Groups node IDs into waves whose dependencies are satisfied by earlier
//! waves, exactly per spec §4.7. Generic over the node identifier type so it
//! can be exercised in isolation, independent of `nebula-action`'s node or
//! schema types — `nebula-engine` instantiates it with workflow node IDs
//! (`String`).

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use nebula_error::NebulaError;

/// Compute the topological waves of `(node_ids, edges)`.
///
/// Each returned wave is a `Vec<Id>` whose members have no unsatisfied
/// dependency once every earlier wave has completed; wave-internal order is
/// unspecified (here: the order nodes become unblocked while scanning
/// `edges` in the given order, which is deterministic for a fixed input but
/// carries no meaning beyond that).
///
/// Edge endpoints that do not appear in `node_ids` are tolerated and simply
/// never contribute to — or are never emitted in — a wave (§4.7 step 1,
/// "unknown endpoints keep in-degree 0").
///
/// # Errors
/// Returns [`NebulaError::cycle_detected`] if any node is unreachable from
/// the in-degree-0 frontier, i.e. the edge set contains a cycle.
pub fn plan_waves<Id>(node_ids: &[Id], edges: &[(Id, Id)]) -> Result<Vec<Vec<Id>>, NebulaError>
where
    Id: Eq + Hash + Clone,
{
    let known: HashSet<Id> = node_ids.iter().cloned().collect();

    let mut adjacency: HashMap<Id, Vec<Id>> = HashMap::new();
    let mut in_degree: HashMap<Id, usize> = node_ids.iter().cloned().map(|id| (id, 0)).collect();

    for (from, to) in edges {
        if known.contains(to) {
            *in_degree.get_mut(to).expect("to is in `known`, so it was seeded above") += 1;
        }
        if known.contains(from) {
            adjacency.entry(from.clone()).or_default().push(to.clone());
        }
    }

    let mut frontier: Vec<Id> = node_ids
        .iter()
        .filter(|id| in_degree[id] == 0)
        .cloned()
        .collect();

    let mut waves = Vec::new();
    let mut emitted = 0usize;

    while !frontier.is_empty() {
        emitted += frontier.len();

        let mut next_frontier = Vec::new();
        for id in &frontier {
            let Some(children) = adjacency.get(id) else {
                continue;
            };
            for child in children {
                let degree = in_degree
                    .get_mut(child)
                    .expect("child is in `known`, so it was seeded above");
                *degree -= 1;
                if *degree == 0 {
                    next_frontier.push(child.clone());
                }
            }
        }

        waves.push(std::mem::take(&mut frontier));
        frontier = next_frontier;
    }

    if emitted != node_ids.len() {
        return Err(NebulaError::cycle_detected());
    }

    Ok(waves)
}
