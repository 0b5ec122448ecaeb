//! Best-first search core shared by the grid solvers. It follows the shape of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! but stops as soon as a goal is *discovered* rather than expanded, and breaks cost ties by
//! discovery order so that results are stable for a fixed successor order.
use indexmap::map::Entry::{Occupied, Vacant};
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use crate::FxIndexMap;

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
}

impl<K: PartialEq> Eq for SmallestCostHolder<K> {}

impl<K: PartialEq> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.estimated_cost.eq(&other.estimated_cost) && self.index == other.index
    }
}

impl<K: Ord> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimated cost first, then the node that was discovered first
        match other.estimated_cost.cmp(&self.estimated_cost) {
            Ordering::Equal => other.index.cmp(&self.index),
            s => s,
        }
    }
}

/// Search scratch for one node. Lives in the side table of a single [astar] call.
struct Scratch<C> {
    parent: usize,
    dist_from_start: C,
    dist_from_end: C,
    closed: bool,
}

fn reverse_path<N, C>(nodes: &FxIndexMap<N, Scratch<C>>, end: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
{
    let mut path: Vec<N> = std::iter::successors(nodes.get_index(end), |(_, scratch)| {
        nodes.get_index(scratch.parent)
    })
    .map(|(node, _)| node.clone())
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until `success` holds for a discovered node. Returns the path including
/// `start` and the goal, with its cost, or [None] once every reachable node has been expanded.
pub(crate) fn astar<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    if success(start) {
        return Some((vec![start.clone()], Zero::zero()));
    }
    let mut to_see = BinaryHeap::new();
    let mut nodes: FxIndexMap<N, Scratch<C>> = FxIndexMap::default();
    let start_estimate = heuristic(start);
    nodes.insert(
        start.clone(),
        Scratch {
            parent: usize::MAX,
            dist_from_start: Zero::zero(),
            dist_from_end: start_estimate,
            closed: false,
        },
    );
    to_see.push(SmallestCostHolder {
        estimated_cost: start_estimate,
        cost: Zero::zero(),
        index: 0,
    });
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        let successors = {
            let Some((node, scratch)) = nodes.get_index_mut(index) else {
                continue;
            };
            // A node is pushed again whenever a shorter way to it is found; only the entry
            // carrying its current distance is expanded.
            if scratch.closed || cost > scratch.dist_from_start {
                continue;
            }
            scratch.closed = true;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            match nodes.entry(successor) {
                Vacant(e) => {
                    let h = heuristic(e.key());
                    let found = success(e.key());
                    let n = e.index();
                    e.insert(Scratch {
                        parent: index,
                        dist_from_start: new_cost,
                        dist_from_end: h,
                        closed: false,
                    });
                    if found {
                        return Some((reverse_path(&nodes, n), new_cost));
                    }
                    to_see.push(SmallestCostHolder {
                        estimated_cost: new_cost + h,
                        cost: new_cost,
                        index: n,
                    });
                }
                Occupied(mut e) => {
                    let n = e.index();
                    let scratch = e.get_mut();
                    if scratch.closed || scratch.dist_from_start <= new_cost {
                        continue;
                    }
                    scratch.dist_from_start = new_cost;
                    scratch.parent = index;
                    to_see.push(SmallestCostHolder {
                        estimated_cost: new_cost + scratch.dist_from_end,
                        cost: new_cost,
                        index: n,
                    });
                }
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Nodes on a line, stepping one at a time in both directions.
    fn line_successors(n: &i32) -> Vec<(i32, i32)> {
        vec![(n - 1, 1), (n + 1, 1)]
    }

    #[test]
    fn finds_line_path() {
        let (path, cost) = astar(&0, line_successors, |n| (7 - n).abs(), |n| *n == 4).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3, 4]);
        assert_eq!(cost, 4);
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = astar(&3, line_successors, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![3]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn exhausts_finite_graph() {
        let successors = |n: &i32| {
            [(n - 1, 1), (n + 1, 1)]
                .into_iter()
                .filter(|(m, _)| (0..5).contains(m))
                .collect::<Vec<_>>()
        };
        assert!(astar(&0, successors, |_| 0, |n| *n == 9).is_none());
    }

    /// With equal estimates the node discovered first is expanded first.
    #[test]
    fn ties_follow_discovery_order() {
        // Two branches of equal length; the one listed first must win.
        let successors = |n: &u8| -> Vec<(u8, i32)> {
            match n {
                0 => vec![(1, 1), (2, 1)],
                1 => vec![(3, 1)],
                2 => vec![(4, 1)],
                3 | 4 => vec![(9, 1)],
                _ => vec![],
            }
        };
        let (path, _) = astar(&0u8, successors, |_| 0, |n| *n == 9).unwrap();
        assert_eq!(path, vec![0, 1, 3, 9]);
    }

    /// A node first discovered along an expensive edge is relinked when a cheaper way shows up.
    #[test]
    fn relinks_on_shorter_path() {
        let successors = |n: &u8| -> Vec<(u8, i32)> {
            match n {
                0 => vec![(1, 5), (2, 1)],
                2 => vec![(1, 1)],
                1 => vec![(3, 1)],
                _ => vec![],
            }
        };
        let (path, cost) = astar(&0u8, successors, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 2, 1, 3]);
        assert_eq!(cost, 3);
    }
}
