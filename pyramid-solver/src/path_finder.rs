use crate::chamber::{ChamberId, NEIGHBOUR_COUNT};
use crate::chamber_map::ChamberMap;
use crate::stack::DLStack;
use tracing::{debug, info, trace, warn};

/// Result of one traversal.
#[derive(Debug)]
pub struct Exploration {
    /// Chambers still on the path; the top is the most recent one.
    pub path: DLStack<ChamberId>,
    /// Every push, in order.
    pub visit_order: Vec<ChamberId>,
    pub treasures_found: usize,
    pub treasures_total: usize,
    pub pushes: usize,
    pub pops: usize,
}

impl Exploration {
    pub fn is_complete(&self) -> bool {
        self.treasures_found == self.treasures_total
    }
}

type Preference<M> = fn(&PathFinder<'_, M>, ChamberId) -> bool;

/// Greedy depth-first search that backtracks out of dead ends.
pub struct PathFinder<'a, M: ChamberMap> {
    map: &'a mut M,
}

impl<'a, M: ChamberMap> PathFinder<'a, M> {
    pub fn new(map: &'a mut M) -> Self {
        Self { map }
    }

    pub fn compute_path(&mut self) -> Exploration {
        let entrance = self.map.entrance();
        let mut exploration = Exploration {
            path: DLStack::new(),
            visit_order: Vec::new(),
            treasures_found: 0,
            treasures_total: self.map.treasure_count(),
            pushes: 0,
            pops: 0,
        };

        self.enter(&mut exploration, entrance);

        while !exploration.path.is_empty() && !exploration.is_complete() {
            let Ok(&current) = exploration.path.peek() else {
                break;
            };

            match self.select_best_neighbour(current) {
                Some(next) => {
                    self.enter(&mut exploration, next);
                    if self.map.chamber(next).is_treasure() {
                        exploration.treasures_found += 1;
                        debug!(
                            "Treasure at {} ({}/{})",
                            next, exploration.treasures_found, exploration.treasures_total
                        );
                    }
                }
                None => {
                    debug!("Dead end at {}, backtracking", current);
                    self.map.chamber_mut(current).mark_popped();
                    if exploration.path.pop().is_ok() {
                        exploration.pops += 1;
                    }
                }
            }
        }

        if exploration.is_complete() {
            info!(
                "Found all {} treasures: {} chambers on the path, {} pushes, {} pops",
                exploration.treasures_total,
                exploration.path.size(),
                exploration.pushes,
                exploration.pops
            );
        } else {
            warn!(
                "Ran out of chambers with {}/{} treasures found",
                exploration.treasures_found, exploration.treasures_total
            );
        }
        exploration
    }

    fn enter(&mut self, exploration: &mut Exploration, id: ChamberId) {
        debug_assert!(!self.map.chamber(id).is_marked(), "{id} pushed twice");
        exploration.path.push(id);
        self.map.chamber_mut(id).mark_pushed();
        exploration.visit_order.push(id);
        exploration.pushes += 1;
        trace!("Pushed {}", id);
    }

    /// Picks where to go from `id`: an unvisited treasure first, then a lit
    /// chamber, then a dim one. Within each preference the lowest side wins.
    pub fn select_best_neighbour(&self, id: ChamberId) -> Option<ChamberId> {
        let chamber = self.map.chamber(id);
        let preferences: [Preference<M>; 3] = [
            |finder, n| finder.map.chamber(n).is_treasure(),
            |finder, n| finder.map.chamber(n).is_lighted(),
            |finder, n| finder.is_dim(n),
        ];

        preferences.iter().find_map(|prefers| {
            (0..NEIGHBOUR_COUNT)
                .filter_map(|side| chamber.neighbour(side))
                .find(|&n| self.is_open(n) && prefers(self, n))
        })
    }

    fn is_open(&self, id: ChamberId) -> bool {
        let chamber = self.map.chamber(id);
        !chamber.is_sealed() && !chamber.is_marked()
    }

    /// An open, unlit chamber with at least one lit neighbour. Whether that
    /// neighbour was visited does not matter.
    pub fn is_dim(&self, id: ChamberId) -> bool {
        let chamber = self.map.chamber(id);
        if chamber.is_sealed() || chamber.is_lighted() {
            return false;
        }
        (0..NEIGHBOUR_COUNT)
            .filter_map(|side| chamber.neighbour(side))
            .any(|n| self.map.chamber(n).is_lighted())
    }
}

/// Runs a fresh [`PathFinder`] over `map`.
pub fn find_path<M: ChamberMap>(map: &mut M) -> Exploration {
    PathFinder::new(map).compute_path()
}
