use crate::chamber::{Chamber, ChamberId};

/// What the path finder needs from a map: where to start, how many
/// treasures exist, and access to the chambers themselves.
pub trait ChamberMap {
    fn entrance(&self) -> ChamberId;
    fn treasure_count(&self) -> usize;
    fn chamber_count(&self) -> usize;
    fn chamber(&self, id: ChamberId) -> &Chamber;
    fn chamber_mut(&mut self, id: ChamberId) -> &mut Chamber;
}
