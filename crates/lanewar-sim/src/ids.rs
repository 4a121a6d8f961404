//! Generation-tagged unit identifiers.
//!
//! Game rules never look at ids. They exist so that consumers holding
//! snapshots across ticks can tell whether the unit at a given lane index
//! is still the same unit: index-based reuse in `copy_from` says nothing
//! about identity once merges, deaths, refunds or flank moves shift a lane.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId {
    pub index: u32,
    pub generation: u32,
}

impl UnitId {
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U{}g{}", self.index, self.generation)
    }
}

/// Slot allocator with free-list reuse. A released slot comes back with
/// a bumped generation so stale ids never compare equal to live ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitIdAllocator {
    generations: Vec<u32>,
    free_indices: Vec<u32>,
}

impl UnitIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate(&mut self) -> UnitId {
        if let Some(index) = self.free_indices.pop() {
            let generation = self.generations[index as usize];
            UnitId::new(index, generation)
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            UnitId::new(index, 0)
        }
    }

    pub fn release(&mut self, id: UnitId) {
        if self.is_alive(id) {
            self.generations[id.index as usize] += 1;
            self.free_indices.push(id.index);
        }
    }

    pub fn is_alive(&self, id: UnitId) -> bool {
        self.generations.get(id.index as usize) == Some(&id.generation)
            && !self.free_indices.contains(&id.index)
    }

    /// Number of ids currently handed out.
    pub fn live_count(&self) -> usize {
        self.generations.len() - self.free_indices.len()
    }
}
