//! Entity identifiers with generational indices
//!
//! Enemies die and respawn constantly in the arena, so a plain index
//! would let a stale reference (say, a queued damage event) hit whatever
//! entity reused the slot. Each slot carries a generation counter that
//! increments on reuse, invalidating old handles.

/// A unique identifier for a game entity.
///
/// Two entities with the same index but different generations are
/// different entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Index into component storage
    index: u32,
    /// Generation counter, increments when the slot is reused
    generation: u32,
}

impl Entity {
    /// Should only be called by EntityAllocator (and tests).
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Allocates and tracks entity lifetimes.
///
/// Freed slots are reused LIFO with a bumped generation.
pub struct EntityAllocator {
    /// Generation counter for each slot
    generations: Vec<u32>,
    /// Whether each slot currently holds a live entity
    occupied: Vec<bool>,
    /// Free slots available for reuse
    free_indices: Vec<u32>,
    /// Number of currently alive entities
    alive_count: u32,
}

impl EntityAllocator {
    pub fn new() -> Self {
        Self {
            generations: Vec::new(),
            occupied: Vec::new(),
            free_indices: Vec::new(),
            alive_count: 0,
        }
    }

    /// Allocate a new entity.
    pub fn allocate(&mut self) -> Entity {
        self.alive_count += 1;

        if let Some(index) = self.free_indices.pop() {
            // Generation was already bumped when the slot was freed
            self.occupied[index as usize] = true;
            Entity::new(index, self.generations[index as usize])
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(0);
            self.occupied.push(true);
            Entity::new(index, 0)
        }
    }

    /// Free an entity, making its slot available for reuse.
    /// Returns true if the entity was alive and is now freed.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        self.generations[entity.index as usize] += 1;
        self.occupied[entity.index as usize] = false;
        self.free_indices.push(entity.index);
        self.alive_count -= 1;
        true
    }

    /// Check if an entity is currently alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.generations.len()
            && self.occupied[idx]
            && self.generations[idx] == entity.generation
    }

    /// Resolve a slot index to the live entity occupying it, if any.
    /// Storage iteration yields bare indices; this rebuilds a full handle.
    pub fn entity_at(&self, index: u32) -> Option<Entity> {
        let idx = index as usize;
        if idx < self.generations.len() && self.occupied[idx] {
            Some(Entity::new(index, self.generations[idx]))
        } else {
            None
        }
    }

    /// Get the number of currently alive entities.
    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::new()
    }
}
