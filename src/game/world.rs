//! Game world
//!
//! Central container for arena entities: allocator, component storages,
//! and a deferred despawn queue so combat can kill enemies while
//! iterating over them. The player is not an entity here; the
//! `PlayerController` aggregate owns all player state and the world only
//! holds the things the player can hit.

use macroquad::math::Vec2;

use super::component::ComponentStorage;
use super::components::{Enemy, EnemyKind, Health, SpawnPoint};
use super::entity::{Entity, EntityAllocator};

pub struct World {
    entities: EntityAllocator,

    /// Entities queued for despawn at end of frame
    despawn_queue: Vec<Entity>,

    /// World-space position of each entity
    pub positions: ComponentStorage<Vec2>,

    /// Health and damage tracking
    pub health: ComponentStorage<Health>,

    /// Enemy data (kind, body radius via kind)
    pub enemies: ComponentStorage<Enemy>,

    /// Respawn bookkeeping, attached to spawner entities
    pub spawn_points: ComponentStorage<SpawnPoint>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            despawn_queue: Vec::new(),
            positions: ComponentStorage::new(),
            health: ComponentStorage::new(),
            enemies: ComponentStorage::new(),
            spawn_points: ComponentStorage::new(),
        }
    }

    /// Spawn a bare entity at a position.
    pub fn spawn_at(&mut self, position: Vec2) -> Entity {
        let entity = self.entities.allocate();
        self.positions.insert(entity, position);
        entity
    }

    /// Spawn an enemy entity with full health for its kind.
    pub fn spawn_enemy(&mut self, position: Vec2, kind: EnemyKind) -> Entity {
        let entity = self.spawn_at(position);
        self.enemies.insert(entity, Enemy { kind });
        self.health.insert(entity, Health::new(kind.max_health()));
        entity
    }

    /// Spawn a spawn-point entity that keeps an enemy kind alive at a
    /// fixed position (used to populate the arena).
    pub fn spawn_point(&mut self, position: Vec2, kind: EnemyKind) -> Entity {
        let entity = self.spawn_at(position);
        self.spawn_points.insert(
            entity,
            SpawnPoint {
                position,
                kind,
                // Spawn immediately on the first tick
                respawn_timer: Some(0.0),
                spawned: None,
            },
        );
        entity
    }

    /// Queue an entity for despawn at end of frame.
    /// Safer than immediate despawn during iteration.
    pub fn despawn(&mut self, entity: Entity) {
        if self.is_alive(entity) {
            self.despawn_queue.push(entity);
        }
    }

    /// Immediately despawn an entity and clear its components.
    pub fn despawn_immediate(&mut self, entity: Entity) {
        if !self.entities.free(entity) {
            return; // Already dead
        }

        let idx = entity.index();
        self.positions.clear_slot(idx);
        self.health.clear_slot(idx);
        self.enemies.clear_slot(idx);
        self.spawn_points.clear_slot(idx);
    }

    /// Process all queued despawns. Call at end of frame.
    pub fn flush_despawns(&mut self) {
        let queue = std::mem::take(&mut self.despawn_queue);
        for entity in queue {
            self.despawn_immediate(entity);
        }
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Resolve a storage index to the live entity in that slot, if any.
    pub fn entity_at(&self, index: u32) -> Option<Entity> {
        self.entities.entity_at(index)
    }

    /// Live enemies as (entity, position, kind) tuples. This is the
    /// bounded linear scan combat runs against; the arena never holds
    /// more than a handful of enemies.
    pub fn live_enemies(&self) -> Vec<(Entity, Vec2, EnemyKind)> {
        self.enemies
            .iter()
            .filter_map(|(idx, enemy)| {
                // Storage iteration yields bare indices; rebuild the live
                // handle so queued events can't hit a respawned slot.
                let entity = self.entities.entity_at(idx)?;
                let health = self.health.get(entity)?;
                if health.is_dead() {
                    return None;
                }
                let pos = self.positions.get(entity)?;
                Some((entity, *pos, enemy.kind))
            })
            .collect()
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_and_despawn() {
        let mut world = World::new();

        let e1 = world.spawn_enemy(Vec2::new(1.0, 2.0), EnemyKind::Dummy);
        let e2 = world.spawn_enemy(Vec2::new(3.0, 4.0), EnemyKind::Slime);
        assert_eq!(world.entity_count(), 2);

        world.despawn_immediate(e1);
        assert_eq!(world.entity_count(), 1);
        assert!(!world.is_alive(e1));
        assert!(world.is_alive(e2));
        assert!(!world.positions.contains(e1));
    }

    #[test]
    fn test_deferred_despawn() {
        let mut world = World::new();
        let e = world.spawn_enemy(Vec2::ZERO, EnemyKind::Dummy);

        world.despawn(e);
        // Still alive until the flush at end of frame
        assert!(world.is_alive(e));

        world.flush_despawns();
        assert!(!world.is_alive(e));
    }

    #[test]
    fn test_spawn_enemy_components() {
        let mut world = World::new();
        let e = world.spawn_enemy(Vec2::new(5.0, 5.0), EnemyKind::Slime);

        assert!(world.enemies.contains(e));
        assert_eq!(world.health.get(e).map(|h| h.current), Some(80));
        assert_eq!(world.positions.get(e).copied(), Some(Vec2::new(5.0, 5.0)));
    }

    #[test]
    fn test_live_enemies_skips_dead() {
        let mut world = World::new();
        let a = world.spawn_enemy(Vec2::ZERO, EnemyKind::Dummy);
        let _b = world.spawn_enemy(Vec2::new(1.0, 0.0), EnemyKind::Dummy);

        if let Some(h) = world.health.get_mut(a) {
            h.damage(1000);
        }

        assert_eq!(world.live_enemies().len(), 1);
    }
}
