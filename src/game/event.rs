//! Event queues
//!
//! Combat resolution, XP handling and the HUD communicate through event
//! queues instead of calling into each other. Events are collected during
//! the frame and cleared at the end of the tick.

use macroquad::math::Vec2;

use super::entity::Entity;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events, clearing the queue.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all game events.
pub struct Events {
    /// Damage dealt to an enemy
    pub damage: EventQueue<DamageEvent>,

    /// An enemy died
    pub death: EventQueue<DeathEvent>,

    /// The player leveled up
    pub level_up: EventQueue<LevelUpEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            damage: EventQueue::new(),
            death: EventQueue::new(),
            level_up: EventQueue::new(),
        }
    }

    /// Clear all event queues. Call at end of frame.
    pub fn clear_all(&mut self) {
        self.damage.clear();
        self.death.clear();
        self.level_up.clear();
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Damage was dealt to an entity
#[derive(Debug, Clone, Copy)]
pub struct DamageEvent {
    /// Who got hit
    pub target: Entity,
    /// Amount of damage
    pub amount: i32,
    /// Was this a critical hit (rogue dagger / stealth strike)
    pub critical: bool,
    /// Where the hit occurred (for damage popups)
    pub position: Vec2,
}

/// An entity died
#[derive(Debug, Clone, Copy)]
pub struct DeathEvent {
    /// Who died
    pub entity: Entity,
    /// Where they died
    pub position: Vec2,
    /// Experience awarded to the player
    pub xp_award: i32,
}

/// The player gained a level
#[derive(Debug, Clone, Copy)]
pub struct LevelUpEvent {
    /// The new level
    pub level: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();

        queue.send(1);
        queue.send(2);
        queue.send(3);

        assert_eq!(queue.len(), 3);

        let collected: Vec<_> = queue.drain().collect();
        assert_eq!(collected, vec![1, 2, 3]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_events_container() {
        let mut events = Events::new();

        events.damage.send(DamageEvent {
            target: Entity::new(0, 0),
            amount: 10,
            critical: false,
            position: Vec2::ZERO,
        });

        assert_eq!(events.damage.len(), 1);

        events.clear_all();
        assert!(events.damage.is_empty());
    }
}
