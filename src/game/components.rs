//! Game components
//!
//! Plain data structs attached to entities. Behavior lives in the
//! simulation tick and in `player::combat`.

/// Health for damageable entities.
#[derive(Debug, Clone, Copy)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    /// Apply damage, clamping at zero. Returns true if this killed the entity.
    pub fn damage(&mut self, amount: i32) -> bool {
        self.current = (self.current - amount).max(0);
        self.current == 0
    }

    pub fn heal(&mut self, amount: i32) {
        self.current = (self.current + amount).min(self.max);
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn fraction(&self) -> f32 {
        if self.max <= 0 {
            return 0.0;
        }
        self.current as f32 / self.max as f32
    }
}

/// What kind of enemy an entity is. Determines health pool and XP award.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    /// Stationary training dummy
    Dummy,
    /// Slightly tougher target
    Slime,
}

impl EnemyKind {
    pub fn max_health(&self) -> i32 {
        match self {
            EnemyKind::Dummy => 50,
            EnemyKind::Slime => 80,
        }
    }

    pub fn xp_award(&self) -> i32 {
        match self {
            EnemyKind::Dummy => 25,
            EnemyKind::Slime => 40,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EnemyKind::Dummy => "Dummy",
            EnemyKind::Slime => "Slime",
        }
    }

    /// Body radius for the combat range scan and for drawing.
    pub fn radius(&self) -> f32 {
        match self {
            EnemyKind::Dummy => 0.5,
            EnemyKind::Slime => 0.6,
        }
    }
}

/// Marks enemy entities.
#[derive(Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyKind,
}

/// Rearms a dead enemy's slot: when the timer reaches zero a fresh enemy
/// of the same kind spawns at the stored position.
#[derive(Debug, Clone, Copy)]
pub struct SpawnPoint {
    pub position: macroquad::math::Vec2,
    pub kind: EnemyKind,
    /// Seconds until respawn; None while the enemy is alive
    pub respawn_timer: Option<f32>,
    /// The enemy this point currently keeps alive
    pub spawned: Option<super::entity::Entity>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_clamps_at_zero() {
        let mut health = Health::new(50);
        assert!(!health.damage(30));
        assert_eq!(health.current, 20);

        // Overkill still clamps to zero and reports death
        assert!(health.damage(100));
        assert_eq!(health.current, 0);
        assert!(health.is_dead());
    }

    #[test]
    fn test_heal_clamps_at_max() {
        let mut health = Health::new(50);
        health.damage(10);
        health.heal(100);
        assert_eq!(health.current, 50);
    }

    #[test]
    fn test_fraction() {
        let mut health = Health::new(100);
        health.damage(25);
        assert!((health.fraction() - 0.75).abs() < f32::EPSILON);
    }
}
