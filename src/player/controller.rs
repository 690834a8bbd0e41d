//! Player controller
//!
//! The mutable player aggregate: class stats, health/mana pools,
//! movement state and the cooldown timers gating dash and attack.
//! Created at spawn, mutated every frame by `update()` and by the
//! discrete actions (attack, dash, abilities, damage, level-up).
//!
//! Invariants maintained here:
//! - 0 <= current_health <= max_health
//! - 0 <= current_mana <= max_mana
//! - timers clamp at zero, never negative

use macroquad::math::Vec2;

use super::class::CharacterClass;

/// Speed while dashing (units/sec), regardless of class speed.
pub const DASH_SPEED: f32 = 10.0;
/// How long a dash lasts.
pub const DASH_DURATION: f32 = 0.2;
/// Cooldown before the next dash.
pub const DASH_COOLDOWN: f32 = 1.0;
/// Cooldown between attacks.
pub const ATTACK_COOLDOWN: f32 = 0.5;
/// Base attack radius; classes scale this (see player::combat).
pub const ATTACK_RANGE: f32 = 2.0;
/// Mana regenerated per second.
pub const MANA_REGEN_PER_SEC: f32 = 5.0;
/// XP needed per level is level * XP_PER_LEVEL.
pub const XP_PER_LEVEL: i32 = 100;
/// Defense bonus while Shield Block is active.
pub const GUARD_DEFENSE_BONUS: i32 = 10;
/// Shield Block duration.
pub const GUARD_DURATION: f32 = 3.0;
/// Stealth duration.
pub const STEALTH_DURATION: f32 = 4.0;

pub struct PlayerController {
    pub class: CharacterClass,

    // Stats (max values come from the class row plus level growth)
    pub max_health: i32,
    pub current_health: i32,
    pub max_mana: i32,
    pub current_mana: i32,
    pub attack_power: i32,
    pub defense: i32,
    pub move_speed: f32,
    pub level: i32,
    pub experience: i32,

    /// Fractional mana regen carried between frames. Regen is ~0.08 mana
    /// per frame at 60 fps; rounding per frame would truncate it to zero.
    mana_regen_accum: f32,

    // Movement
    pub position: Vec2,
    /// Keyboard movement vector (already normalized)
    move_input: Vec2,
    /// Virtual joystick vector; takes precedence while nonzero
    mobile_input: Vec2,
    /// Last nonzero movement direction (unit vector)
    pub facing: Vec2,

    dashing: bool,
    dash_timer: f32,
    dash_cooldown_timer: f32,
    attack_timer: f32,
    guard_timer: f32,
    stealth_timer: f32,

    pub alive: bool,
}

impl PlayerController {
    pub fn new(class: CharacterClass, position: Vec2) -> Self {
        let stats = class.stats();
        Self {
            class,
            max_health: stats.health,
            current_health: stats.health,
            max_mana: stats.mana,
            current_mana: stats.mana,
            attack_power: stats.attack,
            defense: stats.defense,
            move_speed: stats.speed,
            level: 1,
            experience: 0,
            mana_regen_accum: 0.0,
            position,
            move_input: Vec2::ZERO,
            mobile_input: Vec2::ZERO,
            facing: Vec2::new(1.0, 0.0),
            dashing: false,
            dash_timer: 0.0,
            dash_cooldown_timer: 0.0,
            attack_timer: 0.0,
            guard_timer: 0.0,
            stealth_timer: 0.0,
            alive: true,
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Keyboard movement vector for this frame (normalized by the caller).
    pub fn set_move_input(&mut self, input: Vec2) {
        self.move_input = input;
    }

    /// Virtual joystick vector. A live joystick overrides the keyboard.
    pub fn set_mobile_input(&mut self, input: Vec2) {
        self.mobile_input = input;
    }

    /// The movement vector actually in effect this frame.
    pub fn effective_input(&self) -> Vec2 {
        if self.mobile_input != Vec2::ZERO {
            self.mobile_input
        } else {
            self.move_input
        }
    }

    // =========================================================================
    // Per-frame update
    // =========================================================================

    /// Tick timers and mana regen, and update facing. Call once per frame.
    pub fn update(&mut self, dt: f32) {
        if !self.alive {
            return;
        }

        // Dash timer
        if self.dashing {
            self.dash_timer = (self.dash_timer - dt).max(0.0);
            if self.dash_timer <= 0.0 {
                self.dashing = false;
            }
        }

        self.dash_cooldown_timer = (self.dash_cooldown_timer - dt).max(0.0);
        self.attack_timer = (self.attack_timer - dt).max(0.0);
        self.guard_timer = (self.guard_timer - dt).max(0.0);
        self.stealth_timer = (self.stealth_timer - dt).max(0.0);

        // Mana regeneration, accumulated fractionally
        if self.current_mana < self.max_mana {
            self.mana_regen_accum += dt * MANA_REGEN_PER_SEC;
            let whole = self.mana_regen_accum as i32;
            if whole > 0 {
                self.mana_regen_accum -= whole as f32;
                self.current_mana = (self.current_mana + whole).min(self.max_mana);
            }
        } else {
            self.mana_regen_accum = 0.0;
        }

        let input = self.effective_input();
        if input != Vec2::ZERO {
            self.facing = input.normalize_or_zero();
        }
    }

    /// Movement velocity for this frame.
    pub fn velocity(&self) -> Vec2 {
        if !self.alive {
            return Vec2::ZERO;
        }
        let speed = if self.dashing { DASH_SPEED } else { self.move_speed };
        self.effective_input() * speed
    }

    // =========================================================================
    // Discrete actions
    // =========================================================================

    /// Start a dash if moving, not already dashing, and off cooldown.
    pub fn start_dash(&mut self) -> bool {
        if self.effective_input() == Vec2::ZERO
            || self.dashing
            || self.dash_cooldown_timer > 0.0
        {
            return false;
        }
        self.force_dash();
        true
    }

    /// Start a dash unconditionally (Warrior Charge). Still arms the
    /// cooldown so charge and dash share the same gate.
    pub fn force_dash(&mut self) {
        self.dashing = true;
        self.dash_timer = DASH_DURATION;
        self.dash_cooldown_timer = DASH_COOLDOWN;
    }

    pub fn is_dashing(&self) -> bool {
        self.dashing
    }

    pub fn dash_ready(&self) -> bool {
        !self.dashing && self.dash_cooldown_timer <= 0.0
    }

    /// Whether an attack can start this frame.
    pub fn can_attack(&self) -> bool {
        self.alive && self.attack_timer <= 0.0
    }

    /// Arm the attack cooldown after a successful attack.
    pub fn begin_attack_cooldown(&mut self) {
        self.attack_timer = ATTACK_COOLDOWN;
    }

    /// Spend mana if available. Returns false (and spends nothing)
    /// when the pool is too low.
    pub fn spend_mana(&mut self, cost: i32) -> bool {
        if self.current_mana < cost {
            return false;
        }
        self.current_mana -= cost;
        true
    }

    /// Take damage, reduced by defense (and guard bonus) but always at
    /// least 1. Returns the actual damage dealt.
    pub fn take_damage(&mut self, raw: i32) -> i32 {
        let actual = (raw - self.effective_defense()).max(1);
        self.current_health = (self.current_health - actual).max(0);
        if self.current_health == 0 {
            self.alive = false;
        }
        actual
    }

    /// Heal, clamped to max health.
    pub fn heal(&mut self, amount: i32) {
        self.current_health = (self.current_health + amount).min(self.max_health);
    }

    /// Defense including the Shield Block bonus while it lasts.
    pub fn effective_defense(&self) -> i32 {
        if self.guard_timer > 0.0 {
            self.defense + GUARD_DEFENSE_BONUS
        } else {
            self.defense
        }
    }

    pub fn raise_guard(&mut self) {
        self.guard_timer = GUARD_DURATION;
    }

    pub fn guard_active(&self) -> bool {
        self.guard_timer > 0.0
    }

    pub fn enter_stealth(&mut self) {
        self.stealth_timer = STEALTH_DURATION;
    }

    pub fn break_stealth(&mut self) {
        self.stealth_timer = 0.0;
    }

    pub fn in_stealth(&self) -> bool {
        self.stealth_timer > 0.0
    }

    /// Gain experience; levels up when the threshold (level * 100) is
    /// reached. Returns the new level if one was gained.
    pub fn gain_experience(&mut self, xp: i32) -> Option<i32> {
        self.experience += xp;
        if self.experience >= self.level * XP_PER_LEVEL {
            self.level_up();
            Some(self.level)
        } else {
            None
        }
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.experience = 0;

        let growth = self.class.growth();
        self.max_health += growth.health;
        self.max_mana += growth.mana;
        self.attack_power += growth.attack;
        self.defense += growth.defense;
        self.move_speed += growth.speed;

        // Level-up fully restores both pools
        self.current_health = self.max_health;
        self.current_mana = self.max_mana;
    }

    /// Switch class: re-apply the stat row and refill both pools.
    /// Level and experience carry over. Refilling the pools also revives
    /// a dead player (this is a debug/test path, not a game mechanic).
    pub fn change_class(&mut self, class: CharacterClass) {
        self.class = class;
        self.alive = true;
        let stats = class.stats();
        self.max_health = stats.health;
        self.max_mana = stats.mana;
        self.attack_power = stats.attack;
        self.defense = stats.defense;
        self.move_speed = stats.speed;
        self.current_health = self.max_health;
        self.current_mana = self.max_mana;
        self.guard_timer = 0.0;
        self.stealth_timer = 0.0;
    }

    // =========================================================================
    // Read-only views for the HUD
    // =========================================================================

    pub fn health_fraction(&self) -> f32 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.current_health as f32 / self.max_health as f32
    }

    pub fn mana_fraction(&self) -> f32 {
        if self.max_mana <= 0 {
            return 0.0;
        }
        self.current_mana as f32 / self.max_mana as f32
    }

    pub fn weapon(&self) -> &'static str {
        self.class.stats().weapon
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> PlayerController {
        PlayerController::new(CharacterClass::Warrior, Vec2::ZERO)
    }

    #[test]
    fn test_spawn_applies_class_row() {
        let player = PlayerController::new(CharacterClass::Mage, Vec2::ZERO);
        assert_eq!(player.max_health, 80);
        assert_eq!(player.current_health, 80);
        assert_eq!(player.max_mana, 100);
        assert_eq!(player.move_speed, 3.0);
        assert_eq!(player.weapon(), "Staff");
    }

    #[test]
    fn test_dash_requires_movement() {
        let mut player = warrior();
        assert!(!player.start_dash());

        player.set_move_input(Vec2::new(1.0, 0.0));
        assert!(player.start_dash());
        assert!(player.is_dashing());

        // Dashing again during the dash is refused
        assert!(!player.start_dash());
    }

    #[test]
    fn test_dash_cooldown_clamps_at_zero() {
        let mut player = warrior();
        player.set_move_input(Vec2::new(0.0, 1.0));
        player.start_dash();

        // Dash ends after DASH_DURATION
        player.update(DASH_DURATION + 0.01);
        assert!(!player.is_dashing());
        assert!(!player.dash_ready());

        // A huge dt must not drive the timer negative
        player.update(100.0);
        assert!(player.dash_ready());
    }

    #[test]
    fn test_dash_speed_overrides_class_speed() {
        let mut player = warrior();
        player.set_move_input(Vec2::new(1.0, 0.0));
        assert_eq!(player.velocity().x, 4.0);

        player.start_dash();
        assert_eq!(player.velocity().x, DASH_SPEED);
    }

    #[test]
    fn test_mobile_input_overrides_keyboard() {
        let mut player = warrior();
        player.set_move_input(Vec2::new(1.0, 0.0));
        player.set_mobile_input(Vec2::new(0.0, -0.5));
        assert_eq!(player.effective_input(), Vec2::new(0.0, -0.5));

        player.set_mobile_input(Vec2::ZERO);
        assert_eq!(player.effective_input(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_mana_regen_accumulates_fractions() {
        let mut player = warrior();
        player.current_mana = 0;

        // 60 frames at 60 fps = 1 second = 5 mana
        for _ in 0..60 {
            player.update(1.0 / 60.0);
        }
        assert_eq!(player.current_mana, 5);
    }

    #[test]
    fn test_mana_regen_clamps_at_max() {
        let mut player = warrior();
        player.current_mana = player.max_mana - 1;
        player.update(10.0);
        assert_eq!(player.current_mana, player.max_mana);
    }

    #[test]
    fn test_take_damage_minimum_one() {
        let mut player = warrior();
        // Warrior defense 15 swallows the whole hit, but 1 still lands
        let actual = player.take_damage(5);
        assert_eq!(actual, 1);
        assert_eq!(player.current_health, 119);
    }

    #[test]
    fn test_guard_reduces_damage() {
        let mut player = warrior();
        player.raise_guard();
        let actual = player.take_damage(30);
        assert_eq!(actual, 30 - 15 - GUARD_DEFENSE_BONUS);

        player.update(GUARD_DURATION + 0.1);
        assert!(!player.guard_active());
        assert_eq!(player.take_damage(30), 15);
    }

    #[test]
    fn test_death_at_zero_health() {
        let mut player = warrior();
        player.take_damage(10_000);
        assert_eq!(player.current_health, 0);
        assert!(!player.alive);
        assert_eq!(player.velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_level_up_threshold_and_growth() {
        let mut player = warrior();
        player.take_damage(50);

        assert_eq!(player.gain_experience(50), None);
        assert_eq!(player.experience, 50);

        let leveled = player.gain_experience(60);
        assert_eq!(leveled, Some(2));
        assert_eq!(player.experience, 0);
        assert_eq!(player.max_health, 135);
        assert_eq!(player.attack_power, 28);
        // Level-up fully restores pools
        assert_eq!(player.current_health, player.max_health);

        // Next threshold is level * 100 = 200
        assert_eq!(player.gain_experience(150), None);
        assert_eq!(player.gain_experience(50), Some(3));
    }

    #[test]
    fn test_change_class_refills_pools() {
        let mut player = warrior();
        player.take_damage(40);
        player.spend_mana(20);

        player.change_class(CharacterClass::Rogue);
        assert_eq!(player.class, CharacterClass::Rogue);
        assert_eq!(player.current_health, 85);
        assert_eq!(player.current_mana, 50);
        assert_eq!(player.move_speed, 6.0);
    }

    #[test]
    fn test_spend_mana_refuses_when_low() {
        let mut player = warrior();
        player.current_mana = 4;
        assert!(!player.spend_mana(5));
        assert_eq!(player.current_mana, 4);
        assert!(player.spend_mana(4));
        assert_eq!(player.current_mana, 0);
    }

    #[test]
    fn test_attack_cooldown() {
        let mut player = warrior();
        assert!(player.can_attack());
        player.begin_attack_cooldown();
        assert!(!player.can_attack());
        player.update(ATTACK_COOLDOWN);
        assert!(player.can_attack());
    }

    #[test]
    fn test_stealth_expires() {
        let mut player = PlayerController::new(CharacterClass::Rogue, Vec2::ZERO);
        player.enter_stealth();
        assert!(player.in_stealth());
        player.update(STEALTH_DURATION + 0.1);
        assert!(!player.in_stealth());
    }
}
