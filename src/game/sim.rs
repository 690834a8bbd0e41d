//! Simulation driver
//!
//! `GameState` owns the world, the event queues and the player, and runs
//! the per-frame tick: input feeds the controller, the controller moves,
//! queued actions resolve into damage, damage resolves into deaths, XP
//! and respawns. Drawing reads this state but never writes it.

use macroquad::color::{Color, BROWN, DARKGREEN, GREEN, ORANGE, PURPLE, RED, SKYBLUE, WHITE, YELLOW};
use macroquad::math::Vec2;
use macroquad::shapes::{draw_circle, draw_circle_lines, draw_rectangle, draw_rectangle_lines};
use macroquad::text::draw_text;
use macroquad::window::{screen_height, screen_width};

use crate::input::Action;
use crate::player::class::CharacterClass;
use crate::player::combat::{self, AbilityOutcome, AttackOutcome};
use crate::player::controller::PlayerController;
use crate::ui::rect::Rect;

use super::components::EnemyKind;
use super::event::{DeathEvent, Events, LevelUpEvent};
use super::world::World;

/// Seconds before a killed enemy's spawn point produces a new one.
pub const RESPAWN_SECONDS: f32 = 5.0;
/// World units drawn per screen pixel.
pub const PIXELS_PER_UNIT: f32 = 48.0;
/// Arena half-extents in world units.
pub const ARENA_HALF_W: f32 = 8.0;
pub const ARENA_HALF_H: f32 = 5.0;

const STATUS_SECONDS: f64 = 2.5;
const POPUP_SECONDS: f32 = 0.9;
const POPUP_RISE: f32 = 0.8;

struct Status {
    text: String,
    expires_at: f64,
}

/// Floating damage number, spawned from damage events.
pub struct DamagePopup {
    pub position: Vec2,
    pub text: String,
    pub critical: bool,
    pub age: f32,
}

pub struct GameState {
    pub world: World,
    pub events: Events,
    pub player: PlayerController,
    pub arena: Rect,
    time: f64,
    status: Option<Status>,
    popups: Vec<DamagePopup>,
    pending: Vec<Action>,
}

impl GameState {
    pub fn new(class: CharacterClass) -> Self {
        let mut world = World::new();

        // A ring of training dummies around the center, plus a tougher
        // slime at each side. Spawn points produce them on the first tick.
        for i in 0..6 {
            let angle = i as f32 / 6.0 * std::f32::consts::TAU;
            let pos = Vec2::new(angle.cos(), angle.sin()) * 4.0;
            world.spawn_point(pos, EnemyKind::Dummy);
        }
        world.spawn_point(Vec2::new(-6.5, 0.0), EnemyKind::Slime);
        world.spawn_point(Vec2::new(6.5, 0.0), EnemyKind::Slime);

        Self {
            world,
            events: Events::new(),
            player: PlayerController::new(class, Vec2::ZERO),
            arena: Rect::centered(ARENA_HALF_W, ARENA_HALF_H),
            time: 0.0,
            status: None,
            popups: Vec::new(),
            pending: Vec::new(),
        }
    }

    /// Queue a game action for the next tick. System toggles are handled
    /// by the main loop and ignored here.
    pub fn queue_action(&mut self, action: Action) {
        match action {
            Action::Attack | Action::Dash | Action::Ability1 | Action::Ability2 => {
                self.pending.push(action)
            }
            _ => {}
        }
    }

    /// Advance the simulation one frame. Movement input must already be
    /// set on the controller.
    pub fn tick(&mut self, dt: f32) {
        self.time += dt as f64;

        self.player.update(dt);

        // Integrate movement, clamped to the arena
        let next = self.player.position + self.player.velocity() * dt;
        self.player.position = self.arena.clamp_point(next);

        let actions = std::mem::take(&mut self.pending);
        for action in actions {
            self.resolve_action(action);
        }

        self.update_spawn_points(dt);
        self.apply_damage();
        self.resolve_deaths();

        for ev in self.events.level_up.iter() {
            self.popups.push(DamagePopup {
                position: self.player.position,
                text: format!("LEVEL {}!", ev.level),
                critical: true,
                age: 0.0,
            });
        }

        for popup in &mut self.popups {
            popup.age += dt;
        }
        self.popups.retain(|p| p.age < POPUP_SECONDS);

        self.world.flush_despawns();
        self.events.clear_all();
    }

    fn resolve_action(&mut self, action: Action) {
        if !self.player.alive {
            return;
        }
        match action {
            Action::Attack => {
                if !self.player.can_attack() {
                    return;
                }
                let roll = macroquad::rand::gen_range(0, 100) as u32;
                match combat::perform_attack(&mut self.player, &self.world, &mut self.events, roll)
                {
                    AttackOutcome::Hit { .. } | AttackOutcome::Miss => {
                        self.player.begin_attack_cooldown();
                    }
                    AttackOutcome::NoMana => self.set_status("Not enough mana!"),
                }
            }
            Action::Dash => {
                if self.player.start_dash() {
                    self.set_status(format!("{} dashes forward!", self.player.class));
                }
            }
            Action::Ability1 => {
                match combat::use_ability1(&mut self.player, &self.world, &mut self.events) {
                    AbilityOutcome::Done(msg) => self.set_status(msg),
                    AbilityOutcome::NoMana => self.set_status("Not enough mana!"),
                }
            }
            Action::Ability2 => {
                match combat::use_ability2(&mut self.player, &self.world, &mut self.events) {
                    AbilityOutcome::Done(msg) => self.set_status(msg),
                    AbilityOutcome::NoMana => self.set_status("Not enough mana!"),
                }
            }
            _ => {}
        }
    }

    fn update_spawn_points(&mut self, dt: f32) {
        let mut due: Vec<u32> = Vec::new();
        for (idx, point) in self.world.spawn_points.iter_mut() {
            if let Some(timer) = &mut point.respawn_timer {
                *timer -= dt;
                if *timer <= 0.0 {
                    due.push(idx);
                }
            }
        }

        for idx in due {
            let Some(point_entity) = self.world.entity_at(idx) else {
                continue;
            };
            let Some(point) = self.world.spawn_points.get(point_entity).copied() else {
                continue;
            };
            let enemy = self.world.spawn_enemy(point.position, point.kind);
            if let Some(point) = self.world.spawn_points.get_mut(point_entity) {
                point.respawn_timer = None;
                point.spawned = Some(enemy);
            }
        }
    }

    fn apply_damage(&mut self) {
        let hits: Vec<_> = self.events.damage.drain().collect();
        for hit in hits {
            self.popups.push(DamagePopup {
                position: hit.position,
                text: if hit.critical {
                    format!("-{} CRIT", hit.amount)
                } else {
                    format!("-{}", hit.amount)
                },
                critical: hit.critical,
                age: 0.0,
            });

            let Some(health) = self.world.health.get_mut(hit.target) else {
                continue;
            };
            // A second killing blow in the same frame must not report
            // death (and award XP) again
            if health.is_dead() {
                continue;
            }
            if health.damage(hit.amount) {
                let xp = self
                    .world
                    .enemies
                    .get(hit.target)
                    .map(|e| e.kind.xp_award())
                    .unwrap_or(0);
                self.events.death.send(DeathEvent {
                    entity: hit.target,
                    position: hit.position,
                    xp_award: xp,
                });
            }
        }
    }

    fn resolve_deaths(&mut self) {
        let deaths: Vec<_> = self.events.death.drain().collect();
        for death in deaths {
            let kind = self.world.enemies.get(death.entity).map(|e| e.kind);
            self.world.despawn(death.entity);

            // Rearm the spawn point that owned this enemy
            for (_, point) in self.world.spawn_points.iter_mut() {
                if point.spawned == Some(death.entity) {
                    point.spawned = None;
                    point.respawn_timer = Some(RESPAWN_SECONDS);
                }
            }

            if let Some(kind) = kind {
                self.set_status(format!(
                    "{} defeated! +{} XP",
                    kind.label(),
                    death.xp_award
                ));
                self.popups.push(DamagePopup {
                    position: death.position,
                    text: format!("+{} XP", death.xp_award),
                    critical: false,
                    age: 0.0,
                });
            }
            if let Some(level) = self.player.gain_experience(death.xp_award) {
                self.events.level_up.send(LevelUpEvent { level });
                self.set_status(format!("Level up! Now level {level}"));
                println!("Level up! Now level {level}");
            }
        }
    }

    // =========================================================================
    // Debug/test entry points (same paths the overlay buttons use)
    // =========================================================================

    pub fn debug_damage_player(&mut self, raw: i32) {
        let actual = self.player.take_damage(raw);
        self.popups.push(DamagePopup {
            position: self.player.position,
            text: format!("-{actual}"),
            critical: false,
            age: 0.0,
        });
        if self.player.alive {
            self.set_status(format!("Took {actual} damage"));
        } else {
            self.set_status("You died! (switch class to restart)");
        }
    }

    pub fn debug_grant_xp(&mut self, xp: i32) {
        if let Some(level) = self.player.gain_experience(xp) {
            // Same event as a combat level-up, so the popup shows too
            self.events.level_up.send(LevelUpEvent { level });
            self.set_status(format!("Level up! Now level {level}"));
        } else {
            self.set_status(format!("+{xp} XP"));
        }
    }

    pub fn debug_cycle_class(&mut self) {
        let next = self.player.class.next();
        self.player.change_class(next);
        self.set_status(format!("Class changed to {next}"));
    }

    // =========================================================================
    // Status line
    // =========================================================================

    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = Some(Status {
            text: text.into(),
            expires_at: self.time + STATUS_SECONDS,
        });
    }

    pub fn status_line(&self) -> Option<&str> {
        self.status
            .as_ref()
            .filter(|s| s.expires_at > self.time)
            .map(|s| s.text.as_str())
    }

    // =========================================================================
    // Drawing
    // =========================================================================

    /// World units to screen pixels, arena centered on the window.
    pub fn world_to_screen(&self, pos: Vec2) -> Vec2 {
        let center = Rect::screen(screen_width(), screen_height()).center();
        center + pos * PIXELS_PER_UNIT
    }

    pub fn draw(&self) {
        // Arena bounds
        let tl = self.world_to_screen(Vec2::new(self.arena.x, self.arena.y));
        draw_rectangle_lines(
            tl.x,
            tl.y,
            self.arena.w * PIXELS_PER_UNIT,
            self.arena.h * PIXELS_PER_UNIT,
            2.0,
            Color::new(1.0, 1.0, 1.0, 0.25),
        );

        // Enemies with a small health bar above each
        for (entity, pos, kind) in self.world.live_enemies() {
            let screen = self.world_to_screen(pos);
            let radius = kind.radius() * PIXELS_PER_UNIT;
            let color = match kind {
                EnemyKind::Dummy => BROWN,
                EnemyKind::Slime => GREEN,
            };
            draw_circle(screen.x, screen.y, radius, color);

            if let Some(health) = self.world.health.get(entity) {
                let bar_w = radius * 2.0;
                let bar_y = screen.y - radius - 8.0;
                draw_rectangle(screen.x - radius, bar_y, bar_w, 4.0, Color::new(0.0, 0.0, 0.0, 0.5));
                draw_rectangle(
                    screen.x - radius,
                    bar_y,
                    bar_w * health.fraction(),
                    4.0,
                    RED,
                );
            }
        }

        self.draw_player();

        for popup in &self.popups {
            let screen = self.world_to_screen(popup.position);
            let rise = popup.age / POPUP_SECONDS * POPUP_RISE * PIXELS_PER_UNIT;
            let color = if popup.critical { ORANGE } else { YELLOW };
            draw_text(&popup.text, screen.x, screen.y - 20.0 - rise, 22.0, color);
        }
    }

    fn draw_player(&self) {
        let screen = self.world_to_screen(self.player.position);
        let radius = 0.5 * PIXELS_PER_UNIT;

        let mut color = class_color(self.player.class);
        if !self.player.alive {
            color = Color::new(0.3, 0.3, 0.3, 1.0);
        } else if self.player.in_stealth() {
            color.a = 0.35;
        }
        draw_circle(screen.x, screen.y, radius, color);

        if self.player.guard_active() {
            draw_circle_lines(screen.x, screen.y, radius + 5.0, 3.0, SKYBLUE);
        }
        if self.player.is_dashing() {
            draw_circle_lines(screen.x, screen.y, radius + 10.0, 2.0, WHITE);
        }

        // Facing tick on the rim
        let tip = screen + self.player.facing * radius;
        draw_circle(tip.x, tip.y, 5.0, WHITE);
    }
}

fn class_color(class: CharacterClass) -> Color {
    match class {
        CharacterClass::Warrior => RED,
        CharacterClass::Mage => SKYBLUE,
        CharacterClass::Archer => DARKGREEN,
        CharacterClass::Rogue => PURPLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> GameState {
        GameState::new(CharacterClass::Warrior)
    }

    #[test]
    fn test_arena_populates_on_first_tick() {
        let mut game = game();
        assert!(game.world.live_enemies().is_empty());

        game.tick(1.0 / 60.0);
        // 6 dummies + 2 slimes
        assert_eq!(game.world.live_enemies().len(), 8);
    }

    #[test]
    fn test_kill_awards_xp_and_respawns() {
        let mut game = game();
        game.tick(1.0 / 60.0);

        let (_, pos, kind) = game.world.live_enemies()[0];
        assert_eq!(kind, EnemyKind::Dummy);

        // Stand on the dummy and one-shot it
        game.player.position = pos;
        game.player.attack_power = 1000;
        game.queue_action(Action::Attack);
        game.tick(1.0 / 60.0);

        assert_eq!(game.world.live_enemies().len(), 7);
        assert_eq!(game.player.experience, 25);
        assert!(game.status_line().is_some());

        // Not back yet
        game.tick(RESPAWN_SECONDS - 1.0);
        assert_eq!(game.world.live_enemies().len(), 7);

        // Timer elapses, dummy respawns at its point
        game.tick(1.5);
        assert_eq!(game.world.live_enemies().len(), 8);
    }

    #[test]
    fn test_overkill_in_one_frame_awards_xp_once() {
        let mut game = game();
        game.tick(1.0 / 60.0);

        // Stand on a dummy and land both a basic attack and a Charge
        // sweep in the same frame
        let (_, pos, _) = game.world.live_enemies()[0];
        game.player.position = pos;
        game.player.attack_power = 1000;
        game.queue_action(Action::Attack);
        game.queue_action(Action::Ability2);
        game.tick(1.0 / 60.0);

        assert_eq!(game.world.live_enemies().len(), 7);
        assert_eq!(game.player.experience, 25);
    }

    #[test]
    fn test_player_clamped_to_arena() {
        let mut game = game();
        game.player.set_move_input(Vec2::new(1.0, 0.0));
        for _ in 0..100 {
            game.tick(0.5);
        }
        assert_eq!(game.player.position.x, game.arena.right());
    }

    #[test]
    fn test_attack_cooldown_limits_swings() {
        let mut game = game();
        game.tick(1.0 / 60.0);
        let (_, pos, _) = game.world.live_enemies()[0];
        game.player.position = pos;

        // Two attacks in quick succession: only one lands a cooldown
        game.queue_action(Action::Attack);
        game.tick(1.0 / 60.0);
        game.queue_action(Action::Attack);
        game.tick(1.0 / 60.0);

        // Second swing was refused, dummy took one hit of 25 on 50 HP
        let dummy = game.world.live_enemies()[0].0;
        assert_eq!(
            game.world.health.get(dummy).map(|h| h.current),
            Some(25)
        );
    }

    #[test]
    fn test_status_expires() {
        let mut game = game();
        game.set_status("hello");
        assert_eq!(game.status_line(), Some("hello"));

        game.tick(3.0);
        assert_eq!(game.status_line(), None);
    }

    #[test]
    fn test_debug_damage_can_kill_and_class_switch_revives() {
        let mut game = game();
        game.debug_damage_player(10_000);
        assert!(!game.player.alive);

        game.debug_cycle_class();
        assert!(game.player.alive);
        assert_eq!(game.player.class, CharacterClass::Mage);
        assert_eq!(game.player.current_health, game.player.max_health);
    }

    #[test]
    fn test_debug_grant_xp_levels_up() {
        let mut game = game();
        game.debug_grant_xp(100);
        assert_eq!(game.player.level, 2);
        assert_eq!(game.status_line(), Some("Level up! Now level 2"));

        // The next tick turns the event into the same popup a combat
        // level-up gets
        game.tick(1.0 / 60.0);
        assert!(game.popups.iter().any(|p| p.text == "LEVEL 2!"));
    }

    #[test]
    fn test_dash_refused_without_movement_gives_no_status() {
        let mut game = game();
        game.queue_action(Action::Dash);
        game.tick(1.0 / 60.0);
        assert!(!game.player.is_dashing());
        assert_eq!(game.status_line(), None);
    }
}
