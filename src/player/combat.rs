//! Combat resolution
//!
//! Turns player attacks and abilities into `DamageEvent`s against the
//! enemies in the world. All range checks are a bounded linear scan over
//! live enemies; the arena only ever holds a handful.
//!
//! Randomness (the rogue's crit roll) is passed in by the caller so the
//! functions here stay deterministic under test.

use macroquad::math::Vec2;

use crate::game::event::{DamageEvent, Events};
use crate::game::world::World;

use super::class::CharacterClass;
use super::controller::{PlayerController, ATTACK_RANGE};

pub const MAGE_ATTACK_COST: i32 = 10;
pub const GUARD_COST: i32 = 5;
pub const HEAL_COST: i32 = 15;
pub const HEAL_AMOUNT: i32 = 20;
pub const MULTI_SHOT_COST: i32 = 8;
pub const MULTI_SHOT_TARGETS: usize = 3;
pub const STEALTH_COST: i32 = 10;
pub const FIREBALL_COST: i32 = 20;
/// Percent chance for a rogue basic attack to crit.
pub const ROGUE_CRIT_CHANCE: u32 = 30;

/// What a basic attack attempt amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Landed on this many targets
    Hit { targets: u32, critical: bool },
    /// Swung but nothing was in range (cooldown is still consumed)
    Miss,
    /// Refused before the swing
    NoMana,
}

/// Result of an ability attempt, carrying the status-line message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AbilityOutcome {
    Done(String),
    NoMana,
}

/// Per-class basic attack. `crit_roll` is a uniform sample in [0, 100)
/// used only by the rogue.
pub fn perform_attack(
    player: &mut PlayerController,
    world: &World,
    events: &mut Events,
    crit_roll: u32,
) -> AttackOutcome {
    let power = player.attack_power;
    let (range_mul, damage, critical) = match player.class {
        CharacterClass::Warrior => (1.0, power, false),
        CharacterClass::Mage => {
            // Longer reach and a mana cost; the x1.5 damage bonus
            // belongs to Fireball, not the basic missile
            if !player.spend_mana(MAGE_ATTACK_COST) {
                return AttackOutcome::NoMana;
            }
            (1.5, power, false)
        }
        CharacterClass::Archer => (2.0, power, false),
        CharacterClass::Rogue => {
            // Attacking from stealth always crits and breaks stealth
            let crit = player.in_stealth() || crit_roll < ROGUE_CRIT_CHANCE;
            if player.in_stealth() {
                player.break_stealth();
            }
            (0.8, if crit { power * 2 } else { power }, crit)
        }
    };

    let hits = deal_damage_in_range(
        world,
        events,
        player.position,
        ATTACK_RANGE * range_mul,
        damage,
        critical,
        None,
    );

    if hits > 0 {
        AttackOutcome::Hit {
            targets: hits,
            critical,
        }
    } else {
        AttackOutcome::Miss
    }
}

/// First class ability: Shield Block / Heal / Multi-Shot / Stealth.
pub fn use_ability1(
    player: &mut PlayerController,
    world: &World,
    events: &mut Events,
) -> AbilityOutcome {
    match player.class {
        CharacterClass::Warrior => {
            if !player.spend_mana(GUARD_COST) {
                return AbilityOutcome::NoMana;
            }
            player.raise_guard();
            AbilityOutcome::Done("Warrior raises shield!".to_string())
        }
        CharacterClass::Mage => {
            if !player.spend_mana(HEAL_COST) {
                return AbilityOutcome::NoMana;
            }
            player.heal(HEAL_AMOUNT);
            AbilityOutcome::Done(format!("Mage heals for {HEAL_AMOUNT} HP!"))
        }
        CharacterClass::Archer => {
            if !player.spend_mana(MULTI_SHOT_COST) {
                return AbilityOutcome::NoMana;
            }
            let hits = deal_damage_in_range(
                world,
                events,
                player.position,
                ATTACK_RANGE * 2.0,
                player.attack_power,
                false,
                Some(MULTI_SHOT_TARGETS),
            );
            AbilityOutcome::Done(format!("Multi-Shot hits {hits} target(s)!"))
        }
        CharacterClass::Rogue => {
            if !player.spend_mana(STEALTH_COST) {
                return AbilityOutcome::NoMana;
            }
            player.enter_stealth();
            AbilityOutcome::Done("Rogue vanishes into the shadows!".to_string())
        }
    }
}

/// Second class ability: Charge / Fireball / Explosive Arrow / Backstab.
pub fn use_ability2(
    player: &mut PlayerController,
    world: &World,
    events: &mut Events,
) -> AbilityOutcome {
    match player.class {
        CharacterClass::Warrior => {
            // Charge: forced dash plus a melee sweep
            player.force_dash();
            let hits = deal_damage_in_range(
                world,
                events,
                player.position,
                ATTACK_RANGE,
                player.attack_power,
                false,
                None,
            );
            AbilityOutcome::Done(format!("Warrior charges forward! ({hits} hit)"))
        }
        CharacterClass::Mage => {
            if !player.spend_mana(FIREBALL_COST) {
                return AbilityOutcome::NoMana;
            }
            let damage = (player.attack_power as f32 * 1.5) as i32;
            let hits = deal_damage_in_range(
                world,
                events,
                player.position,
                ATTACK_RANGE * 1.5,
                damage,
                false,
                None,
            );
            AbilityOutcome::Done(format!("Mage casts fireball! ({hits} hit)"))
        }
        CharacterClass::Archer => {
            let damage = (player.attack_power as f32 * 1.2) as i32;
            let hits = deal_damage_in_range(
                world,
                events,
                player.position,
                ATTACK_RANGE * 2.0,
                damage,
                false,
                None,
            );
            AbilityOutcome::Done(format!("Explosive arrow! ({hits} hit)"))
        }
        CharacterClass::Rogue => {
            // Backstab hits only the nearest target, at double damage
            let hits = deal_damage_in_range(
                world,
                events,
                player.position,
                ATTACK_RANGE * 0.8,
                player.attack_power * 2,
                true,
                Some(1),
            );
            if hits > 0 {
                AbilityOutcome::Done("Backstab!".to_string())
            } else {
                AbilityOutcome::Done("Backstab finds no target".to_string())
            }
        }
    }
}

/// Send a `DamageEvent` to every live enemy within `range` of `origin`,
/// nearest first. `max_targets` caps the number of hits (Multi-Shot,
/// Backstab). Returns the number of enemies hit.
pub fn deal_damage_in_range(
    world: &World,
    events: &mut Events,
    origin: Vec2,
    range: f32,
    damage: i32,
    critical: bool,
    max_targets: Option<usize>,
) -> u32 {
    let mut in_range: Vec<(f32, crate::game::entity::Entity, Vec2)> = world
        .live_enemies()
        .into_iter()
        .filter_map(|(entity, pos, kind)| {
            let dist = origin.distance(pos);
            // The enemy body counts toward reach
            if dist - kind.radius() <= range {
                Some((dist, entity, pos))
            } else {
                None
            }
        })
        .collect();

    in_range.sort_by(|a, b| a.0.total_cmp(&b.0));
    if let Some(cap) = max_targets {
        in_range.truncate(cap);
    }

    for (_, entity, pos) in &in_range {
        events.damage.send(DamageEvent {
            target: *entity,
            amount: damage,
            critical,
            position: *pos,
        });
    }

    in_range.len() as u32
}
