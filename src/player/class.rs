//! Character classes and their stat tables
//!
//! Each class selects an immutable stat row, looked up at spawn and on
//! class change, plus a per-level growth row applied on level-up.

use std::fmt;

/// The four playable classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Archer,
    Rogue,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Archer,
        CharacterClass::Rogue,
    ];

    /// Base stat row for this class.
    pub const fn stats(&self) -> ClassStats {
        match self {
            CharacterClass::Warrior => ClassStats {
                health: 120,
                mana: 30,
                attack: 25,
                defense: 15,
                speed: 4.0,
                weapon: "Sword",
            },
            CharacterClass::Mage => ClassStats {
                health: 80,
                mana: 100,
                attack: 30,
                defense: 5,
                speed: 3.0,
                weapon: "Staff",
            },
            CharacterClass::Archer => ClassStats {
                health: 90,
                mana: 60,
                attack: 22,
                defense: 8,
                speed: 5.0,
                weapon: "Bow",
            },
            CharacterClass::Rogue => ClassStats {
                health: 85,
                mana: 50,
                attack: 20,
                defense: 6,
                speed: 6.0,
                weapon: "Dagger",
            },
        }
    }

    /// Stat increases applied on each level-up.
    pub const fn growth(&self) -> LevelGrowth {
        match self {
            CharacterClass::Warrior => LevelGrowth {
                health: 15,
                mana: 0,
                attack: 3,
                defense: 2,
                speed: 0.0,
            },
            CharacterClass::Mage => LevelGrowth {
                health: 8,
                mana: 15,
                attack: 4,
                defense: 0,
                speed: 0.0,
            },
            CharacterClass::Archer => LevelGrowth {
                health: 10,
                mana: 8,
                attack: 3,
                defense: 0,
                speed: 0.0,
            },
            CharacterClass::Rogue => LevelGrowth {
                health: 10,
                mana: 5,
                attack: 3,
                defense: 0,
                speed: 0.2,
            },
        }
    }

    /// Next class in the cycle (for the debug class-switch button).
    pub fn next(&self) -> CharacterClass {
        match self {
            CharacterClass::Warrior => CharacterClass::Mage,
            CharacterClass::Mage => CharacterClass::Archer,
            CharacterClass::Archer => CharacterClass::Rogue,
            CharacterClass::Rogue => CharacterClass::Warrior,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Archer => "Archer",
            CharacterClass::Rogue => "Rogue",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immutable per-class stat row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassStats {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: f32,
    pub weapon: &'static str,
}

/// Per-level stat increases.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelGrowth {
    pub health: i32,
    pub mana: i32,
    pub attack: i32,
    pub defense: i32,
    pub speed: f32,
}
