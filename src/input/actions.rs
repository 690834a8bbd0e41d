//! Discrete game actions
//!
//! Keyboard, mouse, touch buttons and the debug test buttons all funnel
//! into this one enum, so the simulation never sees raw input events.

/// A discrete action the player can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Basic class attack
    Attack,
    /// Dash in the current movement direction
    Dash,
    /// First class ability (Shield Block / Heal / Multi-Shot / Stealth)
    Ability1,
    /// Second class ability (Charge / Fireball / Explosive Arrow / Backstab)
    Ability2,
    /// Toggle the debug overlay
    ToggleDebug,
    /// Cycle the FPS limit (30 / 60 / unlocked)
    CycleFpsLimit,
    /// Toggle the on-screen touch controls
    ToggleTouchControls,
}

impl Action {
    pub fn label(&self) -> &'static str {
        match self {
            Action::Attack => "ATK",
            Action::Dash => "DASH",
            Action::Ability1 => "AB1",
            Action::Ability2 => "AB2",
            Action::ToggleDebug => "DBG",
            Action::CycleFpsLimit => "FPS",
            Action::ToggleTouchControls => "TCH",
        }
    }
}
