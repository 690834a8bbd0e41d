//! Player state and combat
//!
//! Class stat tables, the mutable controller aggregate, and the combat
//! resolution that turns attacks into damage events.

pub mod class;
pub mod combat;
pub mod controller;

pub use class::CharacterClass;
pub use controller::PlayerController;
