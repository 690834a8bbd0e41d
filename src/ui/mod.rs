//! HUD and debug overlays
//!
//! Read-only views over the game state plus the layout primitives they
//! share with the touch controls.

pub mod debug;
pub mod hud;
pub mod rect;

pub use debug::DebugOverlay;
pub use hud::Hud;
pub use rect::Rect;
