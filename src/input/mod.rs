//! Input translation
//!
//! Raw macroquad input (keyboard, mouse, touch) is translated into a
//! movement vector plus discrete `Action`s once per frame. Nothing past
//! this module ever looks at key codes or pointer ids.

pub mod actions;
pub mod state;
pub mod touch;

pub use actions::Action;
pub use state::InputState;
pub use touch::TouchControls;
