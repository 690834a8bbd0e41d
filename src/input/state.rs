//! Keyboard and mouse polling
//!
//! Snapshot of the desktop input for one frame. Touch input is handled
//! separately by `TouchControls`; when the touch layer has claimed the
//! mouse pointer (emulated touch), the click is not also an attack.

use macroquad::input::{
    is_key_pressed, is_mouse_button_pressed, KeyCode, MouseButton,
};
use macroquad::math::Vec2;

use super::actions::Action;

pub struct InputState {
    move_axis: Vec2,
    pressed: Vec<Action>,
}

impl InputState {
    /// Poll macroquad for this frame. `mouse_claimed` is true when the
    /// touch layer already owns the mouse pointer this frame.
    pub fn poll(mouse_claimed: bool) -> Self {
        use macroquad::input::is_key_down;

        let mut axis = Vec2::ZERO;
        if is_key_down(KeyCode::W) || is_key_down(KeyCode::Up) {
            axis.y -= 1.0;
        }
        if is_key_down(KeyCode::S) || is_key_down(KeyCode::Down) {
            axis.y += 1.0;
        }
        if is_key_down(KeyCode::A) || is_key_down(KeyCode::Left) {
            axis.x -= 1.0;
        }
        if is_key_down(KeyCode::D) || is_key_down(KeyCode::Right) {
            axis.x += 1.0;
        }
        // Diagonals must not be faster than straight lines
        if axis.length_squared() > 1.0 {
            axis = axis.normalize_or_zero();
        }

        let mut pressed = Vec::new();

        // T/Y/U/I mirror the four game actions for quick testing
        if is_key_pressed(KeyCode::Z)
            || is_key_pressed(KeyCode::T)
            || (!mouse_claimed && is_mouse_button_pressed(MouseButton::Left))
        {
            pressed.push(Action::Attack);
        }
        if is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Y) {
            pressed.push(Action::Dash);
        }
        if is_key_pressed(KeyCode::Key1) || is_key_pressed(KeyCode::U) {
            pressed.push(Action::Ability1);
        }
        if is_key_pressed(KeyCode::Key2) || is_key_pressed(KeyCode::I) {
            pressed.push(Action::Ability2);
        }
        if is_key_pressed(KeyCode::F1) {
            pressed.push(Action::ToggleDebug);
        }
        if is_key_pressed(KeyCode::F2) {
            pressed.push(Action::CycleFpsLimit);
        }
        if is_key_pressed(KeyCode::F3) {
            pressed.push(Action::ToggleTouchControls);
        }

        Self {
            move_axis: axis,
            pressed,
        }
    }

    /// Movement vector from WASD / arrow keys, magnitude <= 1.
    pub fn move_axis(&self) -> Vec2 {
        self.move_axis
    }

    /// Edge-triggered: was this action pressed this frame?
    pub fn action_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// All actions pressed this frame, in poll order.
    pub fn pressed_actions(&self) -> &[Action] {
        &self.pressed
    }
}
