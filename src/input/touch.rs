//! On-screen touch controls
//!
//! Virtual joystick anchored bottom-left plus four round action buttons
//! bottom-right. Every active pointer is tracked by id with the role it
//! claimed on touch-begin, so a button press can never steal the
//! joystick and a joystick drag can never fire a button.
//!
//! On desktop the mouse emulates a single touch pointer, which makes the
//! whole layer testable without a touchscreen.

use std::collections::HashMap;

use macroquad::color::Color;
use macroquad::input::{
    is_mouse_button_down, is_mouse_button_pressed, mouse_position, touches, TouchPhase,
};
use macroquad::math::Vec2;
use macroquad::shapes::draw_circle;
use macroquad::text::draw_text;
use macroquad::window::{screen_height, screen_width};

use super::actions::Action;

/// Maximum joystick deflection in pixels; offsets beyond this clamp to
/// the rim.
pub const JOYSTICK_RANGE: f32 = 50.0;
/// Radius of the joystick background pad.
pub const JOYSTICK_PAD_RADIUS: f32 = 90.0;
/// Radius of the draggable handle.
pub const JOYSTICK_HANDLE_RADIUS: f32 = 35.0;
/// Radius of each action button.
pub const BUTTON_RADIUS: f32 = 40.0;

/// Pointer id used for the emulated mouse touch.
const MOUSE_POINTER: u64 = u64::MAX;

/// What a pointer grabbed when it went down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchRole {
    Joystick,
    Button(Action),
}

/// Screen-space placement of the controls, recomputed each frame from
/// the window size. Joystick bottom-left, action buttons bottom-right.
#[derive(Debug, Clone, Copy)]
pub struct TouchLayout {
    pub joystick_center: Vec2,
    pub buttons: [(Action, Vec2); 4],
}

impl TouchLayout {
    pub fn compute(screen_w: f32, screen_h: f32) -> Self {
        Self {
            joystick_center: Vec2::new(140.0, screen_h - 140.0),
            buttons: [
                (Action::Attack, Vec2::new(screen_w - 80.0, screen_h - 80.0)),
                (Action::Dash, Vec2::new(screen_w - 80.0, screen_h - 180.0)),
                (Action::Ability1, Vec2::new(screen_w - 80.0, screen_h - 280.0)),
                (Action::Ability2, Vec2::new(screen_w - 180.0, screen_h - 130.0)),
            ],
        }
    }

    /// Role for a touch that begins at `point`, if it hits anything.
    pub fn hit_test(&self, point: Vec2) -> Option<TouchRole> {
        for (action, center) in self.buttons {
            if point.distance(center) <= BUTTON_RADIUS {
                return Some(TouchRole::Button(action));
            }
        }
        if point.distance(self.joystick_center) <= JOYSTICK_PAD_RADIUS {
            return Some(TouchRole::Joystick);
        }
        None
    }
}

/// Offset from the joystick center, clamped to the range and normalized
/// into [-1, 1]² with magnitude <= 1.
pub fn joystick_vector(center: Vec2, touch: Vec2, range: f32) -> Vec2 {
    let offset = touch - center;
    let clamped = if offset.length() > range {
        offset.normalize_or_zero() * range
    } else {
        offset
    };
    clamped / range
}

pub struct TouchControls {
    pub enabled: bool,
    /// Role claimed by each active pointer id
    roles: HashMap<u64, TouchRole>,
    joystick_input: Vec2,
    pending: Vec<Action>,
    layout: TouchLayout,
}

impl TouchControls {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            roles: HashMap::new(),
            joystick_input: Vec2::ZERO,
            pending: Vec::new(),
            layout: TouchLayout::compute(screen_width(), screen_height()),
        }
    }

    /// Poll touches (and the emulated mouse pointer) for this frame.
    pub fn update(&mut self) {
        self.layout = TouchLayout::compute(screen_width(), screen_height());

        if !self.enabled {
            self.roles.clear();
            self.joystick_input = Vec2::ZERO;
            return;
        }

        for touch in touches() {
            match touch.phase {
                TouchPhase::Started => self.pointer_down(touch.id, touch.position),
                TouchPhase::Moved | TouchPhase::Stationary => {
                    self.pointer_moved(touch.id, touch.position)
                }
                TouchPhase::Ended | TouchPhase::Cancelled => self.pointer_up(touch.id),
            }
        }

        // Mouse emulation: one extra pointer on desktop
        let mouse = Vec2::from(mouse_position());
        if is_mouse_button_pressed(macroquad::input::MouseButton::Left) {
            self.pointer_down(MOUSE_POINTER, mouse);
        } else if is_mouse_button_down(macroquad::input::MouseButton::Left) {
            self.pointer_moved(MOUSE_POINTER, mouse);
        } else {
            self.pointer_up(MOUSE_POINTER);
        }
    }

    pub fn pointer_down(&mut self, id: u64, position: Vec2) {
        let Some(role) = self.layout.hit_test(position) else {
            return;
        };
        // The joystick takes a single pointer
        if role == TouchRole::Joystick && self.joystick_claimed() {
            return;
        }
        self.roles.insert(id, role);
        match role {
            TouchRole::Joystick => {
                self.joystick_input =
                    joystick_vector(self.layout.joystick_center, position, JOYSTICK_RANGE);
            }
            TouchRole::Button(action) => self.pending.push(action),
        }
    }

    pub fn pointer_moved(&mut self, id: u64, position: Vec2) {
        if self.roles.get(&id) == Some(&TouchRole::Joystick) {
            self.joystick_input =
                joystick_vector(self.layout.joystick_center, position, JOYSTICK_RANGE);
        }
    }

    pub fn pointer_up(&mut self, id: u64) {
        if let Some(role) = self.roles.remove(&id) {
            if role == TouchRole::Joystick {
                self.joystick_input = Vec2::ZERO;
            }
        }
    }

    fn joystick_claimed(&self) -> bool {
        self.roles.values().any(|r| *r == TouchRole::Joystick)
    }

    /// Current joystick vector, Vec2::ZERO while idle.
    pub fn joystick_input(&self) -> Vec2 {
        self.joystick_input
    }

    /// True while the emulated mouse pointer owns a control, so a click
    /// on the joystick does not also swing the sword.
    pub fn mouse_claimed(&self) -> bool {
        self.roles.contains_key(&MOUSE_POINTER)
    }

    /// Number of pointers currently holding a control.
    pub fn active_pointers(&self) -> usize {
        self.roles.len()
    }

    /// Button presses collected this frame.
    pub fn drain_actions(&mut self) -> Vec<Action> {
        std::mem::take(&mut self.pending)
    }

    pub fn draw(&self) {
        if !self.enabled {
            return;
        }

        let pad = Color::new(1.0, 1.0, 1.0, 0.18);
        let handle = Color::new(1.0, 1.0, 1.0, 0.45);
        let button = Color::new(1.0, 1.0, 1.0, 0.25);

        let center = self.layout.joystick_center;
        draw_circle(center.x, center.y, JOYSTICK_PAD_RADIUS, pad);
        let knob = center + self.joystick_input * JOYSTICK_RANGE;
        draw_circle(knob.x, knob.y, JOYSTICK_HANDLE_RADIUS, handle);

        for (action, pos) in self.layout.buttons {
            draw_circle(pos.x, pos.y, BUTTON_RADIUS, button);
            let label = action.label();
            let width = label.len() as f32 * 8.0;
            draw_text(label, pos.x - width / 2.0, pos.y + 5.0, 18.0, handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TouchLayout {
        TouchLayout::compute(800.0, 600.0)
    }

    fn controls() -> TouchControls {
        TouchControls {
            enabled: true,
            roles: HashMap::new(),
            joystick_input: Vec2::ZERO,
            pending: Vec::new(),
            layout: layout(),
        }
    }

    #[test]
    fn test_joystick_vector_inside_range() {
        let v = joystick_vector(Vec2::new(100.0, 100.0), Vec2::new(125.0, 100.0), 50.0);
        assert_eq!(v, Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_joystick_vector_clamps_to_rim() {
        let v = joystick_vector(Vec2::new(100.0, 100.0), Vec2::new(400.0, 100.0), 50.0);
        assert!((v.length() - 1.0).abs() < 1e-5);
        assert_eq!(v, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_hit_test_prefers_buttons() {
        let layout = layout();
        let (action, center) = layout.buttons[0];
        assert_eq!(layout.hit_test(center), Some(TouchRole::Button(action)));
        assert_eq!(
            layout.hit_test(layout.joystick_center),
            Some(TouchRole::Joystick)
        );
        assert_eq!(layout.hit_test(Vec2::new(400.0, 10.0)), None);
    }

    #[test]
    fn test_only_claiming_pointer_drags_joystick() {
        let mut controls = controls();
        let center = controls.layout.joystick_center;

        controls.pointer_down(1, center);
        assert_eq!(controls.joystick_input(), Vec2::ZERO);

        // A second pointer on the pad is ignored
        controls.pointer_down(2, center + Vec2::new(10.0, 0.0));
        assert_eq!(controls.active_pointers(), 1);

        // Only pointer 1 moves the stick
        controls.pointer_moved(2, center + Vec2::new(50.0, 0.0));
        assert_eq!(controls.joystick_input(), Vec2::ZERO);
        controls.pointer_moved(1, center + Vec2::new(50.0, 0.0));
        assert_eq!(controls.joystick_input(), Vec2::new(1.0, 0.0));

        controls.pointer_up(1);
        assert_eq!(controls.joystick_input(), Vec2::ZERO);
    }

    #[test]
    fn test_button_touch_does_not_steal_joystick() {
        let mut controls = controls();
        let center = controls.layout.joystick_center;
        let (action, button_pos) = controls.layout.buttons[1];

        controls.pointer_down(7, center + Vec2::new(20.0, 0.0));
        controls.pointer_down(8, button_pos);

        assert_eq!(controls.drain_actions(), vec![action]);
        // Joystick still tracks pointer 7
        controls.pointer_moved(7, center + Vec2::new(25.0, 0.0));
        assert_eq!(controls.joystick_input(), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_touch_outside_controls_is_ignored() {
        let mut controls = controls();
        controls.pointer_down(3, Vec2::new(400.0, 300.0));
        assert_eq!(controls.active_pointers(), 0);
        assert!(controls.drain_actions().is_empty());
    }

    #[test]
    fn test_mouse_claim_flag() {
        let mut controls = controls();
        let center = controls.layout.joystick_center;

        assert!(!controls.mouse_claimed());
        controls.pointer_down(MOUSE_POINTER, center);
        assert!(controls.mouse_claimed());
        controls.pointer_up(MOUSE_POINTER);
        assert!(!controls.mouse_claimed());
    }
}
