//! Debug overlay (F1)
//!
//! Player stat dump, live input panel and clickable test buttons. The
//! buttons go through the same entry points as the real controls, so
//! everything stays testable from a mouse on desktop. Nothing here
//! mutates game state directly; clicks are reported to the main loop.

use macroquad::color::{Color, GRAY, LIGHTGRAY, WHITE, YELLOW};
use macroquad::input::{is_mouse_button_pressed, mouse_position, touches, MouseButton};
use macroquad::shapes::{draw_rectangle, draw_rectangle_lines};
use macroquad::text::draw_text;
use macroquad::math::Vec2;
use macroquad::window::{screen_height, screen_width};

use crate::game::GameState;
use crate::input::TouchControls;

use super::rect::Rect;

/// What a debug button does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugAction {
    Attack,
    Dash,
    Ability1,
    Ability2,
    /// Take 20 raw damage
    TakeDamage,
    /// Grant 50 XP
    GrantXp,
    /// Cycle to the next class
    CycleClass,
}

impl DebugAction {
    pub const ALL: [DebugAction; 7] = [
        DebugAction::Attack,
        DebugAction::Dash,
        DebugAction::Ability1,
        DebugAction::Ability2,
        DebugAction::TakeDamage,
        DebugAction::GrantXp,
        DebugAction::CycleClass,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DebugAction::Attack => "Attack (T)",
            DebugAction::Dash => "Dash (Y)",
            DebugAction::Ability1 => "Ability 1 (U)",
            DebugAction::Ability2 => "Ability 2 (I)",
            DebugAction::TakeDamage => "Take 20 DMG",
            DebugAction::GrantXp => "+50 XP",
            DebugAction::CycleClass => "Cycle Class",
        }
    }
}

const PANEL_W: f32 = 300.0;
const BUTTON_H: f32 = 26.0;
const BUTTON_GAP: f32 = 6.0;
const MARGIN: f32 = 10.0;
/// Vertical space reserved for the info lines above the button strip.
const BUTTONS_TOP: f32 = 240.0;

/// One rect per test button, laid out as a vertical strip inside the
/// panel below `buttons_top`.
fn button_rects(panel: Rect, buttons_top: f32) -> [(DebugAction, Rect); 7] {
    let inner = panel.pad(MARGIN);
    let mut y = buttons_top;
    DebugAction::ALL.map(|action| {
        let rect = Rect::new(inner.x, y, inner.w, BUTTON_H);
        y += BUTTON_H + BUTTON_GAP;
        (action, rect)
    })
}

pub struct DebugOverlay {
    pub visible: bool,
}

impl DebugOverlay {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    fn panel(&self) -> Rect {
        Rect::new(
            screen_width() - PANEL_W - MARGIN,
            100.0,
            PANEL_W,
            (screen_height() - 140.0).max(300.0),
        )
    }

    /// Check for a button click this frame. Call before the keyboard
    /// poll so the click is not also treated as an attack.
    pub fn hit_test(&self) -> Option<DebugAction> {
        if !self.visible || !is_mouse_button_pressed(MouseButton::Left) {
            return None;
        }
        let mouse = Vec2::from(mouse_position());
        let panel = self.panel();
        let buttons_top = panel.y + BUTTONS_TOP;
        button_rects(panel, buttons_top)
            .into_iter()
            .find(|(_, rect)| rect.contains(mouse))
            .map(|(action, _)| action)
    }

    pub fn draw(&self, game: &GameState, touch: &TouchControls) {
        if !self.visible {
            return;
        }

        let panel = self.panel();
        draw_rectangle(panel.x, panel.y, panel.w, panel.h, Color::new(0.0, 0.0, 0.0, 0.75));
        draw_rectangle_lines(panel.x, panel.y, panel.w, panel.h, 2.0, GRAY);

        let x = panel.x + MARGIN;
        let mut y = panel.y + 24.0;
        let mut line = |text: &str, color: Color, y: &mut f32| {
            draw_text(text, x, *y, 18.0, color);
            *y += 20.0;
        };

        line("DEBUG (F1)", YELLOW, &mut y);

        let p = &game.player;
        line(
            &format!("{}  Lv {}  XP {}", p.class, p.level, p.experience),
            WHITE,
            &mut y,
        );
        line(
            &format!(
                "HP {}/{}  MP {}/{}",
                p.current_health, p.max_health, p.current_mana, p.max_mana
            ),
            WHITE,
            &mut y,
        );
        line(
            &format!("ATK {}  DEF {}  SPD {:.1}", p.attack_power, p.effective_defense(), p.move_speed),
            WHITE,
            &mut y,
        );
        line(
            &format!("Dash ready: {}", p.dash_ready()),
            WHITE,
            &mut y,
        );

        let (mx, my) = mouse_position();
        line(
            &format!("Touches: {}  Claimed: {}", touches().len(), touch.active_pointers()),
            LIGHTGRAY,
            &mut y,
        );
        line(&format!("Mouse: {:.0}, {:.0}", mx, my), LIGHTGRAY, &mut y);
        line(
            &format!("Screen: {:.0}x{:.0}", screen_width(), screen_height()),
            LIGHTGRAY,
            &mut y,
        );
        let joy = touch.joystick_input();
        line(
            &format!("Joystick: {:.2}, {:.2}", joy.x, joy.y),
            LIGHTGRAY,
            &mut y,
        );

        if let Some(usage) = memory_stats::memory_stats() {
            line(
                &format!("Mem: {:.1} MB", usage.physical_mem as f64 / (1024.0 * 1024.0)),
                LIGHTGRAY,
                &mut y,
            );
        }

        // Test buttons
        let buttons_top = panel.y + BUTTONS_TOP;
        for (action, rect) in button_rects(panel, buttons_top) {
            draw_rectangle(rect.x, rect.y, rect.w, rect.h, Color::new(0.2, 0.2, 0.3, 1.0));
            draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, GRAY);
            draw_text(action.label(), rect.x + 8.0, rect.y + 18.0, 18.0, WHITE);
        }
    }
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_strip_stays_inside_panel() {
        let panel = Rect::new(500.0, 100.0, PANEL_W, 400.0);
        let rects = button_rects(panel, panel.y + BUTTONS_TOP);

        for (_, rect) in rects {
            assert!(rect.x >= panel.x);
            assert!(rect.right() <= panel.right());
        }
    }

    #[test]
    fn test_buttons_do_not_overlap() {
        let panel = Rect::new(0.0, 0.0, PANEL_W, 500.0);
        let rects = button_rects(panel, 100.0);

        for pair in rects.windows(2) {
            assert!(pair[0].1.bottom() <= pair[1].1.y);
        }
    }

    #[test]
    fn test_every_action_gets_a_button() {
        let rects = button_rects(Rect::new(0.0, 0.0, PANEL_W, 500.0), 0.0);
        assert_eq!(rects.len(), DebugAction::ALL.len());
        for (i, (action, _)) in rects.iter().enumerate() {
            assert_eq!(*action, DebugAction::ALL[i]);
        }
    }
}
