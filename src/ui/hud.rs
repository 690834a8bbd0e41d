//! In-game HUD
//!
//! Status line, FPS counter and the player info block with health and
//! mana bars. Strictly a read-only view over `GameState`.

use macroquad::color::{Color, BLUE, GOLD, GREEN, RED, WHITE};
use macroquad::shapes::draw_rectangle;
use macroquad::text::{draw_text, measure_text};
use macroquad::window::screen_width;

use crate::game::GameState;

/// Frames-per-second averaged over one-second windows.
///
/// Reads 0 until the first full window has elapsed, then updates once
/// per second; a per-frame instantaneous readout is useless for judging
/// pacing.
pub struct FpsCounter {
    frames: u32,
    elapsed: f32,
    fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self {
            frames: 0,
            elapsed: 0.0,
            fps: 0,
        }
    }

    /// Record one frame of `dt` seconds.
    pub fn frame(&mut self, dt: f32) {
        self.frames += 1;
        self.elapsed += dt;
        if self.elapsed >= 1.0 {
            self.fps = self.frames;
            self.frames = 0;
            self.elapsed = 0.0;
        }
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Green when comfortable, gold when borderline, red when bad.
    pub fn color(&self) -> Color {
        if self.fps >= 50 {
            GREEN
        } else if self.fps >= 30 {
            GOLD
        } else {
            RED
        }
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Hud {
    pub fps: FpsCounter,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            fps: FpsCounter::new(),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.fps.frame(dt);
    }

    pub fn draw(&self, game: &GameState, show_fps: bool) {
        let player = &game.player;

        // Translucent strip behind the info block and status line
        let strip = crate::ui::Rect::screen(screen_width(), macroquad::window::screen_height())
            .slice_top(90.0);
        draw_rectangle(strip.x, strip.y, strip.w, strip.h, Color::new(0.0, 0.0, 0.0, 0.25));

        // Player info block, top-left
        let info = format!(
            "{}  Lv {}  ({})",
            player.class,
            player.level,
            player.weapon()
        );
        draw_text(&info, 10.0, 24.0, 24.0, WHITE);

        draw_bar(10.0, 34.0, 180.0, 14.0, player.health_fraction(), RED);
        draw_text(
            &format!("HP {}/{}", player.current_health, player.max_health),
            14.0,
            45.0,
            16.0,
            WHITE,
        );

        draw_bar(10.0, 52.0, 180.0, 14.0, player.mana_fraction(), BLUE);
        draw_text(
            &format!("MP {}/{}", player.current_mana, player.max_mana),
            14.0,
            63.0,
            16.0,
            WHITE,
        );

        draw_text(
            &format!(
                "XP {}/{}",
                player.experience,
                player.level * crate::player::controller::XP_PER_LEVEL
            ),
            10.0,
            84.0,
            18.0,
            Color::new(0.8, 0.8, 0.8, 1.0),
        );

        // Status line, centered near the top
        if let Some(status) = game.status_line() {
            let size = measure_text(status, None, 26, 1.0);
            draw_text(
                status,
                (screen_width() - size.width) / 2.0,
                40.0,
                26.0,
                GOLD,
            );
        }

        if show_fps {
            let text = format!("FPS: {}", self.fps.fps());
            let size = measure_text(&text, None, 22, 1.0);
            draw_text(
                &text,
                screen_width() - size.width - 10.0,
                24.0,
                22.0,
                self.fps.color(),
            );
        }
    }
}

impl Default for Hud {
    fn default() -> Self {
        Self::new()
    }
}

fn draw_bar(x: f32, y: f32, w: f32, h: f32, fraction: f32, color: Color) {
    draw_rectangle(x, y, w, h, Color::new(0.0, 0.0, 0.0, 0.6));
    draw_rectangle(x, y, w * fraction.clamp(0.0, 1.0), h, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    // Power-of-two frame times keep the accumulated window exact.

    #[test]
    fn test_fps_reads_zero_before_first_window() {
        let mut counter = FpsCounter::new();
        for _ in 0..30 {
            counter.frame(1.0 / 64.0);
        }
        assert_eq!(counter.fps(), 0);
    }

    #[test]
    fn test_fps_counts_frames_per_window() {
        let mut counter = FpsCounter::new();
        for _ in 0..64 {
            counter.frame(1.0 / 64.0);
        }
        assert_eq!(counter.fps(), 64);

        // Next window at a slower rate
        for _ in 0..32 {
            counter.frame(1.0 / 32.0);
        }
        assert_eq!(counter.fps(), 32);
    }

    #[test]
    fn test_fps_color_thresholds() {
        let mut counter = FpsCounter::new();

        for _ in 0..64 {
            counter.frame(1.0 / 64.0);
        }
        assert_eq!(counter.color(), GREEN);

        for _ in 0..32 {
            counter.frame(1.0 / 32.0);
        }
        assert_eq!(counter.color(), GOLD);

        for _ in 0..16 {
            counter.frame(1.0 / 16.0);
        }
        assert_eq!(counter.color(), RED);
    }
}
