//! PIXEL-RPG: a small 2D action-RPG prototype
//!
//! Four classes, an arena full of training dummies, and a mobile-style
//! control layer (virtual joystick + touch buttons) that also works with
//! mouse and keyboard:
//! - WASD / arrows to move, Space to dash
//! - Z or left-click to attack, 1/2 for class abilities
//! - T/Y/U/I mirror attack/dash/ability1/ability2 for quick testing
//! - F1 debug overlay, F2 FPS limit, F3 touch controls

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod game;
mod input;
mod player;
mod settings;
mod ui;

use macroquad::prelude::*;

use game::GameState;
use input::{Action, InputState, TouchControls};
use player::CharacterClass;
use settings::Settings;
use ui::debug::DebugAction;
use ui::{DebugOverlay, Hud};

fn window_conf() -> Conf {
    Conf {
        window_title: format!("PIXEL-RPG v{}", VERSION),
        window_width: 1280,
        window_height: 720,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let mut settings = Settings::load();

    println!(
        "PIXEL-RPG v{} | screen {:.0}x{:.0} | fps limit {}",
        VERSION,
        screen_width(),
        screen_height(),
        settings.fps_limit.label()
    );
    if let Some(usage) = memory_stats::memory_stats() {
        println!(
            "Memory at startup: {:.1} MB",
            usage.physical_mem as f64 / (1024.0 * 1024.0)
        );
    }

    let mut game = GameState::new(CharacterClass::Warrior);
    let mut touch = TouchControls::new(settings.touch_controls);
    let mut hud = Hud::new();
    let mut debug = DebugOverlay::new();

    game.set_status("Welcome! WASD to move, Z to attack, F1 for debug");

    loop {
        let frame_start = get_time();
        let dt = get_frame_time();

        // Input: touch first, then keyboard/mouse. The keyboard poll must
        // know whether the mouse was already captured by the touch layer
        // or a debug button this frame.
        touch.update();
        let debug_click = debug.hit_test();
        let input = InputState::poll(touch.mouse_claimed() || debug_click.is_some());

        if input.action_pressed(Action::ToggleDebug) {
            debug.toggle();
        }
        if input.action_pressed(Action::CycleFpsLimit) {
            settings.fps_limit = settings.fps_limit.next();
            game.set_status(format!("FPS limit: {}", settings.fps_limit.label()));
            if let Err(e) = settings.save() {
                eprintln!("Failed to save settings: {}", e);
            }
        }
        if input.action_pressed(Action::ToggleTouchControls) {
            settings.touch_controls = !settings.touch_controls;
            touch.enabled = settings.touch_controls;
            game.set_status(if settings.touch_controls {
                "Touch controls on"
            } else {
                "Touch controls off"
            });
            if let Err(e) = settings.save() {
                eprintln!("Failed to save settings: {}", e);
            }
        }

        game.player.set_move_input(input.move_axis());
        game.player.set_mobile_input(touch.joystick_input());

        for action in input.pressed_actions() {
            game.queue_action(*action);
        }
        for action in touch.drain_actions() {
            game.queue_action(action);
        }
        match debug_click {
            Some(DebugAction::Attack) => game.queue_action(Action::Attack),
            Some(DebugAction::Dash) => game.queue_action(Action::Dash),
            Some(DebugAction::Ability1) => game.queue_action(Action::Ability1),
            Some(DebugAction::Ability2) => game.queue_action(Action::Ability2),
            Some(DebugAction::TakeDamage) => game.debug_damage_player(20),
            Some(DebugAction::GrantXp) => game.debug_grant_xp(50),
            Some(DebugAction::CycleClass) => game.debug_cycle_class(),
            None => {}
        }

        game.tick(dt);
        hud.update(dt);

        clear_background(Color::new(0.08, 0.08, 0.1, 1.0));
        game.draw();
        touch.draw();
        hud.draw(&game, settings.show_fps);
        debug.draw(&game, &touch);

        // FPS limiting
        if let Some(target_frame_time) = settings.fps_limit.frame_time() {
            let elapsed = get_time() - frame_start;
            let remaining = target_frame_time - elapsed;

            if remaining > 0.0 {
                // Native: use sleep for bulk, then spin-wait for precision
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let spin_margin = 0.002; // 2ms
                    while get_time() - frame_start + spin_margin < target_frame_time {
                        std::thread::sleep(std::time::Duration::from_millis(1));
                    }
                    while get_time() - frame_start < target_frame_time {
                        std::hint::spin_loop();
                    }
                }
                // WASM: just spin-wait (no thread::sleep available)
                #[cfg(target_arch = "wasm32")]
                {
                    while get_time() - frame_start < target_frame_time {
                        // Busy wait - browser will handle frame pacing
                    }
                }
            }
        }

        next_frame().await;
    }
}
