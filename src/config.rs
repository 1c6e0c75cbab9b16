//! Compile-time configuration: screen geometry, gameplay tuning and asset paths.

use std::time::Duration;

pub const WINDOW_TITLE: &str = "Complete Pong";

// Logical screen. Everything in `game` and `widgets` lives in these units.
pub const WIDTH: f32 = 800.0;
pub const HEIGHT: f32 = 600.0;

pub const PADDLE_WIDTH: f32 = 15.0;
pub const PADDLE_HEIGHT: f32 = 100.0;
/// Distance between a paddle and its side of the screen.
pub const PADDLE_MARGIN: f32 = 50.0;
pub const PADDLE_SPEED: f32 = 7.0;
pub const AI_PADDLE_SPEED: f32 = PADDLE_SPEED - 1.0;

pub const BALL_SIZE: f32 = 15.0;
pub const INITIAL_BALL_SPEED: f32 = 5.0;
pub const MAX_BALL_SPEED: f32 = 10.0;
pub const PADDLE_BOUNCE_GAIN: f32 = 1.1;

pub const BUTTON_WIDTH: f32 = 450.0;
pub const BUTTON_HEIGHT: f32 = 60.0;
pub const FLAG_ICON_SIZE: u32 = 64;

/// Music plays at this fraction of the effect volume.
pub const MUSIC_VOLUME_RATIO: f32 = 0.5;

/// Written in the working directory; `RUST_LOG` sets the level (default warn).
pub const LOG_FILE: &str = "rustpong.log";

pub const FRAME_PERIOD: Duration = Duration::from_millis(16); // ~60 FPS
// Without release reporting a key counts as held for a while after each event:
// long enough after the first press to cover the OS auto-repeat delay, short
// once repeats are arriving.
pub const KEY_PRESS_HOLD: Duration = Duration::from_millis(500);
pub const KEY_REPEAT_HOLD: Duration = Duration::from_millis(120);

pub const SOUND_PADDLE: &str = "paddle.wav";
pub const SOUND_WALL: &str = "wall.wav";
pub const SOUND_SCORE: &str = "score.wav";
pub const SOUND_MENU: &str = "menu.wav";
pub const MUSIC_BACKGROUND: &str = "background.mp3";
pub const FLAG_ENGLISH: &str = "english_flag.png";
pub const FLAG_SPANISH: &str = "spanish_flag.png";
