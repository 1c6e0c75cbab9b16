use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};

/// Which keys are down right now.
///
/// Terminals that speak the keyboard enhancement protocol report releases;
/// the rest only report presses and auto-repeats. There a fresh press counts
/// as held for `press_hold`, which spans the delay before the first repeat,
/// and each repeat for the shorter `repeat_hold`.
pub struct HeldKeys {
    /// Time of the last event per key, and whether it was a repeat.
    pressed: HashMap<KeyCode, (Instant, bool)>,
    releases_reported: bool,
    press_hold: Duration,
    repeat_hold: Duration,
}

impl HeldKeys {
    pub fn new(press_hold: Duration, repeat_hold: Duration) -> Self {
        Self {
            pressed: HashMap::new(),
            releases_reported: false,
            press_hold,
            repeat_hold,
        }
    }

    pub fn on_key(&mut self, key: &KeyEvent, now: Instant) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                self.pressed.insert(code, (now, false));
            }
            KeyEventKind::Repeat => {
                self.pressed.insert(code, (now, true));
            }
            KeyEventKind::Release => {
                self.releases_reported = true;
                self.pressed.remove(&code);
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, now: Instant) -> bool {
        match self.pressed.get(&normalize(code)) {
            Some(_) if self.releases_reported => true,
            Some(&(at, repeating)) => {
                let hold = if repeating { self.repeat_hold } else { self.press_hold };
                now.saturating_duration_since(at) <= hold
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}

// Shift or caps lock must not change which paddle key is down.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Last pointer cell and whether a left click arrived since the last frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pointer {
    pub cell: Option<(u16, u16)>,
    pub clicked: bool,
}

impl Pointer {
    pub fn on_mouse(&mut self, event: &MouseEvent) {
        match event.kind {
            MouseEventKind::Moved | MouseEventKind::Drag(_) => {
                self.cell = Some((event.column, event.row));
            }
            MouseEventKind::Down(MouseButton::Left) => {
                self.cell = Some((event.column, event.row));
                self.clicked = true;
            }
            _ => {}
        }
    }

    /// Returns the click edge and resets it for the next frame.
    pub fn take_click(&mut self) -> bool {
        std::mem::take(&mut self.clicked)
    }
}
