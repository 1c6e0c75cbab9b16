use ratatui::style::Color;

use crate::assets::FlagIcon;
use crate::audio::{Audio, Sfx};
use crate::config::{BUTTON_HEIGHT, BUTTON_WIDTH, FLAG_ICON_SIZE, HEIGHT, WIDTH};
use crate::game::Rect;
use crate::i18n::{fullscreen_label, text, volume_label, Language, TextKey};
use crate::options::Options;

/// What a widget does when activated. Independent of its label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ButtonAction {
    PlayVsAi,
    PlayCoop,
    OpenOptions,
    Exit,
    CycleVolume,
    ToggleFullscreen,
    Back,
    ToggleLanguage,
}

impl ButtonAction {
    /// Label for this action in the given language and settings.
    pub fn label(&self, options: &Options) -> String {
        let lang = options.language;
        match self {
            ButtonAction::PlayVsAi => text(lang, TextKey::PlayVsAi).to_string(),
            ButtonAction::PlayCoop => text(lang, TextKey::PlayCoop).to_string(),
            ButtonAction::OpenOptions => text(lang, TextKey::OptionsButton).to_string(),
            ButtonAction::Exit => text(lang, TextKey::Exit).to_string(),
            ButtonAction::CycleVolume => volume_label(lang, options.volume.percent()),
            ButtonAction::ToggleFullscreen => fullscreen_label(lang, options.fullscreen),
            ButtonAction::Back => text(lang, TextKey::Back).to_string(),
            ButtonAction::ToggleLanguage => text(lang, TextKey::Language).to_string(),
        }
    }
}

/// Outlined text button.
#[derive(Clone, Debug)]
pub struct Button {
    pub rect: Rect,
    pub label: String,
    pub action: ButtonAction,
    pub color: Color,
    pub hover_color: Color,
    pub hovered: bool,
}

impl Button {
    /// A standard-size button horizontally centered on `center_x` with its top at `y`.
    pub fn new(center_x: f32, y: f32, label: impl Into<String>, action: ButtonAction) -> Self {
        Self {
            rect: Rect::new(center_x - BUTTON_WIDTH / 2.0, y, BUTTON_WIDTH, BUTTON_HEIGHT),
            label: label.into(),
            action,
            color: Color::White,
            hover_color: Color::Rgb(50, 255, 50),
            hovered: false,
        }
    }

    pub fn check_hover(&mut self, pointer: Option<(f32, f32)>) -> bool {
        self.hovered = pointer.is_some_and(|(x, y)| self.rect.contains(x, y));
        self.hovered
    }

    /// Pointer inside and a click this frame. Plays the menu sound on success.
    pub fn is_clicked(&self, pointer: Option<(f32, f32)>, click: bool, audio: &mut dyn Audio) -> bool {
        let clicked = click && pointer.is_some_and(|(x, y)| self.rect.contains(x, y));
        if clicked {
            audio.play(Sfx::Menu);
        }
        clicked
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn current_color(&self, focused: bool) -> Color {
        if self.hovered || focused { self.hover_color } else { self.color }
    }
}

/// Toggle showing one of two preloaded icons.
#[derive(Clone, Debug)]
pub struct ImageButton {
    pub rect: Rect,
    pub action: ButtonAction,
    pub hovered: bool,
    icons: [FlagIcon; 2],
    current: usize,
}

impl ImageButton {
    pub fn new(center_x: f32, y: f32, size: f32, icons: [FlagIcon; 2], action: ButtonAction) -> Self {
        Self {
            rect: Rect::new(center_x - size / 2.0, y, size, size),
            action,
            hovered: false,
            icons,
            current: 0,
        }
    }

    pub fn check_hover(&mut self, pointer: Option<(f32, f32)>) -> bool {
        self.hovered = pointer.is_some_and(|(x, y)| self.rect.contains(x, y));
        self.hovered
    }

    pub fn is_clicked(&self, pointer: Option<(f32, f32)>, click: bool, audio: &mut dyn Audio) -> bool {
        let clicked = click && pointer.is_some_and(|(x, y)| self.rect.contains(x, y));
        if clicked {
            audio.play(Sfx::Menu);
        }
        clicked
    }

    /// Out-of-range indices are ignored.
    pub fn set_image(&mut self, index: usize) {
        if index < self.icons.len() {
            self.current = index;
        }
    }

    pub fn icon(&self) -> &FlagIcon {
        &self.icons[self.current]
    }
}

pub fn menu_buttons(options: &Options) -> Vec<Button> {
    let cx = WIDTH / 2.0;
    let cy = HEIGHT / 2.0;
    [
        (cy - 100.0, ButtonAction::PlayVsAi),
        (cy, ButtonAction::PlayCoop),
        (cy + 100.0, ButtonAction::OpenOptions),
        (cy + 200.0, ButtonAction::Exit),
    ]
    .into_iter()
    .map(|(y, action)| Button::new(cx, y, action.label(options), action))
    .collect()
}

pub fn options_buttons(options: &Options) -> Vec<Button> {
    let cx = WIDTH / 2.0;
    let cy = HEIGHT / 2.0;
    [
        (cy - 120.0, ButtonAction::CycleVolume),
        (cy - 30.0, ButtonAction::ToggleFullscreen),
        (cy + 60.0, ButtonAction::Back),
    ]
    .into_iter()
    .map(|(y, action)| Button::new(cx, y, action.label(options), action))
    .collect()
}

pub fn language_button(icons: [FlagIcon; 2], lang: Language) -> ImageButton {
    let mut button = ImageButton::new(
        WIDTH / 2.0,
        HEIGHT / 2.0 + 150.0,
        FLAG_ICON_SIZE as f32,
        icons,
        ButtonAction::ToggleLanguage,
    );
    button.set_image(lang.index());
    button
}

/// Re-resolve every label from the current settings.
pub fn relabel(buttons: &mut [Button], options: &Options) {
    for button in buttons {
        let label = button.action.label(options);
        button.set_label(label);
    }
}
