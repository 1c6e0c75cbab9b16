use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::assets::{Assets, FlagIcon};
use crate::audio::{self, Audio, Sfx};
use crate::config::{KEY_PRESS_HOLD, KEY_REPEAT_HOLD};
use crate::game::physics;
use crate::game::{Opponent, PaddleInput, Session};
use crate::input::{HeldKeys, Pointer};
use crate::options::Options;
use crate::ui::Viewport;
use crate::widgets::{self, Button, ButtonAction, ImageButton};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Menu,
    Options,
    PlayingVsAi,
    PlayingCoop,
}

impl Mode {
    pub fn opponent(&self) -> Option<Opponent> {
        match self {
            Mode::PlayingVsAi => Some(Opponent::Ai),
            Mode::PlayingCoop => Some(Opponent::Human),
            Mode::Menu | Mode::Options => None,
        }
    }
}

pub struct App {
    pub should_quit: bool,
    /// Set when the display surface must be rebuilt before the next draw.
    pub needs_clear: bool,
    pub mode: Mode,
    pub options: Options,
    pub session: Session,
    pub menu_buttons: Vec<Button>,
    pub options_buttons: Vec<Button>,
    pub language_button: ImageButton,
    /// Keyboard focus within the current screen's widgets.
    pub focus: usize,
    /// Where the logical screen was last drawn; set by the renderer.
    pub viewport: Viewport,
    keys: HeldKeys,
    pointer: Pointer,
    audio: Box<dyn Audio>,
    rng: StdRng,
}

impl App {
    pub fn new(assets: Assets) -> Self {
        let options = Options::default();
        let audio = audio::open(assets.sounds, options.volume.fraction());
        Self::with_audio(audio, assets.flags, StdRng::from_entropy())
    }

    pub fn with_audio(audio: Box<dyn Audio>, flags: [FlagIcon; 2], mut rng: StdRng) -> Self {
        let options = Options::default();
        Self {
            should_quit: false,
            needs_clear: false,
            mode: Mode::Menu,
            options,
            session: Session::new(&mut rng),
            menu_buttons: widgets::menu_buttons(&options),
            options_buttons: widgets::options_buttons(&options),
            language_button: widgets::language_button(flags, options.language),
            focus: 0,
            viewport: Viewport::default(),
            keys: HeldKeys::new(KEY_PRESS_HOLD, KEY_REPEAT_HOLD),
            pointer: Pointer::default(),
            audio,
            rng,
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        let pointer = self
            .pointer
            .cell
            .and_then(|(column, row)| self.viewport.to_logical(column, row));
        let click = self.pointer.take_click();

        match self.mode {
            Mode::Menu => self.update_menu(pointer, click),
            Mode::Options => self.update_options(pointer, click),
            Mode::PlayingVsAi | Mode::PlayingCoop => self.update_game(now),
        }
    }

    pub fn on_mouse(&mut self, event: MouseEvent) {
        self.pointer.on_mouse(&event);
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) {
        self.keys.on_key(&key, now);
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Ctrl+C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            Mode::Menu => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Up | KeyCode::Down | KeyCode::Enter => self.navigate(key.code),
                _ => {}
            },
            Mode::Options => match key.code {
                KeyCode::Esc => self.activate(ButtonAction::Back),
                KeyCode::Up | KeyCode::Down | KeyCode::Enter => self.navigate(key.code),
                _ => {}
            },
            Mode::PlayingVsAi | Mode::PlayingCoop => {
                if key.code == KeyCode::Esc {
                    self.return_to_menu();
                }
            }
        }
    }

    /// Focusable widgets on the current screen, in focus order.
    fn focus_targets(&self) -> Vec<ButtonAction> {
        match self.mode {
            Mode::Menu => self.menu_buttons.iter().map(|b| b.action).collect(),
            Mode::Options => self
                .options_buttons
                .iter()
                .map(|b| b.action)
                .chain(std::iter::once(self.language_button.action))
                .collect(),
            Mode::PlayingVsAi | Mode::PlayingCoop => Vec::new(),
        }
    }

    fn navigate(&mut self, code: KeyCode) {
        let targets = self.focus_targets();
        if targets.is_empty() {
            return;
        }
        let n = targets.len();
        match code {
            KeyCode::Up => self.focus = (self.focus + n - 1) % n,
            KeyCode::Down => self.focus = (self.focus + 1) % n,
            KeyCode::Enter => {
                let action = targets[self.focus.min(n - 1)];
                self.audio.play(Sfx::Menu);
                self.activate(action);
            }
            _ => {}
        }
    }

    fn update_menu(&mut self, pointer: Option<(f32, f32)>, click: bool) {
        let mut fired = None;
        for (i, button) in self.menu_buttons.iter_mut().enumerate() {
            let was_hovered = button.hovered;
            if button.check_hover(pointer) && !was_hovered {
                self.focus = i;
            }
            if fired.is_none() && button.is_clicked(pointer, click, self.audio.as_mut()) {
                fired = Some(button.action);
            }
        }
        if let Some(action) = fired {
            self.activate(action);
        }
    }

    fn update_options(&mut self, pointer: Option<(f32, f32)>, click: bool) {
        let mut fired = None;
        for (i, button) in self.options_buttons.iter_mut().enumerate() {
            let was_hovered = button.hovered;
            if button.check_hover(pointer) && !was_hovered {
                self.focus = i;
            }
            if fired.is_none() && button.is_clicked(pointer, click, self.audio.as_mut()) {
                fired = Some(button.action);
            }
        }
        let was_hovered = self.language_button.hovered;
        if self.language_button.check_hover(pointer) {
            if !was_hovered {
                self.focus = self.options_buttons.len();
            }
            if fired.is_none()
                && self.language_button.is_clicked(pointer, click, self.audio.as_mut())
            {
                fired = Some(self.language_button.action);
            }
        }
        if let Some(action) = fired {
            self.activate(action);
        }
    }

    fn update_game(&mut self, now: Instant) {
        let Some(opponent) = self.mode.opponent() else { return };
        let input = PaddleInput {
            left_up: self.keys.is_held(KeyCode::Char('w'), now),
            left_down: self.keys.is_held(KeyCode::Char('s'), now),
            right_up: self.keys.is_held(KeyCode::Up, now),
            right_down: self.keys.is_held(KeyCode::Down, now),
        };
        let events = physics::step(&mut self.session, input, opponent, &mut self.rng);

        if events.wall_bounce {
            self.audio.play(Sfx::Wall);
        }
        if events.paddle_hit {
            self.audio.play(Sfx::Paddle);
        }
        if let Some(side) = events.scored {
            self.audio.play(Sfx::Score);
            tracing::debug!(?side, left = self.session.score.left, right = self.session.score.right, "point");
        }
    }

    pub fn activate(&mut self, action: ButtonAction) {
        match action {
            ButtonAction::PlayVsAi => self.start_game(Mode::PlayingVsAi),
            ButtonAction::PlayCoop => self.start_game(Mode::PlayingCoop),
            ButtonAction::OpenOptions => {
                widgets::relabel(&mut self.options_buttons, &self.options);
                self.set_mode(Mode::Options);
            }
            ButtonAction::Exit => {
                tracing::info!("exit requested");
                self.should_quit = true;
            }
            ButtonAction::CycleVolume => {
                self.options.volume = self.options.volume.next();
                self.audio.set_volume(self.options.volume.fraction());
                widgets::relabel(&mut self.options_buttons, &self.options);
                tracing::debug!(percent = self.options.volume.percent(), "volume changed");
            }
            ButtonAction::ToggleFullscreen => {
                self.options.fullscreen = !self.options.fullscreen;
                self.needs_clear = true;
                widgets::relabel(&mut self.options_buttons, &self.options);
                tracing::debug!(fullscreen = self.options.fullscreen, "display mode changed");
            }
            ButtonAction::Back => self.set_mode(Mode::Menu),
            ButtonAction::ToggleLanguage => {
                self.options.language = self.options.language.toggled();
                widgets::relabel(&mut self.menu_buttons, &self.options);
                widgets::relabel(&mut self.options_buttons, &self.options);
                self.language_button.set_image(self.options.language.index());
                tracing::debug!(language = ?self.options.language, "language changed");
            }
        }
    }

    fn start_game(&mut self, mode: Mode) {
        self.session.reset(&mut self.rng);
        self.keys.clear();
        self.set_mode(mode);
    }

    /// Leave play. The score is kept until the next game resets it.
    fn return_to_menu(&mut self) {
        self.menu_buttons = widgets::menu_buttons(&self.options);
        self.set_mode(Mode::Menu);
    }

    fn set_mode(&mut self, mode: Mode) {
        tracing::info!(from = ?self.mode, to = ?mode, "mode change");
        self.mode = mode;
        self.focus = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::config::{HEIGHT, PADDLE_SPEED};
    use crate::game::Score;
    use crate::i18n::Language;
    use crate::widgets::tests::placeholder_icons;
    use crossterm::event::{MouseButton, MouseEventKind};
    use ratatui::layout::Rect;

    fn setup() -> (App, RecordingAudio) {
        let audio = RecordingAudio::default();
        let mut app = App::with_audio(
            Box::new(audio.clone()),
            placeholder_icons(),
            StdRng::seed_from_u64(99),
        );
        // 10 logical units per column, 25 per row.
        app.viewport = Viewport::new(Rect::new(0, 0, 80, 24));
        (app, audio)
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Click the center cell of a logical rectangle and run one frame.
    fn click(app: &mut App, rect: crate::game::Rect) {
        let cells = app.viewport.to_cells(&rect);
        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: cells.x + cells.width / 2,
            row: cells.y + cells.height / 2,
            modifiers: KeyModifiers::NONE,
        });
        app.on_tick(Instant::now());
    }

    fn button_rect(buttons: &[Button], action: ButtonAction) -> crate::game::Rect {
        buttons.iter().find(|b| b.action == action).unwrap().rect
    }

    #[test]
    fn test_play_vs_ai_click_starts_fresh_session() {
        let (mut app, audio) = setup();
        app.session.score = Score { left: 4, right: 2 };

        let rect = button_rect(&app.menu_buttons, ButtonAction::PlayVsAi);
        click(&mut app, rect);

        assert_eq!(app.mode, Mode::PlayingVsAi);
        assert_eq!(app.session.score, Score::default());
        assert_eq!(app.session.left.rect.center_y(), HEIGHT / 2.0);
        assert_eq!(audio.played(), [Sfx::Menu]);
    }

    #[test]
    fn test_escape_returns_to_menu_and_keeps_score() {
        let (mut app, _audio) = setup();
        app.activate(ButtonAction::PlayCoop);
        assert_eq!(app.mode, Mode::PlayingCoop);
        app.session.score = Score { left: 2, right: 1 };

        app.on_key(press(KeyCode::Esc), Instant::now());

        assert_eq!(app.mode, Mode::Menu);
        assert_eq!(app.session.score, Score { left: 2, right: 1 });

        app.activate(ButtonAction::PlayCoop);
        assert_eq!(app.session.score, Score::default(), "next play resets");
    }

    #[test]
    fn test_click_without_pointer_in_button_does_nothing() {
        let (mut app, audio) = setup();
        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        });
        app.on_tick(Instant::now());
        assert_eq!(app.mode, Mode::Menu);
        assert!(audio.played().is_empty());
    }

    #[test]
    fn test_options_round_trip() {
        let (mut app, _audio) = setup();
        let rect = button_rect(&app.menu_buttons, ButtonAction::OpenOptions);
        click(&mut app, rect);
        assert_eq!(app.mode, Mode::Options);

        let rect = button_rect(&app.options_buttons, ButtonAction::Back);
        click(&mut app, rect);
        assert_eq!(app.mode, Mode::Menu);
    }

    #[test]
    fn test_volume_click_cycles_and_applies() {
        let (mut app, audio) = setup();
        app.activate(ButtonAction::OpenOptions);
        let rect = button_rect(&app.options_buttons, ButtonAction::CycleVolume);

        click(&mut app, rect);
        assert_eq!(app.options.volume.percent(), 20);
        assert_eq!(audio.volume(), Some(0.2));
        assert_eq!(app.options_buttons[0].label, "Volume: 20%");

        for _ in 0..4 {
            click(&mut app, rect);
        }
        assert_eq!(app.options.volume.percent(), 100);
        assert_eq!(audio.volume(), Some(1.0));
        assert_eq!(app.mode, Mode::Options);
    }

    #[test]
    fn test_fullscreen_toggle_requests_new_surface() {
        let (mut app, _audio) = setup();
        app.activate(ButtonAction::OpenOptions);
        app.activate(ButtonAction::ToggleFullscreen);
        assert!(app.options.fullscreen);
        assert!(app.needs_clear);
        assert_eq!(app.options_buttons[1].label, "Fullscreen: YES");
    }

    #[test]
    fn test_language_toggle_by_keyboard() {
        let (mut app, audio) = setup();
        app.activate(ButtonAction::OpenOptions);
        let now = Instant::now();
        for _ in 0..3 {
            app.on_key(press(KeyCode::Down), now);
        }
        app.on_key(press(KeyCode::Enter), now);

        assert_eq!(app.options.language, Language::Spanish);
        assert_eq!(app.language_button.icon().caption(), Some("ESP"));
        assert_eq!(app.menu_buttons[0].label, "Jugar vs IA");
        assert_eq!(app.options_buttons[2].label, "Atrás");
        assert_eq!(audio.played(), [Sfx::Menu]);

        // Actions survive the relabel.
        app.activate(ButtonAction::Back);
        app.on_key(press(KeyCode::Enter), now);
        assert_eq!(app.mode, Mode::PlayingVsAi);
    }

    #[test]
    fn test_language_icon_click() {
        let (mut app, _audio) = setup();
        app.activate(ButtonAction::OpenOptions);
        let rect = app.language_button.rect;
        click(&mut app, rect);
        assert_eq!(app.options.language, Language::Spanish);
        click(&mut app, rect);
        assert_eq!(app.options.language, Language::English);
    }

    #[test]
    fn test_menu_focus_wraps() {
        let (mut app, _audio) = setup();
        let now = Instant::now();
        app.on_key(press(KeyCode::Up), now);
        assert_eq!(app.focus, 3);
        app.on_key(press(KeyCode::Enter), now);
        assert!(app.should_quit, "last menu entry is Exit");
    }

    #[test]
    fn test_arrow_keys_work_with_mouse_parked_on_a_button() {
        let (mut app, _audio) = setup();
        let rect = button_rect(&app.menu_buttons, ButtonAction::PlayVsAi);
        let cells = app.viewport.to_cells(&rect);
        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: cells.x + cells.width / 2,
            row: cells.y,
            modifiers: KeyModifiers::NONE,
        });
        let now = Instant::now();
        app.on_tick(now);
        assert_eq!(app.focus, 0);

        app.on_key(press(KeyCode::Down), now);
        app.on_tick(now);
        app.on_tick(now);
        assert_eq!(app.focus, 1, "a resting pointer must not steal focus back");

        // Moving onto another button still takes focus.
        let rect = button_rect(&app.menu_buttons, ButtonAction::Exit);
        let cells = app.viewport.to_cells(&rect);
        app.on_mouse(MouseEvent {
            kind: MouseEventKind::Moved,
            column: cells.x + cells.width / 2,
            row: cells.y,
            modifiers: KeyModifiers::NONE,
        });
        app.on_tick(now);
        assert_eq!(app.focus, 3);
    }

    #[test]
    fn test_single_press_moves_paddle_until_repeats_start() {
        let (mut app, _audio) = setup();
        app.activate(ButtonAction::PlayCoop);
        let t0 = Instant::now();
        let start = app.session.left.rect.y;

        app.on_key(press(KeyCode::Char('w')), t0);
        for frame in 0..20u32 {
            app.on_tick(t0 + crate::config::FRAME_PERIOD * frame);
        }

        assert_eq!(app.session.left.rect.y, start - 20.0 * PADDLE_SPEED);
    }

    #[test]
    fn test_quit_keys() {
        let (mut app, _audio) = setup();
        app.activate(ButtonAction::PlayVsAi);
        app.on_key(press(KeyCode::Char('q')), Instant::now());
        assert!(!app.should_quit, "q only quits from the menu");

        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), Instant::now());
        assert!(app.should_quit);
    }

    #[test]
    fn test_held_key_moves_paddle() {
        let (mut app, _audio) = setup();
        app.activate(ButtonAction::PlayCoop);
        let now = Instant::now();
        let left = app.session.left.rect.y;
        let right = app.session.right.rect.y;

        app.on_key(press(KeyCode::Char('w')), now);
        app.on_key(press(KeyCode::Down), now);
        app.on_tick(now);

        assert_eq!(app.session.left.rect.y, left - PADDLE_SPEED);
        assert_eq!(app.session.right.rect.y, right + PADDLE_SPEED);
    }

    #[test]
    fn test_gameplay_sounds_follow_events() {
        let (mut app, audio) = setup();
        app.activate(ButtonAction::PlayCoop);
        app.session.ball.rect.y = 2.0;
        app.session.ball.vy = -5.0;
        app.on_tick(Instant::now());
        assert!(audio.played().contains(&Sfx::Wall));
    }

    #[test]
    fn test_menu_ignores_ticks_while_playing_state_is_idle() {
        let (mut app, _audio) = setup();
        let before = app.session.clone();
        app.on_tick(Instant::now());
        assert_eq!(app.session, before, "physics only runs while playing");
    }
}
