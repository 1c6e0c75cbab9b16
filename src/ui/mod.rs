pub mod field;
pub mod menu;
mod viewport;

pub use viewport::Viewport;

use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Mode};
use crate::config::WINDOW_TITLE;

pub const BLACK: Color = Color::Rgb(0, 0, 0);
pub const WHITE: Color = Color::Rgb(255, 255, 255);
pub const RED: Color = Color::Rgb(255, 50, 50);
pub const BLUE: Color = Color::Rgb(50, 50, 255);
pub const GRAY: Color = Color::Rgb(100, 100, 100);

// Size of the windowed surface, border included.
const WINDOW_COLUMNS: u16 = 82;
const WINDOW_ROWS: u16 = 32;

pub fn render(frame: &mut Frame, app: &mut App) {
    let viewport = if app.options.fullscreen {
        Viewport::new(frame.area())
    } else {
        render_window(frame, frame.area())
    };
    app.viewport = viewport;

    frame.render_widget(Block::default().style(Style::default().bg(BLACK)), viewport.area);

    match app.mode {
        Mode::Menu => menu::render_menu(frame, viewport, app),
        Mode::Options => menu::render_options(frame, viewport, app),
        Mode::PlayingVsAi | Mode::PlayingCoop => field::render_game(frame, viewport, app),
    }
}

/// Draw the window frame centered in `area` and return the surface inside it.
fn render_window(frame: &mut Frame, area: Rect) -> Viewport {
    let w = WINDOW_COLUMNS.min(area.width);
    let h = WINDOW_ROWS.min(area.height);
    let x = area.x + (area.width - w) / 2;
    let y = area.y + (area.height - h) / 2;
    let outer = Rect::new(x, y, w, h);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(format!(" 🏓 {} ", WINDOW_TITLE))
        .title_style(
            Style::default()
                .fg(Color::Rgb(200, 120, 255))
                .add_modifier(Modifier::BOLD),
        );
    let inner = block.inner(outer);
    frame.render_widget(block, outer);
    Viewport::new(inner)
}

/// One line of text centered on the viewport at logical height `y`.
pub(crate) fn render_centered_line(frame: &mut Frame, viewport: Viewport, y: f32, line: Line) {
    let row = viewport.row(y);
    let area = Rect::new(viewport.area.x, row, viewport.area.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::widgets::tests::placeholder_icons;
    use crate::widgets::ButtonAction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::with_audio(
            Box::new(RecordingAudio::default()),
            placeholder_icons(),
            StdRng::seed_from_u64(1),
        )
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_windowed_viewport_sits_inside_frame() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = app();
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        assert_eq!(app.viewport.area, Rect::new(10, 5, 80, 30));
        assert!(screen_text(&terminal).contains(WINDOW_TITLE));
    }

    #[test]
    fn test_fullscreen_uses_whole_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = app();
        app.activate(ButtonAction::ToggleFullscreen);
        terminal.draw(|frame| render(frame, &mut app)).unwrap();

        assert_eq!(app.viewport.area, Rect::new(0, 0, 100, 40));
        assert!(!screen_text(&terminal).contains(WINDOW_TITLE));
    }

    #[test]
    fn test_every_screen_renders_on_a_small_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        let mut app = app();
        for action in [ButtonAction::OpenOptions, ButtonAction::Back, ButtonAction::PlayVsAi] {
            app.activate(action);
            terminal.draw(|frame| render(frame, &mut app)).unwrap();
        }
    }
}
