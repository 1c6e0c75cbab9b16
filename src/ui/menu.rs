use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::App;
use crate::config::HEIGHT;
use crate::i18n::{text, TextKey};
use crate::ui::{render_centered_line, Viewport, BLACK, GRAY, WHITE};
use crate::widgets::{Button, ImageButton};

const BANNER: [&str; 6] = [
    "██████╗  ██████╗ ███╗   ██╗ ██████╗ ",
    "██╔══██╗██╔═══██╗████╗  ██║██╔════╝ ",
    "██████╔╝██║   ██║██╔██╗ ██║██║  ███╗",
    "██╔═══╝ ██║   ██║██║╚██╗██║██║   ██║",
    "██║     ╚██████╔╝██║ ╚████║╚██████╔╝",
    "╚═╝      ╚═════╝ ╚═╝  ╚═══╝ ╚═════╝ ",
];
const BANNER_WIDTH: u16 = 36;

pub fn render_menu(frame: &mut Frame, viewport: Viewport, app: &App) {
    let lang = app.options.language;

    // Banner when it fits above the first button, plain title otherwise
    let first_row = app
        .menu_buttons
        .first()
        .map(|b| viewport.to_cells(&b.rect).y)
        .unwrap_or(viewport.area.y);
    let banner_rows = BANNER.len() as u16;
    let banner_top = first_row.saturating_sub(banner_rows + 1);
    if banner_top >= viewport.area.y && viewport.area.width >= BANNER_WIDTH {
        let lines: Vec<Line> = BANNER
            .iter()
            .map(|row| Line::from(Span::styled(*row, Style::default().fg(WHITE).bg(BLACK))))
            .collect();
        let area = Rect::new(viewport.area.x, banner_top, viewport.area.width, banner_rows);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
    } else {
        let title = Span::styled(
            text(lang, TextKey::Title),
            Style::default().fg(WHITE).add_modifier(Modifier::BOLD),
        );
        render_centered_line(frame, viewport, 100.0, Line::from(title));
    }

    for (i, button) in app.menu_buttons.iter().enumerate() {
        render_button(frame, viewport, button, app.focus == i);
    }

    let help = Span::styled(text(lang, TextKey::MenuHelp), Style::default().fg(GRAY));
    render_centered_line(frame, viewport, HEIGHT - 1.0, Line::from(help));
}

pub fn render_options(frame: &mut Frame, viewport: Viewport, app: &App) {
    let lang = app.options.language;

    let title = Span::styled(
        text(lang, TextKey::OptionsTitle),
        Style::default().fg(WHITE).add_modifier(Modifier::BOLD),
    );
    render_centered_line(frame, viewport, 50.0, Line::from(title));

    for (i, button) in app.options_buttons.iter().enumerate() {
        render_button(frame, viewport, button, app.focus == i);
    }

    let label = Span::styled(text(lang, TextKey::Language), Style::default().fg(WHITE));
    render_centered_line(frame, viewport, HEIGHT / 2.0 + 120.0, Line::from(label));

    let icon_focused = app.focus == app.options_buttons.len();
    render_image_button(frame, viewport, &app.language_button, icon_focused);
}

fn render_button(frame: &mut Frame, viewport: Viewport, button: &Button, focused: bool) {
    let area = viewport.to_cells(&button.rect);
    let highlighted = button.hovered || focused;
    let style = Style::default().fg(button.current_color(focused)).bg(BLACK);

    // Too short for a border: bracket the label instead
    if area.height < 3 {
        let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        let label = format!("[ {} ]", button.label);
        let p = Paragraph::new(Span::styled(label, style.add_modifier(Modifier::BOLD)))
            .alignment(Alignment::Center);
        frame.render_widget(p, row);
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if highlighted { BorderType::Double } else { BorderType::Plain })
        .border_style(style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let row = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
    let p = Paragraph::new(Span::styled(button.label.clone(), style.add_modifier(Modifier::BOLD)))
        .alignment(Alignment::Center);
    frame.render_widget(p, row);
}

fn rgb([r, g, b]: [u8; 3]) -> Color {
    Color::Rgb(r, g, b)
}

fn render_image_button(frame: &mut Frame, viewport: Viewport, button: &ImageButton, focused: bool) {
    let area = viewport.to_cells(&button.rect);

    if button.hovered || focused {
        let outline = Rect::new(
            area.x.saturating_sub(1),
            area.y.saturating_sub(1),
            area.width + 2,
            area.height + 2,
        )
        .intersection(viewport.area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(WHITE).bg(BLACK));
        frame.render_widget(block, outline);
    }

    // Two icon pixels per cell: upper half in the foreground, lower in the background
    let icon = button.icon();
    let rows = area.height as f32 * 2.0;
    let lines: Vec<Line> = (0..area.height)
        .map(|r| {
            let spans: Vec<Span> = (0..area.width)
                .map(|c| {
                    let u = (c as f32 + 0.5) / area.width as f32;
                    let top = icon.sample(u, (r as f32 * 2.0 + 0.5) / rows);
                    let bottom = icon.sample(u, (r as f32 * 2.0 + 1.5) / rows);
                    Span::styled("▀", Style::default().fg(rgb(top)).bg(rgb(bottom)))
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);

    if let Some(caption) = icon.caption() {
        let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        let style = Style::default()
            .fg(WHITE)
            .bg(rgb(icon.sample(0.5, 0.5)))
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Paragraph::new(Span::styled(caption, style)).alignment(Alignment::Center), row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::testing::RecordingAudio;
    use crate::i18n::Language;
    use crate::widgets::tests::placeholder_icons;
    use crate::widgets::ButtonAction;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::backend::TestBackend;

    fn rendered(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| crate::ui::render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    fn app() -> App {
        App::with_audio(
            Box::new(RecordingAudio::default()),
            placeholder_icons(),
            StdRng::seed_from_u64(3),
        )
    }

    #[test]
    fn test_menu_shows_localized_labels() {
        let mut app = app();
        let screen = rendered(&mut app, 100, 40);
        assert!(screen.contains("Play vs AI"));
        assert!(screen.contains("Cooperative Play"));
        assert!(screen.contains("Exit"));

        app.activate(ButtonAction::ToggleLanguage);
        let screen = rendered(&mut app, 100, 40);
        assert!(screen.contains("Jugar vs IA"));
        assert!(screen.contains("Salir"));
        assert_eq!(app.options.language, Language::Spanish);
    }

    #[test]
    fn test_options_show_values_and_placeholder_caption() {
        let mut app = app();
        app.activate(ButtonAction::OpenOptions);
        app.activate(ButtonAction::CycleVolume);
        let screen = rendered(&mut app, 100, 40);
        assert!(screen.contains("OPTIONS"));
        assert!(screen.contains("Volume: 20%"));
        assert!(screen.contains("Fullscreen: NO"));
        assert!(screen.contains("Language"));
        assert!(screen.contains("ENG"));
    }
}
