use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::app::{App, Mode};
use crate::config::{HEIGHT, WIDTH};
use crate::game::Session;
use crate::i18n::{text, TextKey};
use crate::ui::{render_centered_line, Viewport, BLACK, BLUE, GRAY, RED, WHITE};

pub fn render_game(frame: &mut Frame, viewport: Viewport, app: &App) {
    let area = viewport.area;
    let lines = render_field(&app.session, area.width as usize, area.height as usize);
    frame.render_widget(Paragraph::new(lines), area);

    let score = app.session.score;
    render_score(frame, viewport, WIDTH / 4.0, score.left, BLUE);
    render_score(frame, viewport, 3.0 * WIDTH / 4.0, score.right, RED);

    // Help bar
    let lang = app.options.language;
    let key_style = Style::default().fg(GRAY).bg(BLACK);
    let sep = Span::styled(" │ ", Style::default().fg(Color::Rgb(60, 60, 60)).bg(BLACK));
    let mut spans = vec![Span::styled(text(lang, TextKey::PlayerOneControls), key_style)];
    if app.mode == Mode::PlayingCoop {
        spans.push(sep.clone());
        spans.push(Span::styled(text(lang, TextKey::PlayerTwoControls), key_style));
    }
    spans.push(sep);
    spans.push(Span::styled(text(lang, TextKey::BackToMenu), key_style));
    render_centered_line(frame, viewport, HEIGHT - 1.0, Line::from(spans));
}

fn render_score(frame: &mut Frame, viewport: Viewport, x: f32, value: u32, color: Color) {
    let digits = value.to_string();
    let col = viewport.column(x);
    let row = viewport.row(20.0);
    let room = viewport.area.x + viewport.area.width - col;
    let area = Rect::new(col, row, (digits.len() as u16).min(room), 1);
    let style = Style::default().fg(color).bg(BLACK).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(Span::styled(digits, style)), area);
}

/// Color of the logical pixel at `(x, y)`, if anything is there.
fn pixel(session: &Session, x: f32, y: f32) -> Option<Color> {
    let ball = &session.ball.rect;
    let dx = (x - ball.center_x()) / (ball.w / 2.0);
    let dy = (y - ball.center_y()) / (ball.h / 2.0);
    if dx * dx + dy * dy <= 1.0 {
        return Some(WHITE);
    }
    if session.left.rect.contains(x, y) {
        return Some(BLUE);
    }
    if session.right.rect.contains(x, y) {
        return Some(RED);
    }
    None
}

/// Rasterize the field into half-block cells: each cell shows two logical
/// rows, the upper one as foreground and the lower one as background.
pub fn render_field(session: &Session, width: usize, height: usize) -> Vec<Line<'static>> {
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let sx = WIDTH / width as f32;
    let sy = HEIGHT / (height * 2) as f32;
    let net_col = (WIDTH / 2.0 / sx) as usize;

    let mut halves: Vec<Vec<[Option<Color>; 2]>> = vec![vec![[None, None]; width]; height];
    for (r, row) in halves.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            let x = (c as f32 + 0.5) * sx;
            for (half, slot) in cell.iter_mut().enumerate() {
                let y = ((r * 2 + half) as f32 + 0.5) * sy;
                *slot = pixel(session, x, y);
            }
        }
    }

    // Keep the ball visible even when it is smaller than a cell
    let (bx, by) = (session.ball.rect.center_x(), session.ball.rect.center_y());
    if (0.0..WIDTH).contains(&bx) && (0.0..HEIGHT).contains(&by) {
        let (c, half_row) = ((bx / sx) as usize, (by / sy) as usize);
        if c < width && half_row / 2 < height {
            halves[half_row / 2][c][half_row % 2] = Some(WHITE);
        }
    }

    halves
        .into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .enumerate()
                .map(|(c, cell)| match cell {
                    [None, None] if c == net_col => {
                        Span::styled("│", Style::default().fg(GRAY).bg(BLACK))
                    }
                    [None, None] => Span::styled(" ", Style::default().bg(BLACK)),
                    [top, bottom] => Span::styled(
                        "▀",
                        Style::default()
                            .fg(top.unwrap_or(BLACK))
                            .bg(bottom.unwrap_or(BLACK)),
                    ),
                })
                .collect();
            Line::from(spans)
        })
        .collect()
}
