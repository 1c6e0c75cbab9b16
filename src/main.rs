mod app;
mod assets;
mod audio;
mod config;
mod event;
mod game;
mod i18n;
mod input;
mod options;
mod ui;
mod widgets;

use std::io::{self, Stdout};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::EnvFilter;

use app::App;
use assets::Assets;
use event::{Event, EventHandler};

/// Log lines go to a file in `dir`; the terminal belongs to the game.
fn log_writer(dir: &Path) -> anyhow::Result<(NonBlocking, WorkerGuard)> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(config::LOG_FILE)
        .build(dir)
        .with_context(|| format!("creating {} in {}", config::LOG_FILE, dir.display()))?;
    Ok(tracing_appender::non_blocking(appender))
}

fn subscriber(writer: NonBlocking, filter: EnvFilter) -> impl tracing::Subscriber + Send + Sync {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(writer)
        .finish()
}

fn init_tracing() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let (writer, guard) = match log_writer(Path::new(".")) {
        Ok(pair) => pair,
        Err(err) => {
            eprintln!("logging disabled: {err:#}");
            return None;
        }
    };

    if tracing::subscriber::set_global_default(subscriber(writer, filter)).is_err() {
        eprintln!("tracing subscriber already set");
    }
    Some(guard)
}

fn main() -> anyhow::Result<()> {
    let _log_guard = init_tracing();

    let assets = Assets::load(Path::new("."), &mut rand::thread_rng());
    let mut app = App::new(assets);

    // Setup terminal
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let enhanced = matches!(supports_keyboard_enhancement(), Ok(true));
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )?;
    }
    tracing::info!(enhanced, "terminal ready");
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> anyhow::Result<()> {
    let event_handler = EventHandler::new(config::FRAME_PERIOD);

    loop {
        match event_handler.next()? {
            Event::Tick => {
                app.on_tick(Instant::now());
                if app.needs_clear {
                    terminal.clear()?;
                    app.needs_clear = false;
                }
                terminal.draw(|frame| ui::render(frame, app))?;
            }
            Event::Key(key) => app.on_key(key, Instant::now()),
            Event::Mouse(mouse) => app.on_mouse(mouse),
            Event::Resize => app.needs_clear = true,
        }

        if app.should_quit {
            break;
        }
    }

    tracing::info!(
        left = app.session.score.left,
        right = app.session.score.right,
        "shutting down"
    );
    Ok(())
}
