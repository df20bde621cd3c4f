use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use typetest::app::App;
use typetest::cli::{Cli, Command};
use typetest::config::Config;
use typetest::event::{AppEvent, EventHandler};
use typetest::language::Language;
use typetest::session::{ModeKind, SessionEvent};
use typetest::ui::components::stats_bar::StatsBar;
use typetest::ui::components::summary::Summary;
use typetest::ui::components::typing_area::TypingArea;
use typetest::ui::layout::AppLayout;
use typetest::ui::theme::Theme;

const LOG_ENV: &str = "TYPETEST_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Languages) => {
            for language in Language::supported() {
                println!("{:<18} {}", language.as_str(), language.display_name());
            }
            return Ok(());
        }
        Some(Command::Modes) => {
            for mode in ModeKind::ALL {
                println!("{:<8} {}", mode.as_str(), mode.description());
            }
            return Ok(());
        }
        None => {}
    }

    init_logging();

    let config = Config::load()?;
    let settings = cli.resolve(&config)?;
    let theme = Theme::load(&settings.theme).unwrap_or_else(|| {
        warn!(theme = %settings.theme, "unknown theme, using default");
        Theme::default()
    });
    let mut app = App::new(settings, theme).context("loading text for the session")?;
    info!(mode = %app.settings.mode, language = %app.settings.language, "typetest starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut events = EventHandler::new(app.settings.tick_rate);

    let result = run_app(&mut terminal, &mut app, &mut events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }
    if let Some(result) = app.result() {
        println!("{result}");
    }

    Ok(())
}

/// Logs go to a file because the terminal belongs to the UI.
fn init_logging() {
    let log_path = Config::data_dir().join("typetest.log");
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&log_path) else {
        return;
    };

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    let size = terminal.size()?;
    app.handle_event(SessionEvent::Resize(size.width), Instant::now());

    loop {
        terminal.draw(|frame| render(frame, app))?;

        let effects = match events.next()? {
            AppEvent::Key(key) => app.handle_key(key, Instant::now()),
            AppEvent::Tick(now) => app.handle_event(SessionEvent::Tick, now),
            AppEvent::Resize(width, _) => {
                app.handle_event(SessionEvent::Resize(width), Instant::now())
            }
        };
        events.schedule_tick(effects.request_tick, Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let now = Instant::now();

    frame.render_widget(Block::default().style(app.theme.base_style()), area);

    let layout = AppLayout::new(area);
    let session = app.frame(now);

    frame.render_widget(app.header(), layout.header);
    frame.render_widget(TypingArea::new(&session.model, &app.theme), layout.main);

    let hints = match app.result() {
        Some(result) => {
            frame.render_widget(Summary::new(result, &app.theme), layout.stats);
            " [Enter] Restart  [Esc] Quit "
        }
        None => {
            frame.render_widget(StatsBar::new(&session, &app.theme), layout.stats);
            if app.settings.mode.supports_force_finish() {
                " [Ctrl+F] Finish  [Esc] Quit "
            } else {
                " [Esc] Quit "
            }
        }
    };

    let footer = Paragraph::new(Line::from(Span::styled(hints, app.theme.label_style())));
    frame.render_widget(footer, layout.footer);
}
