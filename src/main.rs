mod app;
mod config;
mod engine;
mod event;
mod keyboard;
mod logging;
mod session;
mod ui;

use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing::{error, info};

use app::App;
use config::Config;
use engine::random::RandomSourceKind;
use event::{AppEvent, EventHandler};
use keyboard::display::key_identifier;
use ui::components::keyboard_diagram::KeyboardDiagram;
use ui::components::tally_panel::TallyPanel;
use ui::layout::{AppLayout, centered_fixed};

#[derive(Parser)]
#[command(name = "keyhunt", version, about = "Find the highlighted key on an on-screen keyboard")]
struct Cli {
    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "Keyboard layout (qwerty, dvorak, colemak, custom)")]
    layout: Option<String>,

    #[arg(long, help = "How long a pressed key stays lit, in milliseconds")]
    flash_ms: Option<u64>,

    #[arg(long, value_parser = parse_source_kind, help = "Secure random source (auto, integer, bytes)")]
    random_source: Option<RandomSourceKind>,

    #[arg(long, help = "Write the effective settings to the config file")]
    save_config: bool,
}

fn parse_source_kind(s: &str) -> Result<RandomSourceKind, String> {
    RandomSourceKind::from_name(s).ok_or_else(|| format!("unknown random source `{s}`"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(layout) = cli.layout {
        config.keyboard_layout = layout;
    }
    if let Some(ms) = cli.flash_ms {
        config.hit_flash_ms = ms;
    }
    if let Some(kind) = cli.random_source {
        config.random_source = kind;
    }
    config.normalize();

    let _log_guard = logging::init_tracing(&config.log_level)?;
    info!(layout = %config.keyboard_layout, theme = %config.theme, "starting keyhunt");

    if cli.save_config {
        config.save()?;
    }

    let mut app = App::new(config)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Caps Lock and Shift are only reported with the enhanced protocol
    let keyboard_enhanced = execute!(
        io::stdout(),
        PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
        )
    )
    .is_ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(app.config.tick_rate());

    let result = run_app(&mut terminal, &mut app, &events);

    if keyboard_enhanced {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(error = ?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    info!(
        matches = app.tally.matches,
        misses = app.tally.misses,
        "keyhunt finished"
    );
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => {
                handle_key(app, key);
                // Ticks stall while keys stream in, so expire flashes here too
                app.tick(Instant::now());
            }
            AppEvent::Tick(now) => app.tick(now),
            AppEvent::Resize => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Only process Press events; auto-repeat would count as extra presses
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('r') => app.retarget(),
            KeyCode::Char('n') => app.reset_tally(),
            _ => {}
        }
        return;
    }

    if key.code == KeyCode::Esc {
        app.should_quit = true;
        return;
    }

    if let Some(id) = key_identifier(key.code) {
        app.press(&id, Instant::now());
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;
    let now = Instant::now();

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let app_layout = AppLayout::new(area);
    let tier = app_layout.tier;

    let mut header_spans = vec![Span::styled(
        " keyhunt ",
        Style::default()
            .fg(colors.header_fg())
            .bg(colors.header_bg())
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(ref status) = app.status {
        header_spans.push(Span::styled(
            format!(" {status}"),
            Style::default().fg(colors.warning()).bg(colors.header_bg()),
        ));
    } else if !tier.show_sidebar() {
        let tally = &app.tally;
        header_spans.push(Span::styled(
            format!(
                " Target: {} | Hits: {} | Misses: {} | Acc: {:.1}% | Streak: {}",
                app.highlighted_id().unwrap_or("-"),
                tally.matches,
                tally.misses,
                tally.accuracy(),
                tally.streak,
            ),
            Style::default().fg(colors.text_dim()).bg(colors.header_bg()),
        ));
    }
    let header = Paragraph::new(Line::from(header_spans))
        .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, app_layout.header);

    let rows = app.trainer.keyboard().row_count() as u16;
    let kbd_height = (rows * 2 + 1).max(3);
    let kbd_area = centered_fixed(app_layout.main.width, kbd_height, app_layout.main);
    let kbd = KeyboardDiagram::new(
        app.trainer.keyboard(),
        app.highlighted_id(),
        &app.layout_name,
        &app.theme,
    )
    .compact(tier.compact_keyboard());
    frame.render_widget(kbd, kbd_area);

    if let Some(sidebar_area) = app_layout.sidebar {
        let panel = TallyPanel::new(&app.tally, app.highlighted_id(), now, &app.theme);
        frame.render_widget(panel, sidebar_area);
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        " [ESC] Quit  [Ctrl+R] New target  [Ctrl+N] Reset tally ",
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, app_layout.footer);
}
