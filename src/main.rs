mod api;
mod app;
mod config;
mod event;
mod logging;
mod page;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use api::client::ApiClient;
use api::worker::ApiDispatcher;
use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use ui::components::practice_form::PracticeForm;
use ui::components::result_card::ResultCard;
use ui::components::session_list::SessionList;
use ui::components::stats_panel::StatsPanel;
use ui::components::word_card::WordCard;
use ui::layout::AppLayout;
use ui::sentence_input::InputResult;

#[derive(Parser)]
#[command(name = "worddr", version, about = "Terminal vocabulary practice client")]
struct Cli {
    #[arg(long, help = "Backend base URL (overrides config)")]
    api_url: Option<String>,

    #[arg(short, long, help = "Theme name")]
    theme: Option<String>,

    #[arg(short, long, help = "CEFR difficulty filter (A1-C2, or 'all')")]
    difficulty: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    config.validate();

    if let Err(err) = logging::init() {
        eprintln!("Warning: logging disabled: {err}");
    }

    let client = ApiClient::new(
        &config.api_url,
        Duration::from_secs(config.request_timeout_secs),
    )?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));
    let dispatcher = ApiDispatcher::new(client, events.sender());
    let mut app = App::new(config, dispatcher);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

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
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Api(response) => app.on_api(response),
            AppEvent::Tick => {}
            AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    match app.screen {
        AppScreen::Practice => handle_practice_key(app, key),
        AppScreen::Dashboard => handle_dashboard_key(app, key),
    }
}

fn handle_practice_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Tab => app.go_to_dashboard(),
        KeyCode::Char('n') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.load_word();
        }
        _ => {
            // Form input is disabled while a request is in flight.
            if app.practice.loading || app.practice.word.is_none() {
                return;
            }
            if app.form.handle(key) == InputResult::Submit {
                app.submit_sentence();
            }
        }
    }
}

fn handle_dashboard_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Tab => app.go_to_practice(),
        KeyCode::Char('r') => app.refresh_stats(),
        _ => {}
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = ratatui::widgets::Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    match app.screen {
        AppScreen::Practice => render_practice(frame, app),
        AppScreen::Dashboard => render_dashboard(frame, app),
    }
}

fn render_header(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, title: &str) {
    let colors = &app.theme.colors;
    let info = format!(" | {}", app.config.api_url);
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" worddr {title} "),
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            info,
            Style::default()
                .fg(colors.text_dim())
                .bg(colors.header_bg()),
        ),
    ]))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, area);
}

fn render_footer(frame: &mut ratatui::Frame, app: &App, area: ratatui::layout::Rect, hints: &str) {
    let colors = &app.theme.colors;
    let footer = Paragraph::new(Line::from(Span::styled(
        hints.to_string(),
        Style::default().fg(colors.text_dim()),
    )));
    frame.render_widget(footer, area);
}

fn render_practice(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header, "- Practice");
    render_footer(
        frame,
        app,
        layout.footer,
        " [Enter] Submit  [Ctrl-N] Next word  [Tab] Dashboard  [Esc] Quit ",
    );

    let page = &app.practice;

    // Stack: optional error banner, then either the initial loading notice
    // or the word/form/result column.
    let mut constraints: Vec<Constraint> = Vec::new();
    if !page.error.is_empty() {
        constraints.push(Constraint::Length(1));
    }
    if page.word.is_some() {
        constraints.push(Constraint::Length(8)); // word card
        constraints.push(Constraint::Length(3)); // sentence form
        constraints.push(Constraint::Min(0)); // result card / spacer
    } else {
        constraints.push(Constraint::Min(0));
    }

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(layout.main);

    let mut idx = 0;
    if !page.error.is_empty() {
        let banner = Paragraph::new(Line::from(Span::styled(
            format!(" {} ", page.error),
            Style::default()
                .fg(colors.bg())
                .bg(colors.error())
                .add_modifier(Modifier::BOLD),
        )));
        frame.render_widget(banner, main[idx]);
        idx += 1;
    }

    match page.word {
        Some(ref word) => {
            frame.render_widget(WordCard::new(word, app.theme), main[idx]);
            frame.render_widget(
                PracticeForm::new(&app.form, page.loading, app.theme),
                main[idx + 1],
            );
            if let Some(ref result) = page.result {
                frame.render_widget(ResultCard::new(result, app.theme), main[idx + 2]);
            }
        }
        None => {
            if page.loading {
                let notice = Paragraph::new(Line::from(Span::styled(
                    "Loading word...",
                    Style::default().fg(colors.text_dim()),
                )))
                .alignment(ratatui::layout::Alignment::Center);
                let centered = ui::layout::centered_rect(40, 20, main[idx]);
                frame.render_widget(notice, centered);
            }
        }
    }
}

fn render_dashboard(frame: &mut ratatui::Frame, app: &App) {
    let colors = &app.theme.colors;
    let layout = AppLayout::new(frame.area());

    render_header(frame, app, layout.header, "- Your Progress");
    render_footer(
        frame,
        app,
        layout.footer,
        " [r] Refresh  [Tab/Esc] Practice  [Ctrl-C] Quit ",
    );

    let page = &app.dashboard;

    if page.loading {
        let notice = Paragraph::new(Line::from(Span::styled(
            "Loading stats...",
            Style::default().fg(colors.text_dim()),
        )))
        .alignment(ratatui::layout::Alignment::Center);
        let centered = ui::layout::centered_rect(40, 20, layout.main);
        frame.render_widget(notice, centered);
        return;
    }

    let sessions = page
        .stats
        .as_ref()
        .map(|stats| stats.recent_sessions.as_slice())
        .unwrap_or_default();

    let mut constraints = vec![Constraint::Length(5)];
    if !sessions.is_empty() {
        constraints.push(Constraint::Min(0));
    }
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(layout.main);

    frame.render_widget(StatsPanel::new(page.stats.as_ref(), app.theme), main[0]);
    if !sessions.is_empty() {
        frame.render_widget(SessionList::new(sessions, app.theme), main[1]);
    }
}
